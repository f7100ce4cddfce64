//! Application services built on the domain traits

mod catalog;
mod search;

pub use catalog::{BrowseResponse, CatalogConfig, CatalogService};
pub use search::{GraphResponse, SearchConfig, SearchResponse, SearchService, check_dimensions};
