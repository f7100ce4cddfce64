//! Movie catalog infrastructure - repository implementations

mod in_memory;
mod postgres;

pub use in_memory::InMemoryMovieRepository;
pub use postgres::PostgresMovieRepository;
