//! In-memory movie catalog repository

use async_trait::async_trait;

use crate::domain::DomainError;
use crate::domain::movie::{BrowseFilter, BrowsePage, MovieRepository, MovieSummary};

/// In-memory implementation of [`MovieRepository`]
///
/// Used for development without a database and in tests. Filtering matches
/// the SQL semantics of the Postgres implementation.
#[derive(Debug, Default)]
pub struct InMemoryMovieRepository {
    movies: Vec<MovieSummary>,
}

impl InMemoryMovieRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movies(mut self, movies: Vec<MovieSummary>) -> Self {
        self.movies = movies;
        self
    }

    fn matches(movie: &MovieSummary, filter: &BrowseFilter, decade: Option<(i32, i32)>) -> bool {
        if let Some(genre) = &filter.genre {
            let has_genre = movie
                .genres
                .as_deref()
                .is_some_and(|g| g.to_lowercase().contains(&genre.to_lowercase()));
            if !has_genre {
                return false;
            }
        }

        if let Some((first, last)) = decade {
            if !movie.year.is_some_and(|y| y >= first && y <= last) {
                return false;
            }
        }

        if let Some(min_rating) = filter.min_rating {
            if !movie.rating.is_some_and(|r| r >= min_rating) {
                return false;
            }
        }

        if let Some(min_year) = filter.min_year {
            if !movie.year.is_some_and(|y| y >= min_year) {
                return false;
            }
        }

        true
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn browse(
        &self,
        filter: &BrowseFilter,
        page: u32,
        limit: u32,
    ) -> Result<BrowsePage, DomainError> {
        let decade = filter.decade_bounds()?;

        let mut matching: Vec<&MovieSummary> = self
            .movies
            .iter()
            .filter(|m| Self::matches(m, filter, decade))
            .collect();

        matching.sort_by(|a, b| {
            b.popularity
                .unwrap_or(0.0)
                .partial_cmp(&a.popularity.unwrap_or(0.0))
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });

        let total = matching.len() as u64;
        let offset = (page.saturating_sub(1) as usize) * limit as usize;

        let movies = matching
            .into_iter()
            .skip(offset)
            .take(limit as usize)
            .cloned()
            .collect();

        Ok(BrowsePage { movies, total })
    }
}
