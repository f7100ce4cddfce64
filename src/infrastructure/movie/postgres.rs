//! PostgreSQL movie catalog repository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::domain::DomainError;
use crate::domain::movie::{BrowseFilter, BrowsePage, MovieRepository, MovieSummary};

/// PostgreSQL implementation of [`MovieRepository`]
///
/// Reads the relational mirror of the vector index (`movies` table: id,
/// title, year, genres, rating, popularity, poster_path, overview).
#[derive(Debug, Clone)]
pub struct PostgresMovieRepository {
    pool: PgPool,
}

impl PostgresMovieRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn push_filters(
        builder: &mut QueryBuilder<'_, Postgres>,
        filter: &BrowseFilter,
        decade: Option<(i32, i32)>,
    ) {
        let mut prefix = " WHERE ";

        if let Some(genre) = &filter.genre {
            builder.push(prefix).push("genres ILIKE ");
            builder.push_bind(format!("%{}%", genre));
            prefix = " AND ";
        }

        if let Some((first, last)) = decade {
            builder.push(prefix).push("year BETWEEN ");
            builder.push_bind(first);
            builder.push(" AND ");
            builder.push_bind(last);
            prefix = " AND ";
        }

        if let Some(min_rating) = filter.min_rating {
            builder.push(prefix).push("rating >= ");
            builder.push_bind(min_rating);
            prefix = " AND ";
        }

        if let Some(min_year) = filter.min_year {
            builder.push(prefix).push("year >= ");
            builder.push_bind(min_year);
        }
    }
}

#[async_trait]
impl MovieRepository for PostgresMovieRepository {
    async fn browse(
        &self,
        filter: &BrowseFilter,
        page: u32,
        limit: u32,
    ) -> Result<BrowsePage, DomainError> {
        let decade = filter.decade_bounds()?;

        let mut count_builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM movies");
        Self::push_filters(&mut count_builder, filter, decade);

        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count movies: {}", e)))?;

        let offset = i64::from(page.saturating_sub(1)) * i64::from(limit);

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, title, year, genres, rating, popularity, poster_path, overview \
             FROM movies",
        );
        Self::push_filters(&mut builder, filter, decade);
        builder.push(" ORDER BY popularity DESC NULLS LAST, id LIMIT ");
        builder.push_bind(i64::from(limit));
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list movies: {}", e)))?;

        let movies = rows
            .iter()
            .map(|row| {
                Ok(MovieSummary {
                    id: row
                        .try_get("id")
                        .map_err(|e| DomainError::storage(format!("Bad movie row: {}", e)))?,
                    title: row
                        .try_get("title")
                        .map_err(|e| DomainError::storage(format!("Bad movie row: {}", e)))?,
                    year: row.try_get("year").ok(),
                    genres: row.try_get("genres").ok(),
                    rating: row.try_get("rating").ok(),
                    popularity: row.try_get("popularity").ok(),
                    poster: row.try_get("poster_path").ok(),
                    overview: row.try_get("overview").ok(),
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(BrowsePage {
            movies,
            total: total.max(0) as u64,
        })
    }
}
