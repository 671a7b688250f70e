pub mod postgres;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::Movie;

pub use postgres::{create_pool, PostgresMovieStore};

/// Read-only source of movie records.
///
/// The ranking pipeline receives both of its input sets as plain values
/// through this seam, so tests can supply in-memory fixtures instead of
/// Postgres.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Best-rated movies, ordered by average rating descending.
    async fn top_rated(&self, limit: i64) -> AppResult<Vec<Movie>>;

    /// Uniform random sample of the catalog.
    async fn sample(&self, limit: i64) -> AppResult<Vec<Movie>>;
}
