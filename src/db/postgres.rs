use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::db::MovieStore;
use crate::error::AppResult;
use crate::models::Movie;

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Movie store backed by the catalog and rating-aggregate tables.
pub struct PostgresMovieStore {
    pool: PgPool,
}

impl PostgresMovieStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieStore for PostgresMovieStore {
    async fn top_rated(&self, limit: i64) -> AppResult<Vec<Movie>> {
        let movies = sqlx::query_as::<_, Movie>(
            r#"
            SELECT m.*
            FROM movies m
            JOIN movie_ratings r ON r.movie_id = m.id
            ORDER BY r.avg_rating DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(movies)
    }

    async fn sample(&self, limit: i64) -> AppResult<Vec<Movie>> {
        let movies =
            sqlx::query_as::<_, Movie>("SELECT * FROM movies ORDER BY random() LIMIT $1")
                .bind(limit)
                .fetch_all(&self.pool)
                .await?;

        Ok(movies)
    }
}
