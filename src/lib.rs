//! Content-based movie recommendation service.
//!
//! Ranks a random sample of the catalog against the best-rated movies
//! using genre/cast/director overlap, release-year proximity and TF-IDF
//! keyword similarity over plot texts.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
