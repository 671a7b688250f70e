use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A movie record from the catalog.
///
/// Optional fields stay `Option` rather than defaulting: a missing year
/// or plot degrades the matching sub-scores without disqualifying the
/// movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub year: Option<i32>,
    pub plot: Option<String>,
    pub fullplot: Option<String>,
    pub genres: Vec<String>,
    pub cast: Vec<String>,
    pub directors: Vec<String>,
    pub countries: Vec<String>,
    pub runtime: Option<i32>,
    pub rated: Option<String>,
}

/// A candidate movie with its best similarity score against the
/// reference set. Serializes as the movie object with a `score` field
/// alongside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub movie: Movie,
    pub score: f64,
}
