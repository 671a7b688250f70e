use std::collections::HashSet;

use crate::models::Movie;
use crate::services::tfidf::SparseVector;

// Blend weights, summing to 1.0.
const GENRES_WEIGHT: f64 = 0.4;
const CAST_WEIGHT: f64 = 0.3;
const DIRECTORS_WEIGHT: f64 = 0.1;
const YEAR_WEIGHT: f64 = 0.1;
const KEYWORDS_WEIGHT: f64 = 0.1;

/// Gap in years over which the year sub-score decays to zero.
const YEAR_DECAY_SPAN: f64 = 30.0;

/// Jaccard index of two label lists. Both empty is defined as 0.
pub fn jaccard(a: &[String], b: &[String]) -> f64 {
    let s1: HashSet<&str> = a.iter().map(String::as_str).collect();
    let s2: HashSet<&str> = b.iter().map(String::as_str).collect();
    if s1.is_empty() && s2.is_empty() {
        return 0.0;
    }

    let intersection = s1.intersection(&s2).count();
    let union = s1.union(&s2).count();
    intersection as f64 / union as f64
}

/// Binary indicator: 1 if the two movies share any director, else 0.
fn directors_match(a: &[String], b: &[String]) -> f64 {
    let s1: HashSet<&str> = a.iter().map(String::as_str).collect();
    if b.iter().any(|d| s1.contains(d.as_str())) {
        1.0
    } else {
        0.0
    }
}

/// Linear decay from 1 at equal years to 0 at a 30-year gap, clamped.
/// A missing year on either side scores 0 rather than failing the pair.
pub fn year_proximity(a: Option<i32>, b: Option<i32>) -> f64 {
    match (a, b) {
        (Some(y1), Some(y2)) => {
            let gap = f64::from((y1 - y2).abs());
            (1.0 - gap / YEAR_DECAY_SPAN).max(0.0)
        }
        _ => 0.0,
    }
}

/// Blended similarity between a reference movie and a candidate.
///
/// Each sub-score lies in [0, 1] and the weights sum to 1, so the result
/// is bounded in [0, 1] for well-formed inputs. Pure: degraded fields
/// lower individual sub-scores, never fail the comparison.
pub fn similarity(
    target: &Movie,
    candidate: &Movie,
    target_keywords: &SparseVector,
    candidate_keywords: &SparseVector,
) -> f64 {
    let genres = jaccard(&target.genres, &candidate.genres);
    let cast = jaccard(&target.cast, &candidate.cast);
    let directors = directors_match(&target.directors, &candidate.directors);
    let year = year_proximity(target.year, candidate.year);
    let keywords = target_keywords.dot(candidate_keywords);

    GENRES_WEIGHT * genres
        + CAST_WEIGHT * cast
        + DIRECTORS_WEIGHT * directors
        + YEAR_WEIGHT * year
        + KEYWORDS_WEIGHT * keywords
}
