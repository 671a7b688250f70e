use std::collections::HashSet;
use std::time::Instant;

use crate::db::MovieStore;
use crate::error::AppResult;
use crate::models::{Movie, Recommendation};
use crate::services::scoring;
use crate::services::tfidf::TfidfVectorizer;

/// Ranks `candidates` against `reference` and returns at most `limit`
/// recommendations, best first.
///
/// One vectorizer fit covers both sets so their keyword vectors share a
/// term space; the split at `reference.len()` recovers the per-set
/// vectors, index-aligned to the inputs. Each candidate keeps the maximum
/// score over all reference movies with a different id ("the best single
/// reason to recommend it"), candidates repeated in the pool are emitted
/// once, and a candidate that never beats the 0 floor is still included.
/// Equal scores keep candidate order (stable sort).
pub fn rank(reference: &[Movie], candidates: &[Movie], limit: usize) -> Vec<Recommendation> {
    let corpus: Vec<&str> = reference
        .iter()
        .chain(candidates.iter())
        .map(|movie| movie.fullplot.as_deref().unwrap_or(""))
        .collect();

    let mut vectorizer = TfidfVectorizer::new();
    let vectors = vectorizer.fit_transform(&corpus);
    let (reference_vectors, candidate_vectors) = vectors.split_at(reference.len());

    let mut seen = HashSet::new();
    let mut recommendations = Vec::with_capacity(candidates.len());

    for (candidate, candidate_vector) in candidates.iter().zip(candidate_vectors) {
        if !seen.insert(candidate.id) {
            continue;
        }

        let mut best = 0.0_f64;
        for (target, target_vector) in reference.iter().zip(reference_vectors) {
            if target.id == candidate.id {
                continue;
            }
            let score = scoring::similarity(target, candidate, target_vector, candidate_vector);
            if score > best {
                best = score;
            }
        }

        recommendations.push(Recommendation {
            movie: candidate.clone(),
            score: best,
        });
    }

    recommendations
        .sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    recommendations.truncate(limit);
    recommendations
}

/// Fetches the reference and candidate pools from the store and ranks
/// them.
///
/// The reference set is the catalog's best-rated movies; candidates are
/// a uniform random sample. An empty reference set short-circuits to an
/// empty result.
pub async fn recommend(
    store: &dyn MovieStore,
    reference_size: i64,
    candidate_size: i64,
    limit: usize,
) -> AppResult<Vec<Recommendation>> {
    let start = Instant::now();

    let reference = store.top_rated(reference_size).await?;
    if reference.is_empty() {
        tracing::info!("No rated movies to recommend from");
        return Ok(Vec::new());
    }

    let candidates = store.sample(candidate_size).await?;

    tracing::info!(
        reference = reference.len(),
        candidates = candidates.len(),
        limit,
        "Ranking candidates"
    );

    let recommendations = rank(&reference, &candidates, limit);

    tracing::info!(
        returned = recommendations.len(),
        processing_time_ms = start.elapsed().as_millis() as u64,
        "Recommendations computed"
    );

    Ok(recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn movie(
        genres: &[&str],
        cast: &[&str],
        directors: &[&str],
        year: Option<i32>,
        fullplot: &str,
    ) -> Movie {
        Movie {
            id: Uuid::new_v4(),
            title: "Test Movie".to_string(),
            year,
            plot: None,
            fullplot: Some(fullplot.to_string()),
            genres: genres.iter().map(|s| s.to_string()).collect(),
            cast: cast.iter().map(|s| s.to_string()).collect(),
            directors: directors.iter().map(|s| s.to_string()).collect(),
            countries: Vec::new(),
            runtime: None,
            rated: None,
        }
    }

    fn detective_reference() -> Movie {
        movie(
            &["Drama"],
            &["A"],
            &["X"],
            Some(2000),
            "a detective investigates a murder",
        )
    }

    #[test]
    fn test_close_match_outranks_unrelated_candidate() {
        let reference = vec![detective_reference()];
        let close = movie(
            &["Drama"],
            &["A"],
            &["Y"],
            Some(2001),
            "a detective solves a murder case",
        );
        let far = movie(&["Comedy"], &["B"], &["Z"], Some(1950), "a clown juggles");
        let candidates = vec![far.clone(), close.clone()];

        let ranked = rank(&reference, &candidates, 10);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].movie.id, close.id);
        assert_eq!(ranked[1].movie.id, far.id);
        // Shared genre, cast and plot keywords plus a one-year gap put the
        // close candidate well above the midpoint.
        assert!(ranked[0].score > 0.5);
        // The unrelated candidate shares nothing, not even plot terms.
        assert_eq!(ranked[1].score, 0.0);
    }

    #[test]
    fn test_rank_is_deterministic() {
        let reference = vec![detective_reference()];
        let candidates = vec![
            movie(&["Drama"], &["A"], &[], Some(1998), "a murder in the city"),
            movie(&["Crime"], &[], &[], Some(2005), "a detective on a case"),
            movie(&[], &[], &[], None, ""),
        ];

        let first = rank(&reference, &candidates, 10);
        let second = rank(&reference, &candidates, 10);
        assert_eq!(first, second);
    }

    #[test]
    fn test_scores_are_bounded() {
        let reference = vec![
            detective_reference(),
            movie(&["Crime", "Drama"], &["A", "B"], &["X"], Some(1990), "a heist goes wrong"),
        ];
        let candidates = vec![
            movie(&["Drama"], &["A"], &["X"], Some(2000), "a detective investigates a murder"),
            movie(&[], &[], &[], None, ""),
        ];

        for recommendation in rank(&reference, &candidates, 10) {
            assert!((0.0..=1.0).contains(&recommendation.score));
        }
    }

    #[test]
    fn test_duplicate_candidates_emitted_once() {
        let reference = vec![detective_reference()];
        let candidate = movie(&["Drama"], &["A"], &[], Some(1999), "a murder mystery");
        let candidates = vec![candidate.clone(), candidate.clone(), candidate];

        let ranked = rank(&reference, &candidates, 10);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_candidate_never_compared_to_itself() {
        let shared = detective_reference();
        let reference = vec![shared.clone()];
        let candidates = vec![shared];

        let ranked = rank(&reference, &candidates, 10);

        // The only reference has the same id, so no comparison happens
        // and the candidate keeps the zero floor instead of a perfect
        // self-match.
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].score, 0.0);
    }

    #[test]
    fn test_limit_semantics() {
        let reference = vec![detective_reference()];
        let candidates: Vec<Movie> = (0..5)
            .map(|i| movie(&["Drama"], &[], &[], Some(1990 + i), "a murder story"))
            .collect();

        assert_eq!(rank(&reference, &candidates, 0).len(), 0);
        assert_eq!(rank(&reference, &candidates, 3).len(), 3);
        assert_eq!(rank(&reference, &candidates, 5).len(), 5);
        assert_eq!(rank(&reference, &candidates, 100).len(), 5);
    }

    #[test]
    fn test_empty_reference_keeps_candidate_order_with_zero_scores() {
        let candidates = vec![
            movie(&["Drama"], &[], &[], Some(2000), "a detective story"),
            movie(&["Comedy"], &[], &[], Some(1980), "a clown act"),
            movie(&["Horror"], &[], &[], None, ""),
        ];

        let ranked = rank(&[], &candidates, 10);

        assert_eq!(ranked.len(), 3);
        for (recommendation, candidate) in ranked.iter().zip(&candidates) {
            assert_eq!(recommendation.movie.id, candidate.id);
            assert_eq!(recommendation.score, 0.0);
        }
    }

    #[test]
    fn test_empty_candidates_yield_empty_result() {
        let reference = vec![detective_reference()];
        assert!(rank(&reference, &[], 10).is_empty());
    }

    #[test]
    fn test_zero_scoring_candidates_are_not_dropped() {
        let reference = vec![detective_reference()];
        let unrelated = movie(&[], &[], &[], None, "");

        let ranked = rank(&reference, &[unrelated], 10);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].score, 0.0);
    }

    #[test]
    fn test_best_reference_wins() {
        let weak = movie(&["Drama"], &[], &[], None, "");
        let strong = movie(
            &["Drama"],
            &["A"],
            &["X"],
            Some(2000),
            "a detective investigates a murder",
        );
        let reference = vec![weak, strong];

        let candidate = movie(
            &["Drama"],
            &["A"],
            &["X"],
            Some(2000),
            "a detective investigates a murder",
        );
        let ranked = rank(&reference, &[candidate], 10);

        // The perfect match against the second reference movie wins over
        // the genre-only match against the first.
        assert!((ranked[0].score - 1.0).abs() < 1e-9);
    }
}
