//! Property tests for vector similarity and top-N selection.

use docqa::document::ScoredUnit;
use docqa::error::QaError;
use docqa::ranker::{Ranking, select_top};
use docqa::vector::cosine_similarity;
use proptest::prelude::*;

/// Generate a non-zero L2-normalized embedding of the given dimension.
fn arb_normalized_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map(
        "non-zero embedding",
        |mut v| {
            let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm < 1e-3 {
                return None;
            }
            for val in &mut v {
                *val /= norm;
            }
            Some(v)
        },
    )
}

/// Scores drawn from a small set so exact ties are common.
fn arb_units() -> impl Strategy<Value = Vec<ScoredUnit>> {
    proptest::collection::vec(prop_oneof![Just(0.0f32), Just(0.25), Just(0.5), Just(1.0), Just(1.5)], 0..20)
        .prop_map(|scores| {
            scores
                .into_iter()
                .enumerate()
                .map(|(i, score)| ScoredUnit::new(format!("unit-{i}"), score))
                .collect()
        })
}

fn position(id: &str) -> usize {
    id.trim_start_matches("unit-").parse().unwrap()
}

mod prop_cosine_similarity {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn self_similarity_is_one(v in arb_normalized_embedding(16)) {
            let score = cosine_similarity(&v, &v).unwrap();
            prop_assert!((score - 1.0).abs() < 1e-4, "cos(v, v) = {score}");
        }

        #[test]
        fn opposite_similarity_is_minus_one(v in arb_normalized_embedding(16)) {
            let negated: Vec<f32> = v.iter().map(|x| -x).collect();
            let score = cosine_similarity(&v, &negated).unwrap();
            prop_assert!((score + 1.0).abs() < 1e-4, "cos(v, -v) = {score}");
        }

        #[test]
        fn similarity_is_bounded(a in arb_normalized_embedding(8), b in arb_normalized_embedding(8)) {
            let score = cosine_similarity(&a, &b).unwrap();
            prop_assert!((-1.0 - 1e-4..=1.0 + 1e-4).contains(&score));
        }

        #[test]
        fn mismatched_lengths_fail(
            a in proptest::collection::vec(-1.0f32..1.0, 1..12),
            b in proptest::collection::vec(-1.0f32..1.0, 1..12),
        ) {
            prop_assume!(a.len() != b.len());
            let err = cosine_similarity(&a, &b).unwrap_err();
            let is_dimension_mismatch = matches!(err, QaError::DimensionMismatch { .. });
            prop_assert!(is_dimension_mismatch);
        }
    }
}

/// *For any* list of scored units, `select_top` returns at most `n` units,
/// ordered by non-increasing score, with equal scores in insertion order.
mod prop_select_top_ordering {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn bounded_sorted_and_stable(units in arb_units(), n in 0usize..25) {
            let total = units.len();
            match select_top(units, n, f32::NEG_INFINITY) {
                Ranking::NoRelevantMatch => prop_assert!(n == 0 || total == 0),
                Ranking::Selected(selection) => {
                    prop_assert!(selection.len() <= n);
                    prop_assert_eq!(selection.len(), n.min(total));
                    for window in selection.units().windows(2) {
                        prop_assert!(
                            window[0].score >= window[1].score,
                            "results not in descending order: {} < {}",
                            window[0].score,
                            window[1].score,
                        );
                        if window[0].score == window[1].score {
                            prop_assert!(position(&window[0].id) < position(&window[1].id));
                        }
                    }
                }
            }
        }

        #[test]
        fn rejection_matches_best_score(units in arb_units(), threshold in 0.0f32..2.0) {
            let best = units.iter().map(|u| u.score).fold(f32::NEG_INFINITY, f32::max);
            match select_top(units, 3, threshold) {
                Ranking::Selected(selection) => {
                    prop_assert!(best >= threshold);
                    prop_assert_eq!(selection.max_score(), Some(best));
                }
                Ranking::NoRelevantMatch => prop_assert!(best < threshold),
            }
        }

        #[test]
        fn reversed_input_gives_reversed_ties(units in arb_units()) {
            let mut reversed = units.clone();
            reversed.reverse();
            let forward = select_top(units, usize::MAX, f32::NEG_INFINITY);
            let backward = select_top(reversed, usize::MAX, f32::NEG_INFINITY);
            if let (Some(f), Some(b)) = (forward.selection(), backward.selection()) {
                let f_scores: Vec<f32> = f.units().iter().map(|u| u.score).collect();
                let b_scores: Vec<f32> = b.units().iter().map(|u| u.score).collect();
                prop_assert_eq!(f_scores, b_scores);

                let mut offset = 0;
                for group in f.units().chunk_by(|x, y| x.score == y.score) {
                    let forward_ids: Vec<&str> = group.iter().rev().map(|u| u.id.as_str()).collect();
                    let backward_ids: Vec<&str> =
                        b.units()[offset..offset + group.len()].iter().map(|u| u.id.as_str()).collect();
                    prop_assert_eq!(backward_ids, forward_ids);
                    offset += group.len();
                }
            }
        }
    }
}
