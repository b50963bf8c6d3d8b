//! Top-N selection with deterministic ordering and threshold rejection.

use std::cmp::Ordering;

use crate::document::ScoredUnit;

/// Order two scores descending.
///
/// NaN ranks below every real score so the comparison stays total.
pub fn descending(a: f32, b: f32) -> Ordering {
    let key = |score: f32| if score.is_nan() { f32::NEG_INFINITY } else { score };
    key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal)
}

/// Sort units by score, highest first.
///
/// The sort is stable: units with exactly equal scores keep their original
/// relative order.
pub fn sort_descending(units: &mut [ScoredUnit]) {
    units.sort_by(|a, b| descending(a.score, b.score));
}

/// An ordered selection of at most N units, highest score first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankedSelection {
    units: Vec<ScoredUnit>,
}

impl RankedSelection {
    /// The selected units in rank order.
    pub fn units(&self) -> &[ScoredUnit] {
        &self.units
    }

    /// Consume the selection, returning its units.
    pub fn into_units(self) -> Vec<ScoredUnit> {
        self.units
    }

    /// The selected identifiers in rank order.
    pub fn ids(&self) -> Vec<String> {
        self.units.iter().map(|u| u.id.clone()).collect()
    }

    /// Number of selected units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns `true` if nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// The highest score, or `None` for an empty selection.
    pub fn max_score(&self) -> Option<f32> {
        self.units.first().map(|u| u.score)
    }

    /// Arithmetic mean of the selected scores, `0.0` when empty.
    pub fn mean_score(&self) -> f32 {
        if self.units.is_empty() {
            return 0.0;
        }
        self.units.iter().map(|u| u.score).sum::<f32>() / self.units.len() as f32
    }
}

/// The outcome of a selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Ranking {
    /// At least one unit reached the threshold.
    Selected(RankedSelection),
    /// Nothing was selected, or the best score fell below the threshold.
    NoRelevantMatch,
}

impl Ranking {
    /// The selection, if any.
    pub fn selection(&self) -> Option<&RankedSelection> {
        match self {
            Self::Selected(selection) => Some(selection),
            Self::NoRelevantMatch => None,
        }
    }
}

/// Select the `n` best units.
///
/// Units are stably sorted by score descending and truncated to `n`. The
/// result is [`Ranking::NoRelevantMatch`] when the selection is empty or its
/// best score is strictly below `threshold`; a best score equal to the
/// threshold is accepted.
pub fn select_top(units: impl IntoIterator<Item = ScoredUnit>, n: usize, threshold: f32) -> Ranking {
    let mut units: Vec<ScoredUnit> = units.into_iter().collect();
    sort_descending(&mut units);
    units.truncate(n);

    match units.first() {
        Some(best) if best.score >= threshold => Ranking::Selected(RankedSelection { units }),
        _ => Ranking::NoRelevantMatch,
    }
}
