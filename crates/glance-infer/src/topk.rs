use crate::{InferError, LabelTable};

/// One entry of a top-k result: resolved label plus raw score.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedLabel {
    pub label: String,
    pub score: f32,
}

/// Selects the k highest-scoring classes from a score vector.
///
/// Selection is a single scan keeping the current best k in order, so a
/// 1000-class vector costs 1000 comparisons plus a handful of shifts.
/// Scores come out non-increasing; equal scores rank the lower class
/// index first.
#[derive(Clone, Debug)]
pub struct TopKSelector {
    k: usize,
}

impl TopKSelector {
    pub fn new(k: usize) -> Self {
        Self { k }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// The k best (class index, score) pairs, best first.
    ///
    /// # Errors
    ///
    /// Returns `InferError::InvalidTopK` unless `0 < k <= scores.len()`.
    pub fn select_indices(&self, scores: &[f32]) -> Result<Vec<(usize, f32)>, InferError> {
        if self.k == 0 || self.k > scores.len() {
            return Err(InferError::InvalidTopK {
                k: self.k,
                len: scores.len(),
            });
        }

        let mut best: Vec<(usize, f32)> = Vec::with_capacity(self.k + 1);
        for (index, &score) in scores.iter().enumerate() {
            // Strict comparison keeps the earlier index ahead on ties
            let pos = best
                .iter()
                .position(|&(_, kept)| score > kept)
                .unwrap_or(best.len());
            if pos < self.k {
                best.insert(pos, (index, score));
                best.truncate(self.k);
            }
        }
        Ok(best)
    }

    /// Top-k entries with labels resolved from the table.
    ///
    /// # Errors
    ///
    /// In addition to the `select_indices` constraint, fails with
    /// `InferError::LabelIndex` when a selected class has no table entry.
    pub fn select(
        &self,
        scores: &[f32],
        labels: &LabelTable,
    ) -> Result<Vec<RankedLabel>, InferError> {
        self.select_indices(scores)?
            .into_iter()
            .map(|(index, score)| {
                labels.label_for(index).map(|label| RankedLabel {
                    label: label.to_string(),
                    score,
                })
            })
            .collect()
    }

    /// Like [`select`](Self::select), but a class missing from the table
    /// gets the placeholder `class <index>` instead of failing.
    pub fn select_lenient(
        &self,
        scores: &[f32],
        labels: &LabelTable,
    ) -> Result<Vec<RankedLabel>, InferError> {
        Ok(self
            .select_indices(scores)?
            .into_iter()
            .map(|(index, score)| RankedLabel {
                label: labels
                    .get(index)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("class {index}")),
                score,
            })
            .collect())
    }
}
