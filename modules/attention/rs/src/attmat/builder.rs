use itertools::izip;

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::kmer::{KmerRecord, Label};
use crate::normalize::{zscore, Standardization};
use crate::num::Score;

use super::kmer_grid::KmerGrid;

/// Collects the inputs of a [`KmerGrid`] and validates all of them in [`KmerGridBuilder::build`].
#[derive(Clone, PartialEq, Debug)]
pub struct KmerGridBuilder<S> {
    scores: Grid<S>,
    sequences: Grid<String>,
    // Kept raw so that label values are validated after shapes, in `build`
    labels: Option<Grid<u8>>,
    standardization: Standardization,
}

impl<S: Score> KmerGridBuilder<S> {
    pub fn new(scores: Grid<S>, sequences: Grid<String>) -> Self {
        Self {
            scores,
            sequences,
            labels: None,
            standardization: Standardization::default(),
        }
    }

    pub fn with_labels(self, labels: Grid<Label>) -> Self {
        self.with_raw_labels(labels.map(|x| u8::from(*x)))
    }

    /// Attach labels given as 0 (unstable) / 1 (stable) integers.
    /// Values are checked in [`KmerGridBuilder::build`], after all shapes.
    pub fn with_raw_labels(mut self, labels: Grid<u8>) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn with_standardization(mut self, standardization: Standardization) -> Self {
        self.standardization = standardization;
        self
    }

    pub fn build(self) -> Result<KmerGrid<S>> {
        let (rows, cols) = self.scores.shape();
        if rows == 0 || cols == 0 {
            return Err(Error::shape_mismatch(format!(
                "score grid must not be empty, got {rows}x{cols}"
            )));
        }
        if self.sequences.shape() != (rows, cols) {
            return Err(Error::shape_mismatch(format!(
                "sequence grid is {:?}, score grid is {:?}",
                self.sequences.shape(),
                (rows, cols)
            )));
        }
        if let Some(labels) = &self.labels {
            if labels.shape() != (rows, cols) {
                return Err(Error::shape_mismatch(format!(
                    "label grid is {:?}, score grid is {:?}",
                    labels.shape(),
                    (rows, cols)
                )));
            }
        }
        let labels: Vec<Option<Label>> = match self.labels {
            Some(labels) => labels
                .into_vec()
                .into_iter()
                .map(|x| Label::try_from(x).map(Some))
                .collect::<Result<_>>()?,
            None => vec![None; rows * cols],
        };
        if let Some(ind) = self.sequences.iter().position(String::is_empty) {
            return Err(Error::InvalidKmer {
                row: ind / cols,
                col: ind % cols,
                reason: "k-mer sequence must not be empty",
            });
        }

        let normalized = zscore(&self.scores, self.standardization)?;

        let records = izip!(normalized.into_vec(), self.sequences.into_vec(), labels)
            .enumerate()
            .map(|(ind, (score, seq, label))| {
                KmerRecord::new(ind / cols, ind % cols, score, seq, label)
            })
            .collect();

        log::debug!(
            "Built k-mer grid: {rows} sequences x {cols} positions, {:?} standardization",
            self.standardization
        );
        Ok(KmerGrid::from_records(records, rows, cols))
    }
}
