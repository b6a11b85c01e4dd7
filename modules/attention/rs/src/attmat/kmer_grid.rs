use std::ops::Range;

use rayon::prelude::*;
use rayon::ThreadPool;

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::kmer::{KmerRecord, Label};
use crate::num::Score;
use crate::runs;

use super::builder::KmerGridBuilder;

/// Attention matrix over k-mers: one record per (sequence, position) coordinate.
///
/// Rows are sequences and columns are k-mer positions. Records are stored in a single
/// row-major arena and are never modified after construction.
#[derive(Clone, PartialEq, Debug)]
pub struct KmerGrid<S> {
    records: Vec<KmerRecord<S>>,
    rows: usize,
    cols: usize,
}

impl<S: Score> KmerGrid<S> {
    /// Standardize `scores` (pooled z-score) and attach them to `sequences`.
    pub fn build(scores: Grid<S>, sequences: Grid<String>) -> Result<Self> {
        Self::builder(scores, sequences).build()
    }

    pub fn builder(scores: Grid<S>, sequences: Grid<String>) -> KmerGridBuilder<S> {
        KmerGridBuilder::new(scores, sequences)
    }

    pub(crate) fn from_records(records: Vec<KmerRecord<S>>, rows: usize, cols: usize) -> Self {
        debug_assert!(rows > 0 && cols > 0 && records.len() == rows * cols);
        Self {
            records,
            rows,
            cols,
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false`: construction rejects empty inputs.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Result<&KmerRecord<S>> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::IndexOutOfRange {
                row,
                col,
                shape: self.shape(),
            });
        }
        Ok(&self.records[row * self.cols + col])
    }

    pub fn row(&self, row: usize) -> Result<&[KmerRecord<S>]> {
        if row >= self.rows {
            return Err(Error::IndexOutOfRange {
                row,
                col: 0,
                shape: self.shape(),
            });
        }
        Ok(&self.records[row * self.cols..(row + 1) * self.cols])
    }

    /// Records in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, KmerRecord<S>> {
        self.records.iter()
    }

    pub fn iter_rows(&self) -> std::slice::Chunks<'_, KmerRecord<S>> {
        self.records.chunks(self.cols)
    }

    /// Records with `score >= threshold`, row-major.
    pub fn filter_by_score(&self, threshold: S) -> Vec<&KmerRecord<S>> {
        self.records
            .iter()
            .filter(|x| *x.score() >= threshold)
            .collect()
    }

    /// Records whose k-mer literal is exactly `seq`, row-major.
    pub fn filter_by_sequence(&self, seq: &str) -> Vec<&KmerRecord<S>> {
        self.records.iter().filter(|x| x.seq() == seq).collect()
    }

    /// Records carrying `label`, row-major. Unlabeled records never match.
    pub fn filter_by_label(&self, label: Label) -> Vec<&KmerRecord<S>> {
        self.records
            .iter()
            .filter(|x| *x.label() == Some(label))
            .collect()
    }

    /// For every row: records with `score >= threshold` that have at least one horizontal
    /// neighbour also passing the threshold. The result is a flat list per row in column
    /// order, runs are not merged. Use [`KmerGrid::contiguous_spans`] for merged ranges.
    pub fn contiguous_runs(&self, threshold: S) -> Vec<Vec<&KmerRecord<S>>> {
        self.iter_rows()
            .map(|row| Self::row_runs(row, threshold))
            .collect()
    }

    /// Same as [`KmerGrid::contiguous_runs`], rows are processed in parallel on `pool`.
    pub fn par_contiguous_runs(
        &self,
        threshold: S,
        pool: &ThreadPool,
    ) -> Vec<Vec<&KmerRecord<S>>> {
        pool.install(|| {
            self.records
                .par_chunks(self.cols)
                .map(|row| Self::row_runs(row, threshold))
                .collect()
        })
    }

    /// For every row: maximal half-open column ranges where all scores pass `threshold`
    /// and that are at least [`runs::MIN_SPAN`] columns long.
    pub fn contiguous_spans(&self, threshold: S) -> Vec<Vec<Range<usize>>> {
        self.iter_rows()
            .map(|row| runs::spans(&runs::passing(row.iter().map(|x| *x.score()), threshold)))
            .collect()
    }

    fn row_runs(row: &[KmerRecord<S>], threshold: S) -> Vec<&KmerRecord<S>> {
        let passes = runs::passing(row.iter().map(|x| *x.score()), threshold);
        let hits: Vec<_> = runs::with_company(&passes).map(|col| &row[col]).collect();
        log::trace!(
            "Sequence {}: {} of {} k-mers in contiguous runs at threshold {threshold}",
            row[0].sequence_id(),
            hits.len(),
            row.len()
        );
        hits
    }
}

impl<'a, S> IntoIterator for &'a KmerGrid<S> {
    type Item = &'a KmerRecord<S>;
    type IntoIter = std::slice::Iter<'a, KmerRecord<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
