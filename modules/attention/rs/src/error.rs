use derive_more::{Display, Error};

/// Failures surfaced by grid construction, normalization and lookups.
/// Nothing is retried or patched up: a failed call never yields a partial grid.
#[derive(Clone, PartialEq, Eq, Debug, Display, Error)]
pub enum Error {
    /// Input grids disagree in shape, are ragged, or are empty.
    #[display("Shape mismatch: {reason}")]
    ShapeMismatch { reason: String },

    /// The score population cannot be standardized (zero variance or non-finite values).
    #[display("Degenerate input: {reason}")]
    DegenerateInput { reason: String },

    /// Lookup outside the grid bounds.
    #[display("Index ({row}, {col}) is out of range for a grid of shape {shape:?}")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        shape: (usize, usize),
    },

    /// A k-mer literal that can't be attached to the grid (e.g. an empty string).
    #[display("Invalid k-mer at ({row}, {col}): {reason}")]
    InvalidKmer {
        row: usize,
        col: usize,
        reason: &'static str,
    },

    /// Label value other than 0 or 1.
    #[display("Invalid label {value}, expected 0 (unstable) or 1 (stable)")]
    InvalidLabel { value: u8 },
}

impl Error {
    pub(crate) fn shape_mismatch(reason: impl Into<String>) -> Self {
        Error::ShapeMismatch {
            reason: reason.into(),
        }
    }

    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Error::DegenerateInput {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
