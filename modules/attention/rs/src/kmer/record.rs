use std::fmt::{self, Display, Formatter};

use derive_getters::{Dissolve, Getters};

use super::label::Label;

/// A single attention observation: the k-mer at `position` of sequence `sequence_id`.
///
/// Records are created by [`crate::KmerGrid`] construction only and are immutable afterwards.
#[derive(Clone, PartialEq, Debug, Dissolve, Getters)]
pub struct KmerRecord<S> {
    sequence_id: usize,
    position: usize,
    score: S,
    seq: String,
    label: Option<Label>,
}

impl<S> KmerRecord<S> {
    pub(crate) fn new(
        sequence_id: usize,
        position: usize,
        score: S,
        seq: String,
        label: Option<Label>,
    ) -> Self {
        Self {
            sequence_id,
            position,
            score,
            seq,
            label,
        }
    }

    /// Length of the k-mer literal.
    pub fn k(&self) -> usize {
        self.seq.len()
    }
}

impl<S: Display> Display for KmerRecord<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sequence ID: {}, Sequence: {}, Position: {}, Score: {}",
            self.sequence_id, self.seq, self.position, self.score
        )?;
        if let Some(label) = self.label {
            write!(f, ", Label: {label}")?;
        }
        Ok(())
    }
}
