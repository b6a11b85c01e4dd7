//! Detection of high-scoring k-mers that have high-scoring horizontal neighbours.
//!
//! Everything here works on a single row of scores. [`crate::KmerGrid`] applies it row by row.

use std::ops::Range;

use crate::num::Score;

/// Minimal number of consecutive passing columns that form a span.
pub const MIN_SPAN: usize = 2;

/// Per-column flags: `score >= threshold`.
pub fn passing<S: Score>(scores: impl IntoIterator<Item = S>, threshold: S) -> Vec<bool> {
    scores.into_iter().map(|x| x >= threshold).collect()
}

/// Passing columns that have at least one passing horizontal neighbour, in column order.
///
/// Column 0 and the last column only have one neighbour each. A single-column row has none,
/// so its only column is never reported.
pub fn with_company(passes: &[bool]) -> impl Iterator<Item = usize> + '_ {
    (0..passes.len()).filter(move |&col| {
        passes[col]
            && ((col > 0 && passes[col - 1]) || (col + 1 < passes.len() && passes[col + 1]))
    })
}

/// Columns of `scores` that pass `threshold` together with at least one neighbour.
pub fn contiguous<S: Score>(scores: &[S], threshold: S) -> Vec<usize> {
    let passes = passing(scores.iter().copied(), threshold);
    with_company(&passes).collect()
}

/// Maximal half-open ranges of passing columns that are at least [`MIN_SPAN`] long.
///
/// Flattening the result gives exactly the columns reported by [`with_company`].
pub fn spans(passes: &[bool]) -> Vec<Range<usize>> {
    let mut result = Vec::new();

    // Single pass, `current` is the start of the open span
    let mut current = None;
    for (col, &pass) in passes.iter().enumerate() {
        current = match (current, pass) {
            (None, true) => Some(col),
            (Some(start), false) => {
                if col - start >= MIN_SPAN {
                    result.push(start..col);
                }
                None
            }
            (current, _) => current,
        };
    }

    if let Some(start) = current {
        if passes.len() - start >= MIN_SPAN {
            result.push(start..passes.len());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contiguous() {
        for (scores, threshold, expected) in [
            (vec![5.0, 5.0, 0.0, 5.0], 3.0, vec![0, 1]),
            (vec![5.0], 3.0, vec![]),
            (vec![5.0], f64::NEG_INFINITY, vec![]),
            (vec![5.0, 5.0], 3.0, vec![0, 1]),
            (vec![5.0, 0.0], 3.0, vec![]),
            (vec![0.0, 5.0], 3.0, vec![]),
            (vec![3.0, 3.0, 3.0], 3.0, vec![0, 1, 2]),
            (vec![0.0, 5.0, 5.0, 0.0], 3.0, vec![1, 2]),
            (vec![5.0, 0.0, 5.0, 0.0, 5.0], 3.0, vec![]),
            (vec![0.0, 0.0, 5.0, 5.0], 3.0, vec![2, 3]),
            (vec![5.0, 5.0, 0.0, 5.0, 5.0, 5.0], 3.0, vec![0, 1, 3, 4, 5]),
            (vec![1.0, 2.0, 3.0], f64::INFINITY, vec![]),
            (vec![1.0, 2.0, 3.0], f64::NEG_INFINITY, vec![0, 1, 2]),
            (vec![1.0, 2.0, 3.0], f64::NAN, vec![]),
            (vec![], 0.0, vec![]),
        ] {
            assert_eq!(
                contiguous(&scores, threshold),
                expected,
                "{scores:?} @ {threshold}"
            );
        }
    }

    #[test]
    fn test_spans() {
        for (passes, expected) in [
            (vec![], vec![]),
            (vec![true], vec![]),
            (vec![true, true], vec![0..2]),
            (vec![true, true, false, true], vec![0..2]),
            (vec![false, true, true, true], vec![1..4]),
            (vec![true, false, true, false, true], vec![]),
            (
                vec![true, true, false, false, true, true, true, false],
                vec![0..2, 4..7],
            ),
        ] {
            assert_eq!(spans(&passes), expected, "{passes:?}");

            let flat = spans(&passes).into_iter().flatten().collect::<Vec<_>>();
            assert_eq!(flat, with_company(&passes).collect::<Vec<_>>());
        }
    }
}
