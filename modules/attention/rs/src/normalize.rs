use itertools::{Itertools, MinMaxResult};

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::num::Score;

/// Population over which z-score statistics are computed.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Standardization {
    /// The whole grid is a single pooled sample.
    #[default]
    Pooled,
    /// Each column (position) is standardized independently.
    PerColumn,
}

/// Standardize raw scores to zero mean and unit (population) variance.
///
/// Fails with [`Error::DegenerateInput`] if the grid is empty, contains non-finite values,
/// or if any population has zero variance. Large finite magnitudes are fine. With
/// [`Standardization::PerColumn`] a single constant column is enough to reject the whole grid,
/// which includes any one-row grid.
pub fn zscore<S: Score>(grid: &Grid<S>, standardization: Standardization) -> Result<Grid<S>> {
    if grid.is_empty() {
        return Err(Error::degenerate("cannot standardize an empty score grid"));
    }
    if let Some(ind) = grid.iter().position(|x| !x.is_finite()) {
        return Err(Error::degenerate(format!(
            "score at ({}, {}) is not finite",
            ind / grid.cols(),
            ind % grid.cols()
        )));
    }

    match standardization {
        Standardization::Pooled => {
            let moments = Moments::of(grid.iter().copied())
                .map_err(|reason| Error::degenerate(format!("pooled scores: {reason}")))?;
            log::debug!("Pooled z-score over {} values: {moments:?}", grid.len());
            Ok(grid.map(|x| moments.standardize(*x)))
        }
        Standardization::PerColumn => {
            let (rows, cols) = grid.shape();
            let stats = (0..cols)
                .map(|col| {
                    Moments::of(grid.iter_rows().map(|row| row[col]))
                        .map_err(|reason| Error::degenerate(format!("column {col}: {reason}")))
                })
                .collect::<Result<Vec<_>>>()?;
            log::debug!("Per-column z-score over {cols} columns of height {rows}");

            let data = grid
                .iter()
                .enumerate()
                .map(|(ind, x)| stats[ind % cols].standardize(*x))
                .collect();
            Grid::from_vec(rows, cols, data)
        }
    }
}

/// Population statistics of values divided by `scale`, the largest absolute value.
/// Scaling keeps sums and squared deviations finite for any finite input.
#[derive(Copy, Clone, PartialEq, Debug)]
struct Moments<S> {
    scale: S,
    mean: S,
    std: S,
}

impl<S: Score> Moments<S> {
    fn of(values: impl Iterator<Item = S> + Clone) -> std::result::Result<Self, &'static str> {
        // Exact check first: summation error may leave a tiny non-zero variance for constant input
        let scale = match values.clone().minmax() {
            MinMaxResult::MinMax(min, max) if min < max => min.abs().max(max.abs()),
            _ => return Err("all values are identical, the variance is zero"),
        };

        let n = S::from(values.clone().count())
            .ok_or("population size is not representable by the score type")?;
        let mean = values.clone().map(|x| x / scale).sum::<S>() / n;
        let variance = values.map(|x| (x / scale - mean).powi(2)).sum::<S>() / n;
        let std = variance.sqrt();

        if std > S::zero() && std.is_finite() {
            Ok(Self { scale, mean, std })
        } else {
            Err("the variance is below the precision of the score type")
        }
    }

    fn standardize(&self, x: S) -> S {
        (x / self.scale - self.mean) / self.std
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_standardized(values: impl Iterator<Item = f64> + Clone) {
        let n = values.clone().count() as f64;
        let mean = values.clone().sum::<f64>() / n;
        let std = (values.map(|x| (x - mean).powi(2)).sum::<f64>() / n).sqrt();
        assert!(mean.abs() < EPSILON, "mean = {mean}");
        assert!((std - 1.0).abs() < EPSILON, "std = {std}");
    }

    #[test]
    fn test_pooled_zscore() -> Result<()> {
        let grid = Grid::new(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])?;
        let normalized = zscore(&grid, Standardization::Pooled)?;
        assert_eq!(normalized.shape(), (2, 3));
        assert_standardized(normalized.iter().copied());

        // mean = 3.5, population variance = 35 / 12
        let std = (35.0f64 / 12.0).sqrt();
        for (raw, z) in grid.iter().zip(normalized.iter()) {
            assert!((z - (raw - 3.5) / std).abs() < EPSILON);
        }
        Ok(())
    }

    #[test]
    fn test_per_column_zscore() -> Result<()> {
        let grid = Grid::new(vec![
            vec![1.0, 10.0],
            vec![2.0, 20.0],
            vec![3.0, 60.0],
        ])?;
        let normalized = zscore(&grid, Standardization::PerColumn)?;
        for col in 0..2 {
            assert_standardized(normalized.iter_rows().map(|row| row[col]));
        }
        assert!((normalized[(0, 0)] + 1.5f64.sqrt()).abs() < EPSILON);
        assert!(normalized[(1, 0)].abs() < EPSILON);
        Ok(())
    }

    #[test]
    fn test_zscore_extreme_magnitudes() -> Result<()> {
        for (rows, standardization) in [
            (vec![vec![1e200, -1e200, 0.0]], Standardization::Pooled),
            (vec![vec![f64::MAX, -f64::MAX]], Standardization::Pooled),
            (vec![vec![f64::MAX], vec![f64::MAX / 2.0]], Standardization::PerColumn),
            (vec![vec![1e-300, 3e-300], vec![2e-300, 4e-300]], Standardization::Pooled),
        ] {
            let normalized = zscore(&Grid::new(rows)?, standardization)?;
            assert!(normalized.iter().all(|x| x.is_finite()));
            if standardization == Standardization::Pooled {
                assert_standardized(normalized.iter().copied());
            }
        }

        let grid = Grid::new(vec![vec![1e200, -1e200, 0.0]])?;
        let normalized = zscore(&grid, Standardization::Pooled)?;
        assert!((normalized[(0, 0)] - 1.5f64.sqrt()).abs() < EPSILON);
        assert!(normalized[(0, 2)].abs() < EPSILON);

        let grid = Grid::new(vec![vec![3e38f32, 1e38, 0.0]])?;
        let normalized = zscore(&grid, Standardization::Pooled)?;
        assert!(normalized.iter().all(|x| x.is_finite()));
        let mean = normalized.iter().sum::<f32>() / 3.0;
        let std = (normalized.iter().map(|x| (x - mean).powi(2)).sum::<f32>() / 3.0).sqrt();
        assert!(mean.abs() < 1e-5, "mean = {mean}");
        assert!((std - 1.0).abs() < 1e-5, "std = {std}");
        Ok(())
    }

    #[test]
    fn test_zscore_f32() -> Result<()> {
        let grid = Grid::new(vec![vec![0.5f32, 1.5], vec![2.5, 3.5]])?;
        let normalized = zscore(&grid, Standardization::Pooled)?;
        let mean = normalized.iter().sum::<f32>() / 4.0;
        assert!(mean.abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_degenerate_input() -> Result<()> {
        for (rows, standardization) in [
            (vec![vec![1.0, 1.0], vec![1.0, 1.0]], Standardization::Pooled),
            (vec![vec![0.1; 7]; 3], Standardization::Pooled),
            (vec![vec![42.0]], Standardization::Pooled),
            (vec![vec![1.0, 2.0, 3.0]], Standardization::PerColumn),
            (vec![vec![1.0, 5.0], vec![2.0, 5.0]], Standardization::PerColumn),
            (vec![vec![1.0, f64::NAN]], Standardization::Pooled),
            (vec![vec![f64::INFINITY, 1.0]], Standardization::PerColumn),
            (vec![vec![1.0, f64::NEG_INFINITY]], Standardization::Pooled),
            (vec![], Standardization::Pooled),
        ] {
            let grid = Grid::new(rows)?;
            let err = zscore(&grid, standardization).unwrap_err();
            assert!(matches!(err, Error::DegenerateInput { .. }), "{err}");
        }
        Ok(())
    }
}
