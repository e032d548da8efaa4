use common::{FeatureError, FeatureMatrix, Result};
use nalgebra::{DVector, Dim, Matrix};

/// How the centering and scaling statistics are computed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalingMode {
    /// Per-column mean and standard deviation, a z-score transformation
    Standard,

    /// Per-column median and interquartile range, for data with outliers
    Robust,
}

/// Centering and scaling statistics fitted on a training matrix.
///
/// Immutable after the fit; applying it transforms any matrix with a matching
/// column count as `(X - center) / scale` with the fitted statistics, whether
/// that matrix is the training data, a held-out split or future predictions.
#[derive(Debug, Clone)]
pub struct ScalerState {
    center: DVector<f64>,
    scale: DVector<f64>,
    mode: ScalingMode,
}

impl ScalerState {
    /// Fit the per-column statistics of `x_train`.
    ///
    /// Columns with zero spread (constant columns, or a zero interquartile
    /// range in robust mode) get a scale of 1 so the division stays defined.
    pub fn fit(x_train: &FeatureMatrix, mode: ScalingMode) -> Self {
        let num_cols = x_train.ncols();
        let mut center: DVector<f64> =
            Matrix::from_element_generic(Dim::from_usize(num_cols), Dim::from_usize(1), 0.0);
        let mut scale: DVector<f64> =
            Matrix::from_element_generic(Dim::from_usize(num_cols), Dim::from_usize(1), 1.0);

        for j in 0..num_cols {
            let column: Vec<f64> = x_train.column(j).iter().cloned().collect();
            if column.is_empty() {
                continue;
            }
            let (c, s) = match mode {
                ScalingMode::Standard => {
                    let mean = column.iter().sum::<f64>() / column.len() as f64;
                    let var = column.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
                        / column.len() as f64;
                    (mean, var.sqrt())
                }
                ScalingMode::Robust => {
                    let median = percentile(&column, 50.0);
                    let iqr = percentile(&column, 75.0) - percentile(&column, 25.0);
                    (median, iqr)
                }
            };
            center[j] = c;
            scale[j] = if s == 0.0 { 1.0 } else { s };
        }

        debug!("fitted {:?} scaler over {} columns", mode, num_cols);
        Self {
            center,
            scale,
            mode,
        }
    }

    /// The fitted per-column centers
    pub fn center(&self) -> &DVector<f64> {
        &self.center
    }

    /// The fitted per-column scales
    pub fn scale(&self) -> &DVector<f64> {
        &self.scale
    }

    /// The mode the statistics were fitted with
    pub fn mode(&self) -> ScalingMode {
        self.mode
    }

    /// Transform `x` with the fitted statistics
    pub fn apply(&self, x: &FeatureMatrix) -> Result<FeatureMatrix> {
        if x.ncols() != self.center.len() {
            return Err(FeatureError::ShapeMismatch {
                what: "feature columns",
                expected: self.center.len(),
                got: x.ncols(),
            });
        }
        Ok(Matrix::from_fn_generic(
            Dim::from_usize(x.nrows()),
            Dim::from_usize(x.ncols()),
            |i, j| (x[(i, j)] - self.center[j]) / self.scale[j],
        ))
    }
}

/// Both halves of a train/test split, scaled with statistics fitted on the
/// training half only, plus the state itself for scaling future data.
#[derive(Debug, Clone)]
pub struct ScaledPair {
    /// The scaled training matrix
    pub train: FeatureMatrix,

    /// The scaled held-out matrix
    pub test: FeatureMatrix,

    /// The fitted statistics
    pub state: ScalerState,
}

/// Fit on `x_train` and apply the same fitted statistics to both matrices.
pub fn scale_pair(
    x_train: &FeatureMatrix,
    x_test: &FeatureMatrix,
    mode: ScalingMode,
) -> Result<ScaledPair> {
    let state = ScalerState::fit(x_train, mode);
    Ok(ScaledPair {
        train: state.apply(x_train)?,
        test: state.apply(x_test)?,
        state,
    })
}

/// Linearly interpolated percentile of an unsorted sample
fn percentile(values: &[f64], pct: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}

#[cfg(test)]
mod tests {
    use round::round;

    use super::*;

    fn matrix(num_rows: usize, num_cols: usize, values: Vec<f64>) -> FeatureMatrix {
        Matrix::from_vec_generic(Dim::from_usize(num_rows), Dim::from_usize(num_cols), values)
    }

    #[test]
    fn standard_scaling_zeroes_mean_and_unit_variance() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let x_train = matrix(4, 2, vec![1.0, 2.0, 3.0, 4.0, 10.0, 20.0, 30.0, 40.0]);
        let state = ScalerState::fit(&x_train, ScalingMode::Standard);
        let scaled = state.apply(&x_train).unwrap();

        for j in 0..scaled.ncols() {
            let mean = scaled.column(j).iter().sum::<f64>() / scaled.nrows() as f64;
            let var = scaled.column(j).iter().map(|v| (v - mean).powi(2)).sum::<f64>()
                / scaled.nrows() as f64;
            assert_eq!(round(mean, 9), 0.0);
            assert_eq!(round(var.sqrt(), 9), 1.0);
        }
    }

    #[test]
    fn constant_column_gets_unit_scale() {
        let x_train = matrix(3, 2, vec![5.0, 5.0, 5.0, 1.0, 2.0, 3.0]);
        let state = ScalerState::fit(&x_train, ScalingMode::Standard);

        assert_eq!(state.scale()[0], 1.0);
        // centered but not rescaled, so the constant column goes to zero
        let scaled = state.apply(&x_train).unwrap();
        for i in 0..3 {
            assert_eq!(scaled[(i, 0)], 0.0);
        }
    }

    #[test]
    fn robust_scaling_uses_median_and_iqr() {
        // median 3, quartiles 2 and 4, iqr 2
        let x_train = matrix(5, 1, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let state = ScalerState::fit(&x_train, ScalingMode::Robust);

        assert_eq!(state.center()[0], 3.0);
        assert_eq!(state.scale()[0], 2.0);
        assert_eq!(state.mode(), ScalingMode::Robust);

        let scaled = state.apply(&x_train).unwrap();
        assert_eq!(
            scaled.column(0).iter().cloned().collect::<Vec<f64>>(),
            vec![-1.0, -0.5, 0.0, 0.5, 1.0]
        );
    }

    #[test]
    fn robust_scaling_shrugs_off_an_outlier() {
        let x_train = matrix(5, 1, vec![1.0, 2.0, 3.0, 4.0, 1000.0]);
        let state = ScalerState::fit(&x_train, ScalingMode::Robust);

        // the outlier moves the mean far but the median barely
        assert_eq!(state.center()[0], 3.0);
    }

    #[test]
    fn test_split_never_influences_the_fit() {
        let x_train = matrix(4, 1, vec![1.0, 2.0, 3.0, 4.0]);
        let x_test_a = matrix(2, 1, vec![100.0, 200.0]);
        let x_test_b = matrix(2, 1, vec![-5.0, 0.5]);

        let a = scale_pair(&x_train, &x_test_a, ScalingMode::Standard).unwrap();
        let b = scale_pair(&x_train, &x_test_b, ScalingMode::Standard).unwrap();

        assert_eq!(a.state.center(), b.state.center());
        assert_eq!(a.state.scale(), b.state.scale());
        assert_eq!(a.train, b.train);
    }

    #[test]
    fn column_count_mismatch_is_an_error() {
        let x_train = matrix(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let state = ScalerState::fit(&x_train, ScalingMode::Standard);

        let narrow = matrix(3, 1, vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            state.apply(&narrow),
            Err(FeatureError::ShapeMismatch {
                what: "feature columns",
                expected: 2,
                got: 1
            })
        ));
    }
}
