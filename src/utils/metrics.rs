//! Regression error metrics

use crate::error::{Error, Result};
use ndarray::Array1;

fn check_shapes(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(Error::Metric(format!(
            "found input arrays with inconsistent lengths: [{}, {}]",
            y_true.len(),
            y_pred.len()
        )));
    }
    if y_true.is_empty() {
        return Err(Error::Metric("cannot score empty arrays".to_string()));
    }
    Ok(())
}

/// Mean Squared Error
///
/// Fails on length mismatch, empty input or non-finite values.
pub fn mse(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
    check_shapes(y_true, y_pred)?;
    if y_true.iter().chain(y_pred.iter()).any(|v| !v.is_finite()) {
        return Err(Error::Metric("input contains NaN or infinity".to_string()));
    }

    let diff = y_true - y_pred;
    Ok(diff.mapv(|x| x * x).mean().unwrap_or(0.0))
}

/// Root Mean Squared Error
pub fn rmse(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
    mse(y_true, y_pred).map(f64::sqrt)
}

/// Mean Absolute Error
pub fn mae(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
    check_shapes(y_true, y_pred)?;
    let diff = y_true - y_pred;
    Ok(diff.mapv(f64::abs).mean().unwrap_or(0.0))
}

/// Mean Absolute Percentage Error, in percent; zero targets are skipped
pub fn mape(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
    check_shapes(y_true, y_pred)?;

    let (sum, n) = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, _)| **t != 0.0)
        .fold((0.0, 0usize), |(sum, n), (t, p)| (sum + ((t - p) / t).abs(), n + 1));

    Ok(if n == 0 { 0.0 } else { sum / n as f64 * 100.0 })
}

/// Coefficient of determination
pub fn r2_score(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
    check_shapes(y_true, y_pred)?;
    let mean = y_true.mean().unwrap_or(0.0);

    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    let ss_tot: f64 = y_true.iter().map(|t| (t - mean).powi(2)).sum();

    Ok(if ss_tot == 0.0 { 0.0 } else { 1.0 - ss_res / ss_tot })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_mse() {
        let y_true = array![1.0, 2.0, 3.0];
        let y_pred = array![1.1, 2.0, 2.9];

        let error = mse(&y_true, &y_pred).unwrap();
        assert!((error - 0.006666666666666667).abs() < 1e-10);
        assert!((rmse(&y_true, &y_pred).unwrap() - error.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_mse_shape_mismatch() {
        let err = mse(&array![1.0, 2.0], &array![1.0]).unwrap_err();
        assert!(matches!(err, Error::Metric(_)));
    }

    #[test]
    fn test_mse_rejects_nan() {
        assert!(mse(&array![1.0, f64::NAN], &array![1.0, 2.0]).is_err());
        assert!(mse(&Array1::zeros(0), &Array1::zeros(0)).is_err());
    }

    #[test]
    fn test_mae_and_mape() {
        let y_true = array![100.0, 200.0, 0.0];
        let y_pred = array![110.0, 190.0, 5.0];

        assert!((mae(&y_true, &y_pred).unwrap() - 25.0 / 3.0).abs() < 1e-10);
        // (10% + 5%) / 2, the zero target is skipped
        assert!((mape(&y_true, &y_pred).unwrap() - 7.5).abs() < 1e-10);
    }

    #[test]
    fn test_r2_score() {
        let y_true = array![1.0, 2.0, 3.0, 4.0, 5.0];
        let y_pred = array![1.1, 2.1, 2.9, 4.0, 5.1];

        let r2 = r2_score(&y_true, &y_pred).unwrap();
        assert!(r2 > 0.95);
        assert_eq!(r2_score(&array![2.0, 2.0], &array![1.0, 3.0]).unwrap(), 0.0);
    }
}
