//! Held-out evaluation and non-finite value imputation

use crate::error::{Error, Result};
use crate::model::PricePredictor;
use crate::preprocessing::Sequences;
use crate::utils::{mae, mape, mse, r2_score, rmse};
use ndarray::Array1;
use tracing::{error, info, warn};

/// Replaces NaN and ±inf by the mean of the values that were finite
///
/// Returns how many values were replaced. An empty slice is left alone; a
/// non-empty slice without a single finite value is an error.
pub fn impute_non_finite(values: &mut [f64]) -> Result<usize> {
    let (sum, finite) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));

    let missing = values.len() - finite;
    if missing == 0 {
        return Ok(0);
    }
    if finite == 0 {
        return Err(Error::NoFiniteValues);
    }

    let mean = sum / finite as f64;
    values
        .iter_mut()
        .filter(|v| !v.is_finite())
        .for_each(|v| *v = mean);

    Ok(missing)
}

/// Predictions on held-out pairs and their error
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Model outputs, imputed
    pub predictions: Array1<f64>,
    /// True next prices, imputed
    pub targets: Array1<f64>,
    /// `None` when scoring failed
    pub mse: Option<f64>,
    pub rmse: Option<f64>,
    pub mae: Option<f64>,
    /// Percent; zero targets are skipped
    pub mape: Option<f64>,
    pub r2: Option<f64>,
}

/// Scores `model` on held-out pairs
///
/// Non-finite predictions and targets are replaced by the mean of the finite
/// values of their own array before scoring. A scoring failure is logged and
/// leaves the metrics empty; only prediction failures are returned as errors.
pub fn evaluate<P: PricePredictor>(model: &P, test: &Sequences) -> Result<Evaluation> {
    let mut predictions = model.predict(&test.windows)?;
    let mut targets = test.targets.clone();

    impute_logged(&mut predictions, "predictions");
    impute_logged(&mut targets, "targets");

    let mut evaluation = Evaluation {
        predictions,
        targets,
        mse: None,
        rmse: None,
        mae: None,
        mape: None,
        r2: None,
    };

    match mse(&evaluation.targets, &evaluation.predictions) {
        Ok(value) => {
            info!("Mean Squared Error: {}", value);
            evaluation.mse = Some(value);
            evaluation.rmse = rmse(&evaluation.targets, &evaluation.predictions).ok();
            evaluation.mae = mae(&evaluation.targets, &evaluation.predictions).ok();
            evaluation.mape = mape(&evaluation.targets, &evaluation.predictions).ok();
            evaluation.r2 = r2_score(&evaluation.targets, &evaluation.predictions).ok();
        }
        Err(e) => error!("Error calculating MSE: {}", e),
    }

    Ok(evaluation)
}

fn impute_logged(values: &mut Array1<f64>, what: &str) {
    let Some(slice) = values.as_slice_mut() else {
        return;
    };
    match impute_non_finite(slice) {
        Ok(0) => {}
        Ok(n) => warn!("Replaced {} non-finite {} with their mean", n, what),
        Err(e) => warn!("Could not impute {}: {}", what, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    /// Predicts the last price of each window, optionally poisoning one output
    struct LastValue {
        window: usize,
        poison: Option<usize>,
    }

    impl PricePredictor for LastValue {
        fn window_size(&self) -> usize {
            self.window
        }

        fn predict(&self, windows: &Array2<f64>) -> Result<Array1<f64>> {
            let mut out: Array1<f64> = windows.column(self.window - 1).to_owned();
            if let Some(i) = self.poison {
                out[i] = f64::NAN;
            }
            Ok(out)
        }
    }

    fn test_pairs() -> Sequences {
        Sequences::new(
            array![[1.0, 2.0], [2.0, 3.0], [3.0, 4.0]],
            array![3.0, 4.0, 5.0],
        )
    }

    #[test]
    fn test_impute_replaces_with_mean() {
        let mut values = vec![1.0, f64::NAN, 3.0, f64::INFINITY, f64::NEG_INFINITY];
        let replaced = impute_non_finite(&mut values).unwrap();

        assert_eq!(replaced, 3);
        assert_eq!(values, vec![1.0, 2.0, 3.0, 2.0, 2.0]);
        assert!(values.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_impute_noop() {
        let mut values = vec![1.0, 2.0];
        assert_eq!(impute_non_finite(&mut values).unwrap(), 0);
        assert_eq!(values, vec![1.0, 2.0]);

        let mut empty: Vec<f64> = vec![];
        assert_eq!(impute_non_finite(&mut empty).unwrap(), 0);
    }

    #[test]
    fn test_impute_all_non_finite() {
        let mut values = vec![f64::NAN, f64::INFINITY];
        assert!(matches!(
            impute_non_finite(&mut values),
            Err(Error::NoFiniteValues)
        ));
    }

    #[test]
    fn test_evaluate() {
        let model = LastValue { window: 2, poison: None };
        let eval = evaluate(&model, &test_pairs()).unwrap();

        assert_eq!(eval.predictions, array![2.0, 3.0, 4.0]);
        assert_eq!(eval.mse, Some(1.0));
        assert_eq!(eval.rmse, Some(1.0));
        assert_eq!(eval.mae, Some(1.0));
        // mean(1/3, 1/4, 1/5) in percent
        let expected = (1.0 / 3.0 + 0.25 + 0.2) / 3.0 * 100.0;
        assert!((eval.mape.unwrap() - expected).abs() < 1e-10);
    }

    #[test]
    fn test_evaluate_imputes_nan_predictions() {
        let model = LastValue { window: 2, poison: Some(1) };
        let eval = evaluate(&model, &test_pairs()).unwrap();

        // NaN replaced by mean(2.0, 4.0)
        assert_eq!(eval.predictions, array![2.0, 3.0, 4.0]);
        assert!(eval.mse.is_some());
    }

    #[test]
    fn test_scoring_failure_is_not_raised() {
        let model = LastValue { window: 2, poison: None };
        let mut test = test_pairs();
        test.targets.fill(f64::NAN);

        let eval = evaluate(&model, &test).unwrap();
        assert_eq!(eval.mse, None);
        assert_eq!(eval.mape, None);
        assert_eq!(eval.r2, None);
    }
}
