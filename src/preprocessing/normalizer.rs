//! Min-max scaling of prices

use serde::{Deserialize, Serialize};

/// Maps prices into `[0, 1]` using the range seen during `fit`
///
/// A single range is shared by windows and targets since both are the same
/// quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    min: f64,
    max: f64,
}

impl MinMaxScaler {
    /// Fits on the finite values; `None` if there are none
    pub fn fit<'a, I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a f64>,
    {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        (min <= max).then_some(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    fn range(&self) -> f64 {
        let range = self.max - self.min;
        if range.abs() < 1e-12 {
            1.0
        } else {
            range
        }
    }

    pub fn transform(&self, value: f64) -> f64 {
        (value - self.min) / self.range()
    }

    pub fn inverse_transform(&self, scaled: f64) -> f64 {
        scaled * self.range() + self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_transform() {
        let data = [10.0, 20.0, f64::NAN, 15.0];
        let scaler = MinMaxScaler::fit(&data).unwrap();

        assert_eq!(scaler.min(), 10.0);
        assert_eq!(scaler.max(), 20.0);
        assert_eq!(scaler.transform(10.0), 0.0);
        assert_eq!(scaler.transform(20.0), 1.0);
        assert_eq!(scaler.transform(15.0), 0.5);
        assert_eq!(scaler.inverse_transform(0.5), 15.0);
    }

    #[test]
    fn test_constant_series() {
        let scaler = MinMaxScaler::fit(&[5.0, 5.0]).unwrap();
        assert_eq!(scaler.transform(5.0), 0.0);
        assert_eq!(scaler.inverse_transform(0.0), 5.0);
    }

    #[test]
    fn test_no_finite_values() {
        assert!(MinMaxScaler::fit(&[f64::NAN, f64::INFINITY]).is_none());
        assert!(MinMaxScaler::fit(std::iter::empty::<&f64>()).is_none());
    }
}
