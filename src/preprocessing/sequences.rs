//! Sliding windows over a price series

use crate::data::PriceSeries;
use ndarray::{s, Array1, Array2, Axis};

/// Splits a series into `(window, next value)` supervised pairs
///
/// For `N` prices and window `W` the result holds `max(N - W, 0)` pairs:
/// window `i` is `prices[i..i + W]`, target `i` is `prices[i + W]`.
/// A series no longer than the window yields empty arrays rather than an
/// error.
///
/// ```rust
/// use stock_rnn::preprocessing::create_sequences;
///
/// let (x, y) = create_sequences(&[1.0, 2.0, 3.0, 4.0], 2);
/// assert_eq!(x.nrows(), 2);
/// assert_eq!(y.to_vec(), vec![3.0, 4.0]);
/// ```
pub fn create_sequences(prices: &[f64], window_size: usize) -> (Array2<f64>, Array1<f64>) {
    let n_pairs = prices.len().saturating_sub(window_size);

    let mut x = Array2::zeros((n_pairs, window_size));
    let mut y = Array1::zeros(n_pairs);

    for i in 0..n_pairs {
        x.row_mut(i)
            .assign(&Array1::from(prices[i..i + window_size].to_vec()));
        y[i] = prices[i + window_size];
    }

    (x, y)
}

/// Window/target pairs kept together
#[derive(Debug, Clone, PartialEq)]
pub struct Sequences {
    /// `[pairs, window_size]`
    pub windows: Array2<f64>,
    /// `[pairs]`
    pub targets: Array1<f64>,
}

impl Sequences {
    pub fn new(windows: Array2<f64>, targets: Array1<f64>) -> Self {
        debug_assert_eq!(windows.nrows(), targets.len());
        Self { windows, targets }
    }

    /// Windows the adjusted closes of a series after dropping missing values
    pub fn from_series(series: &PriceSeries, window_size: usize) -> Self {
        let (windows, targets) = create_sequences(&series.adj_closes(), window_size);
        Self::new(windows, targets)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn window_size(&self) -> usize {
        self.windows.ncols()
    }

    /// Pairs at the given positions, in that order
    pub fn select(&self, indices: &[usize]) -> Self {
        Self::new(
            self.windows.select(Axis(0), indices),
            self.targets.select(Axis(0), indices),
        )
    }

    /// Splits into `[..at]` and `[at..]`
    pub fn split_at(&self, at: usize) -> (Self, Self) {
        let at = at.min(self.len());
        (
            Self::new(
                self.windows.slice(s![..at, ..]).to_owned(),
                self.targets.slice(s![..at]).to_owned(),
            ),
            Self::new(
                self.windows.slice(s![at.., ..]).to_owned(),
                self.targets.slice(s![at..]).to_owned(),
            ),
        )
    }
}
