//! Train/test and train/validation splits of window pairs

use super::sequences::Sequences;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Randomly assigns `ceil(len * test_fraction)` pairs to the test set
///
/// The permutation is drawn from `seed`, so the same inputs always give the
/// same split. With `shuffle == false` the last pairs form the test set.
pub fn train_test_split(
    data: &Sequences,
    test_fraction: f64,
    shuffle: bool,
    seed: u64,
) -> (Sequences, Sequences) {
    let n = data.len();
    let n_test = ((n as f64) * test_fraction.clamp(0.0, 1.0)).ceil() as usize;
    let n_train = n - n_test.min(n);

    let mut indices: Vec<usize> = (0..n).collect();
    if shuffle {
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);
    }

    let (train_idx, test_idx) = indices.split_at(n_train);
    (data.select(train_idx), data.select(test_idx))
}

/// Keeps the first `floor(len * (1 - fraction))` pairs for fitting and holds
/// out the rest for validation
pub fn validation_split(data: &Sequences, fraction: f64) -> (Sequences, Sequences) {
    let split_at = ((data.len() as f64) * (1.0 - fraction.clamp(0.0, 1.0))).floor() as usize;
    data.split_at(split_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::create_sequences;

    fn sequences(n: usize) -> Sequences {
        let prices: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let (x, y) = create_sequences(&prices, 5);
        Sequences::new(x, y)
    }

    #[test]
    fn test_split_sizes() {
        let data = sequences(105); // 100 pairs
        let (train, test) = train_test_split(&data, 0.1, true, 42);

        assert_eq!(train.len(), 90);
        assert_eq!(test.len(), 10);
    }

    #[test]
    fn test_split_rounds_test_size_up() {
        let data = sequences(86); // 81 pairs
        let (train, test) = train_test_split(&data, 0.1, true, 42);

        assert_eq!(test.len(), 9);
        assert_eq!(train.len(), 72);
    }

    #[test]
    fn test_split_is_a_partition() {
        let data = sequences(55);
        let (train, test) = train_test_split(&data, 0.2, true, 7);

        let mut targets: Vec<f64> = train.targets.iter().chain(test.targets.iter()).copied().collect();
        targets.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(targets, data.targets.to_vec());
    }

    #[test]
    fn test_split_is_reproducible() {
        let data = sequences(60);
        let (a, _) = train_test_split(&data, 0.1, true, 42);
        let (b, _) = train_test_split(&data, 0.1, true, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_unshuffled_split_keeps_order() {
        let data = sequences(25); // 20 pairs
        let (train, test) = train_test_split(&data, 0.25, false, 0);

        assert_eq!(train.len(), 15);
        assert_eq!(test.targets[0], data.targets[15]);
    }

    #[test]
    fn test_validation_split() {
        let data = sequences(77); // 72 pairs
        let (train, val) = validation_split(&data, 0.1);

        // floor(72 * 0.9) = 64 kept, 8 held out
        assert_eq!(train.len(), 64);
        assert_eq!(val.len(), 8);
        assert_eq!(val.targets[0], data.targets[64]);

        let (train, val) = validation_split(&data, 0.0);
        assert_eq!(train.len(), 72);
        assert!(val.is_empty());
    }

    #[test]
    fn test_validation_split_rounds_held_out_up() {
        let data = sequences(25); // 20 pairs
        let (train, val) = validation_split(&data, 0.25);
        assert_eq!((train.len(), val.len()), (15, 5));

        let data = sequences(16); // 11 pairs
        let (train, val) = validation_split(&data, 0.1);
        assert_eq!((train.len(), val.len()), (9, 2));
    }
}
