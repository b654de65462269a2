// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::error::ErrorKind;
use rand::seq::SliceRandom;
use rand::Rng;

/// Randomly partition `rows` into a train and a test subset.
///
/// The test subset holds `test_fraction` of the rows (rounded); everything
/// else goes to training. Pass a seeded RNG for a reproducible partition.
pub fn train_test_split<T, R>(
    mut rows: Vec<T>,
    test_fraction: f64,
    rng: &mut R,
) -> Result<(Vec<T>, Vec<T>), ErrorKind>
where
    R: Rng,
{
    if !(0.0..1.0).contains(&test_fraction) {
        return Err(ErrorKind::InvalidTestFraction(test_fraction));
    }

    rows.shuffle(rng);

    let test_len = (rows.len() as f64 * test_fraction).round() as usize;
    let test = rows.split_off(rows.len() - test_len);

    Ok((rows, test))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn split_counts_follow_the_fraction() -> Result<(), ErrorKind> {
        let rows: Vec<_> = (0..100).collect();
        let mut rng = StdRng::seed_from_u64(1);

        let (train, test) = train_test_split(rows, 0.2, &mut rng)?;
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(), 20);

        Ok(())
    }

    #[test]
    fn split_preserves_every_row() -> Result<(), ErrorKind> {
        let rows: Vec<_> = (0..57).collect();
        let mut rng = StdRng::seed_from_u64(2);

        let (train, test) = train_test_split(rows, 0.3, &mut rng)?;

        let mut merged: Vec<_> = train.into_iter().chain(test).collect();
        merged.sort_unstable();
        assert_eq!(merged, (0..57).collect::<Vec<_>>());

        Ok(())
    }

    #[test]
    fn seeded_splits_are_deterministic() -> Result<(), ErrorKind> {
        let rows: Vec<_> = (0..50).collect();

        let mut rng = StdRng::seed_from_u64(3);
        let first = train_test_split(rows.clone(), 0.2, &mut rng)?;

        let mut rng = StdRng::seed_from_u64(3);
        let second = train_test_split(rows, 0.2, &mut rng)?;

        assert_eq!(first, second);

        Ok(())
    }

    #[test]
    fn zero_fraction_keeps_everything_in_train() -> Result<(), ErrorKind> {
        let rows: Vec<_> = (0..10).collect();
        let mut rng = StdRng::seed_from_u64(4);

        let (train, test) = train_test_split(rows, 0.0, &mut rng)?;
        assert_eq!(train.len(), 10);
        assert!(test.is_empty());

        Ok(())
    }

    #[test]
    fn invalid_fraction_is_rejected() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!(train_test_split(vec![1, 2, 3], 1.0, &mut rng).is_err());
        assert!(train_test_split(vec![1, 2, 3], -0.1, &mut rng).is_err());
    }
}
