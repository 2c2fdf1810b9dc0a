//! Uniform random draws from the question bank.

use rand::Rng;

/// Number of questions in a generated test.
pub const TEST_SIZE: usize = 30;

/// Shuffles `items` in place. Every permutation is equally likely given a
/// uniform `rng`.
pub fn shuffle<T, R>(items: &mut [T], rng: &mut R)
where
    R: Rng + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Returns the first `k` elements of a uniformly shuffled copy of `bank`.
///
/// `bank` is left untouched. When `k >= bank.len()` the whole bank comes back
/// shuffled.
#[must_use]
pub fn sample<T, R>(bank: &[T], k: usize, rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut drawn = bank.to_vec();
    shuffle(&mut drawn, rng);
    drawn.truncate(k);
    drawn
}

/// [`sample`] with the thread-local generator.
#[must_use]
pub fn draw_test<T: Clone>(bank: &[T], k: usize) -> Vec<T> {
    sample(bank, k, &mut rand::rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn draws_k_distinct_items_and_leaves_bank_alone() {
        let bank: Vec<u32> = (0..50).collect();
        let before = bank.clone();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let drawn = sample(&bank, TEST_SIZE, &mut rng);
            assert_eq!(drawn.len(), TEST_SIZE);
            let unique: HashSet<_> = drawn.iter().collect();
            assert_eq!(unique.len(), TEST_SIZE);
            assert!(drawn.iter().all(|q| bank.contains(q)));
        }
        assert_eq!(bank, before);
    }

    #[test]
    fn inclusion_frequency_is_k_over_n() {
        let bank: Vec<usize> = (0..50).collect();
        let mut rng = StdRng::seed_from_u64(2024);
        let trials = 20_000;
        let mut hits = vec![0_u32; bank.len()];

        for _ in 0..trials {
            for q in sample(&bank, TEST_SIZE, &mut rng) {
                hits[q] += 1;
            }
        }

        let expected = 30.0 / 50.0;
        for (q, count) in hits.iter().enumerate() {
            let freq = f64::from(*count) / f64::from(trials);
            assert!(
                (freq - expected).abs() < 0.03,
                "question {q} drawn with frequency {freq}"
            );
        }
    }

    #[test]
    fn all_permutations_equally_likely() {
        let mut rng = StdRng::seed_from_u64(99);
        let trials = 60_000;
        let mut seen: HashMap<Vec<char>, u32> = HashMap::new();

        for _ in 0..trials {
            let mut items = ['a', 'b', 'c'];
            shuffle(&mut items, &mut rng);
            *seen.entry(items.to_vec()).or_default() += 1;
        }

        assert_eq!(seen.len(), 6);
        for (perm, count) in seen {
            let freq = f64::from(count) / f64::from(trials);
            assert!((freq - 1.0 / 6.0).abs() < 0.01, "{perm:?} at {freq}");
        }
    }

    #[test]
    fn undersized_bank_returns_everything() {
        let bank = vec!["q1", "q2", "q3"];
        let drawn = draw_test(&bank, TEST_SIZE);
        assert_eq!(drawn.len(), 3);
        let mut sorted = drawn.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, bank);

        let empty: Vec<u8> = Vec::new();
        assert!(draw_test(&empty, TEST_SIZE).is_empty());
    }

    #[test]
    fn same_seed_same_draw() {
        let bank: Vec<u32> = (0..40).collect();
        let a = sample(&bank, 10, &mut StdRng::seed_from_u64(5));
        let b = sample(&bank, 10, &mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);
    }
}
