use super::random::RandomSource;

/// Fisher-Yates shuffle of a copy of `items`. The input is left untouched.
pub fn shuffle_copy<T: Copy, R: RandomSource + ?Sized, const N: usize>(
    items: &[T; N],
    rng: &mut R,
) -> [T; N] {
    let mut shuffled = *items;
    for i in (1..N).rev() {
        let j = rng.next_index(i + 1);
        shuffled.swap(i, j);
    }
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::random::SequenceSource;
    use crate::test_utils::test_utils;
    use std::collections::HashMap;

    const INPUT: [u8; 4] = [1, 2, 3, 4];

    #[test]
    fn test_input_is_not_mutated() {
        let mut rng = test_utils::seeded_rng(1);
        let input = INPUT;
        for _ in 0..50 {
            let _ = shuffle_copy(&input, &mut rng);
        }
        assert_eq!(input, INPUT);
    }

    #[test]
    fn test_zero_draws_reverse_rotation() {
        // j = 0 at every step: swap(3,0), swap(2,0), swap(1,0)
        let mut source = SequenceSource::new(vec![0.0]);
        let shuffled = shuffle_copy(&INPUT, &mut source);
        assert_eq!(shuffled, [2, 3, 4, 1]);
        assert_eq!(source.draws(), 3);
    }

    #[test]
    fn test_top_draws_keep_order() {
        let mut source = SequenceSource::new(vec![0.999_999]);
        assert_eq!(shuffle_copy(&INPUT, &mut source), INPUT);
    }

    #[test]
    fn test_short_inputs() {
        let mut source = SequenceSource::new(vec![0.3]);
        let empty: [u8; 0] = [];
        assert_eq!(shuffle_copy(&empty, &mut source), empty);
        assert_eq!(shuffle_copy(&[9u8], &mut source), [9]);
        assert_eq!(source.draws(), 0);
    }

    #[test]
    fn test_permutations_are_uniform() {
        let mut rng = test_utils::seeded_rng(2024);
        let trials = 1000;
        let mut counts: HashMap<[u8; 4], usize> = HashMap::new();

        for _ in 0..trials {
            let shuffled = shuffle_copy(&INPUT, &mut rng);
            let mut sorted = shuffled;
            sorted.sort();
            assert_eq!(sorted, INPUT, "shuffle gained or lost a value: {:?}", shuffled);
            *counts.entry(shuffled).or_default() += 1;
        }

        assert_eq!(counts.len(), 24, "every permutation should appear");

        // Chi-square with 23 degrees of freedom; 49.7 is the p = 0.001 critical value
        let expected = trials as f64 / 24.0;
        let chi_square: f64 = counts
            .values()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum();
        assert!(chi_square < 49.7, "chi-square too large: {}", chi_square);
    }
}
