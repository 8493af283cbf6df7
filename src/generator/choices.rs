use rand::Rng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

pub const CHOICE_COUNT: usize = 4;

/// Initial distractor offset range, `[-BASE_SPREAD, BASE_SPREAD] \ {0}`.
const BASE_SPREAD: i64 = 10;
const ATTEMPTS_PER_SPREAD: usize = 32;
const MAX_WIDENINGS: usize = 4;

/// Build four distinct positive choices containing `correct`, in random order.
///
/// Offsets are sampled around the product; when collisions keep rejecting
/// candidates the range doubles, and after `MAX_WIDENINGS` the remaining slots
/// are filled with the next free values above the product. Every loop is bounded.
pub fn build_choices(correct: u32, rng: &mut SmallRng) -> [u32; CHOICE_COUNT] {
    let correct = correct.max(1);
    let mut values: Vec<u32> = Vec::with_capacity(CHOICE_COUNT);
    values.push(correct);

    let mut spread = BASE_SPREAD;
    'widen: for _ in 0..=MAX_WIDENINGS {
        for _ in 0..ATTEMPTS_PER_SPREAD {
            let magnitude = rng.gen_range(1..=spread);
            let offset = if rng.gen_bool(0.5) { magnitude } else { -magnitude };
            let candidate = correct as i64 + offset;
            if candidate > 0 && candidate <= u32::MAX as i64 {
                let candidate = candidate as u32;
                if !values.contains(&candidate) {
                    values.push(candidate);
                }
            }
            if values.len() == CHOICE_COUNT {
                break 'widen;
            }
        }
        spread *= 2;
    }

    let mut next = correct;
    while values.len() < CHOICE_COUNT {
        next = next.wrapping_add(1).max(1);
        if !values.contains(&next) {
            values.push(next);
        }
    }

    values.shuffle(rng);
    [values[0], values[1], values[2], values[3]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn assert_valid(choices: &[u32; CHOICE_COUNT], correct: u32) {
        assert!(choices.contains(&correct), "{choices:?} missing {correct}");
        for (i, a) in choices.iter().enumerate() {
            assert!(*a > 0, "non-positive choice in {choices:?}");
            for b in &choices[i + 1..] {
                assert_ne!(a, b, "duplicate choice in {choices:?}");
            }
        }
    }

    #[test]
    fn test_choices_valid_for_every_product() {
        let mut rng = SmallRng::seed_from_u64(7);
        for a in 1..=10 {
            for b in 1..=10 {
                let choices = build_choices(a * b, &mut rng);
                assert_valid(&choices, a * b);
            }
        }
    }

    #[test]
    fn test_small_products_still_get_positive_distractors() {
        for seed in 0..200 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let choices = build_choices(1, &mut rng);
            assert_valid(&choices, 1);
        }
    }

    #[test]
    fn test_distractors_stay_near_product() {
        let mut rng = SmallRng::seed_from_u64(99);
        for _ in 0..100 {
            let choices = build_choices(50, &mut rng);
            for c in choices {
                assert!((40..=60).contains(&c), "{c} outside base spread");
            }
        }
    }

    #[test]
    fn test_correct_answer_position_varies() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut positions = [0usize; CHOICE_COUNT];
        for _ in 0..400 {
            let choices = build_choices(42, &mut rng);
            let pos = choices.iter().position(|&c| c == 42).unwrap();
            positions[pos] += 1;
        }
        assert!(positions.iter().all(|&n| n > 0), "positions: {positions:?}");
    }

    #[test]
    fn test_same_seed_same_choices() {
        let mut a = SmallRng::seed_from_u64(11);
        let mut b = SmallRng::seed_from_u64(11);
        assert_eq!(build_choices(36, &mut a), build_choices(36, &mut b));
    }
}
