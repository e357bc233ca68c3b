//! Random implementations.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::infrastructure::ports::RandomPort;

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        rand::thread_rng().gen_range(min..=max)
    }

    fn gen_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Seeded random - the same seed replays the same dice, tie-breaks and ids.
pub struct SeededRandom {
    seed: u64,
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        // Poisoned lock: the generator state is still usable.
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut rng)
    }
}

impl RandomPort for SeededRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        self.with_rng(|rng| rng.gen_range(min..=max))
    }

    fn gen_uuid(&self) -> Uuid {
        let bytes: [u8; 16] = self.with_rng(|rng| rng.gen());
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }
}

/// Fixed random for testing.
#[cfg(test)]
pub struct FixedRandom(pub i32);

#[cfg(test)]
impl RandomPort for FixedRandom {
    fn gen_range(&self, _min: i32, _max: i32) -> i32 {
        self.0
    }

    fn gen_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Scripted random for testing: yields the given values in order, then
/// repeats the last one.
#[cfg(test)]
pub struct SequenceRandom {
    state: Mutex<(std::collections::VecDeque<i32>, i32)>,
}

#[cfg(test)]
impl SequenceRandom {
    pub fn new(values: impl IntoIterator<Item = i32>) -> Self {
        Self {
            state: Mutex::new((values.into_iter().collect(), 0)),
        }
    }
}

#[cfg(test)]
impl RandomPort for SequenceRandom {
    fn gen_range(&self, _min: i32, _max: i32) -> i32 {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let (values, last) = &mut *state;
        if let Some(value) = values.pop_front() {
            *last = value;
        }
        *last
    }

    fn gen_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_replays_same_values() {
        let a = SeededRandom::new(42);
        let b = SeededRandom::new(42);
        let rolls_a: Vec<i32> = (0..20).map(|_| a.gen_range(1, 10)).collect();
        let rolls_b: Vec<i32> = (0..20).map(|_| b.gen_range(1, 10)).collect();
        assert_eq!(rolls_a, rolls_b);
        assert_eq!(a.gen_uuid(), b.gen_uuid());
    }

    #[test]
    fn seeded_values_stay_in_range() {
        let random = SeededRandom::new(7);
        for _ in 0..500 {
            let value = random.gen_range(1, 10);
            assert!((1..=10).contains(&value));
        }
    }

    #[test]
    fn degenerate_range_returns_min() {
        assert_eq!(SystemRandom::new().gen_range(5, 5), 5);
        assert_eq!(SeededRandom::new(1).gen_range(9, 3), 9);
    }

    #[test]
    fn seeded_uuids_are_version_four() {
        let uuid = SeededRandom::new(3).gen_uuid();
        assert_eq!(uuid.get_version_num(), 4);
    }

    #[test]
    fn sequence_repeats_last_value() {
        let random = SequenceRandom::new([3, 8]);
        assert_eq!(random.gen_range(1, 10), 3);
        assert_eq!(random.gen_range(1, 10), 8);
        assert_eq!(random.gen_range(1, 10), 8);
    }
}
