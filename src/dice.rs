//! Injected randomness: block values, target sums and block ids.

use crate::game::{BLOCK_VALUES, BlockId, TARGET_SUMS};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(test)]
use std::collections::VecDeque;

/// Source of the two random draws the game makes.
pub trait Dice {
    /// Uniform in `1..=9`.
    fn block_value(&mut self) -> u8;
    /// Uniform in `10..=24`.
    fn target_sum(&mut self) -> u32;
}

/// Unique id generator for blocks.
pub trait IdGen {
    fn next_id(&mut self) -> BlockId;
}

/// `rand`-backed dice; reproducible when built from a seed.
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: StdRng,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for SeededDice {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl Dice for SeededDice {
    fn block_value(&mut self) -> u8 {
        self.rng.random_range(BLOCK_VALUES)
    }

    fn target_sum(&mut self) -> u32 {
        self.rng.random_range(TARGET_SUMS)
    }
}

/// Replays fixed queues of values and targets. Once a queue runs dry it
/// keeps returning the lowest legal value.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    values: VecDeque<u8>,
    targets: VecDeque<u32>,
}

#[cfg(test)]
impl ScriptedDice {
    pub fn new(values: impl IntoIterator<Item = u8>, targets: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            targets: targets.into_iter().collect(),
        }
    }
}

#[cfg(test)]
impl Dice for ScriptedDice {
    fn block_value(&mut self) -> u8 {
        self.values
            .pop_front()
            .map(|v| v.clamp(*BLOCK_VALUES.start(), *BLOCK_VALUES.end()))
            .unwrap_or(*BLOCK_VALUES.start())
    }

    fn target_sum(&mut self) -> u32 {
        self.targets
            .pop_front()
            .map(|t| t.clamp(*TARGET_SUMS.start(), *TARGET_SUMS.end()))
            .unwrap_or(*TARGET_SUMS.start())
    }
}

/// Hands out 1, 2, 3, ... for the lifetime of the generator.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: u64,
}

impl IdGen for SequentialIds {
    fn next_id(&mut self) -> BlockId {
        self.next += 1;
        BlockId(self.next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_dice_stay_in_range() {
        let mut dice = SeededDice::new(7);
        for _ in 0..500 {
            assert!(BLOCK_VALUES.contains(&dice.block_value()));
            assert!(TARGET_SUMS.contains(&dice.target_sum()));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SeededDice::new(42);
        let mut b = SeededDice::new(42);
        let xs: Vec<u8> = (0..32).map(|_| a.block_value()).collect();
        let ys: Vec<u8> = (0..32).map(|_| b.block_value()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn scripted_dice_replay_then_fall_back() {
        let mut dice = ScriptedDice::new([5, 3, 12], [17]);
        assert_eq!(dice.block_value(), 5);
        assert_eq!(dice.block_value(), 3);
        assert_eq!(dice.block_value(), 9);
        assert_eq!(dice.block_value(), 1);
        assert_eq!(dice.target_sum(), 17);
        assert_eq!(dice.target_sum(), 10);
    }

    #[test]
    fn sequential_ids_never_repeat() {
        let mut ids = SequentialIds::default();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert!(b > a);
    }
}
