//! Random sources for rule rolls.
//!
//! Every roll in the rules goes through [`RandomSource`], so tests can swap
//! the seeded [`StdRng`] for a [`ScriptedRolls`] queue and force any branch.

use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::StdRng;

/// A uniform integer generator.
pub trait RandomSource {
    /// A uniform integer in `low..=high`. Returns `low` if the range is empty.
    fn roll(&mut self, low: u32, high: u32) -> u32;

    /// A uniform index in `0..len`, or `None` if `len` is zero.
    fn pick(&mut self, len: usize) -> Option<usize>;

    /// A percentile roll in `0..=100`.
    fn percentile(&mut self) -> u32 {
        self.roll(0, 100)
    }
}

impl RandomSource for StdRng {
    fn roll(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        self.random_range(low..=high)
    }

    fn pick(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.random_range(0..len))
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn roll(&mut self, low: u32, high: u32) -> u32 {
        (**self).roll(low, high)
    }

    fn pick(&mut self, len: usize) -> Option<usize> {
        (**self).pick(len)
    }
}

/// A deterministic source that replays a fixed list of values.
///
/// Rolls and picks share one queue and consume it in call order. Values
/// outside the requested range are clamped into it. Once the queue is
/// exhausted every roll returns the bottom of its range and every pick
/// returns index 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRolls {
    values: VecDeque<u32>,
    consumed: usize,
}

impl ScriptedRolls {
    /// Queue up the given values.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            consumed: 0,
        }
    }

    /// How many values have been drawn so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// How many values are still queued.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    fn next(&mut self) -> Option<u32> {
        let value = self.values.pop_front()?;
        self.consumed += 1;
        Some(value)
    }
}

impl RandomSource for ScriptedRolls {
    fn roll(&mut self, low: u32, high: u32) -> u32 {
        let high = high.max(low);
        self.next().map_or(low, |v| v.clamp(low, high))
    }

    fn pick(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let idx = self.next().map_or(0, |v| v as usize);
        Some(idx.min(len - 1))
    }
}
