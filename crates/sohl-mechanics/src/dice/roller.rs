//! The randomness seam.

use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::StdRng;

/// Source of die results.
///
/// Implemented for [`StdRng`] so a seeded generator gives reproducible
/// rolls (tie-breaks included), and by [`ScriptedRoller`] for exact
/// values.
pub trait Roller {
    /// Roll one die with the given number of sides, returning `1..=sides`.
    fn roll_die(&mut self, sides: u32) -> u32;
}

impl Roller for StdRng {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.random_range(1..=sides.max(1))
    }
}

/// A roller that replays a fixed sequence of results.
///
/// Values are clamped into `1..=sides`. Once the script runs out the
/// last value repeats.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRoller {
    values: VecDeque<u32>,
    last: Option<u32>,
}

impl ScriptedRoller {
    /// Create a roller that returns `values` in order.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            last: None,
        }
    }

    /// Number of scripted values not yet consumed.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl Roller for ScriptedRoller {
    fn roll_die(&mut self, sides: u32) -> u32 {
        let value = match self.values.pop_front() {
            Some(v) => v,
            None => {
                tracing::warn!(sides, "scripted roller exhausted, repeating last value");
                self.last.unwrap_or(1)
            }
        };
        self.last = Some(value);
        value.clamp(1, sides.max(1))
    }
}
