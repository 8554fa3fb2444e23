//! Dice types, pools, and the roller seam.
//!
//! Percentile tests roll a single d100; impact rolls use pools of
//! polyhedral dice. All randomness flows through the [`Roller`] trait so
//! callers can inject a seeded RNG or a fixed script.

pub mod pool;
pub mod roll;
pub mod roller;

pub use pool::DicePool;
pub use roll::{DieResult, RollResult};
pub use roller::{Roller, ScriptedRoller};

use serde::{Deserialize, Serialize};

/// A polyhedral die type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Die {
    /// Four-sided die.
    D4,
    /// Six-sided die.
    D6,
    /// Eight-sided die.
    D8,
    /// Ten-sided die.
    D10,
    /// Twelve-sided die.
    D12,
    /// Percentile die (1-100).
    D100,
    /// A die with any other number of sides.
    Custom(u32),
}

impl Die {
    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D100 => 100,
            Self::Custom(n) => n,
        }
    }

    /// Die for a side count, preferring the named variants.
    ///
    /// Returns `None` for fewer than two sides; a zero-sided impact die
    /// means "no dice" and never reaches a pool.
    pub fn from_sides(sides: u32) -> Option<Self> {
        match sides {
            0 | 1 => None,
            4 => Some(Self::D4),
            6 => Some(Self::D6),
            8 => Some(Self::D8),
            10 => Some(Self::D10),
            12 => Some(Self::D12),
            100 => Some(Self::D100),
            n => Some(Self::Custom(n)),
        }
    }

    /// Parse a die from a string like "d6", "D12", "d100".
    pub fn from_str_tag(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        let sides = s.strip_prefix('d')?.parse::<u32>().ok()?;
        Self::from_sides(sides)
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn die_sides() {
        assert_eq!(Die::D4.sides(), 4);
        assert_eq!(Die::D6.sides(), 6);
        assert_eq!(Die::D12.sides(), 12);
        assert_eq!(Die::D100.sides(), 100);
        assert_eq!(Die::Custom(20).sides(), 20);
    }

    #[test]
    fn from_sides_prefers_named_dice() {
        assert_eq!(Die::from_sides(6), Some(Die::D6));
        assert_eq!(Die::from_sides(100), Some(Die::D100));
        assert_eq!(Die::from_sides(20), Some(Die::Custom(20)));
        assert_eq!(Die::from_sides(0), None);
        assert_eq!(Die::from_sides(1), None);
    }

    #[test]
    fn die_from_str() {
        assert_eq!(Die::from_str_tag("d8"), Some(Die::D8));
        assert_eq!(Die::from_str_tag("D10"), Some(Die::D10));
        assert_eq!(Die::from_str_tag("d30"), Some(Die::Custom(30)));
        assert_eq!(Die::from_str_tag("d1"), None);
        assert_eq!(Die::from_str_tag("six"), None);
    }

    #[test]
    fn die_display() {
        assert_eq!(Die::D6.to_string(), "d6");
        assert_eq!(Die::D100.to_string(), "d100");
        assert_eq!(Die::Custom(30).to_string(), "d30");
    }
}
