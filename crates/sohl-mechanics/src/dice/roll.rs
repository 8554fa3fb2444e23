//! Dice roll results and aggregation.

use serde::{Deserialize, Serialize};

use super::Die;

/// The result of rolling a single die.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    /// The type of die that was rolled.
    pub die: Die,
    /// The value rolled (1 to die.sides()).
    pub value: u32,
}

/// The result of rolling an entire dice pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Individual die results, in roll order.
    pub dice: Vec<DieResult>,
}

impl RollResult {
    /// Sum of all die values, saturating at `u32::MAX`.
    pub fn total(&self) -> u32 {
        self.dice
            .iter()
            .fold(0u32, |acc, d| acc.saturating_add(d.value))
    }

    /// Number of dice in the result.
    pub fn count(&self) -> usize {
        self.dice.len()
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.dice.iter().map(|d| d.value.to_string()).collect();
        write!(f, "[{}] = {}", values.join(", "), self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(die: Die, values: &[u32]) -> RollResult {
        RollResult {
            dice: values
                .iter()
                .map(|&value| DieResult { die, value })
                .collect(),
        }
    }

    #[test]
    fn total() {
        let r = make_result(Die::D6, &[4, 2, 6]);
        assert_eq!(r.total(), 12);
        assert_eq!(r.count(), 3);
    }

    #[test]
    fn empty_result() {
        let r = RollResult::default();
        assert_eq!(r.total(), 0);
        assert_eq!(r.to_string(), "[] = 0");
    }

    #[test]
    fn total_saturates() {
        let r = make_result(Die::Custom(u32::MAX), &[u32::MAX, 5]);
        assert_eq!(r.total(), u32::MAX);
    }

    #[test]
    fn display() {
        let r = make_result(Die::D6, &[3, 5]);
        assert_eq!(r.to_string(), "[3, 5] = 8");
    }
}
