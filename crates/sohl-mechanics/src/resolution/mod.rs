//! Test resolution: success tests, opposed tests, and impact rolls.
//!
//! A [`SuccessTest`] rolls d100 against a mastery-level snapshot and
//! classifies the roll into a [`SuccessLevel`]. An [`OpposedTest`]
//! compares two evaluated tests. An [`ImpactResult`] rolls the dice of an
//! impact ledger.

pub mod impact;
pub mod opposed;
pub mod success;

pub use impact::ImpactResult;
pub use opposed::{OpposedTest, Side};
pub use success::{SuccessTest, TestState, classify};

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SohlError;
use crate::ledger::MasteryLevelLedger;

/// Classified outcome of a success test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuccessLevel {
    /// Failed, and the roll ended in a critical failure digit.
    CriticalFailure = -1,
    /// Failed.
    MarginalFailure = 0,
    /// Succeeded.
    MarginalSuccess = 1,
    /// Succeeded, and the roll ended in a critical success digit.
    CriticalSuccess = 2,
}

impl SuccessLevel {
    /// Numeric value: -1, 0, 1 or 2.
    pub fn value(self) -> i32 {
        self as i32
    }

    /// Level for a numeric value.
    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            -1 => Some(Self::CriticalFailure),
            0 => Some(Self::MarginalFailure),
            1 => Some(Self::MarginalSuccess),
            2 => Some(Self::CriticalSuccess),
            _ => None,
        }
    }

    /// Returns true for marginal and critical success.
    pub fn is_success(self) -> bool {
        self.value() >= Self::MarginalSuccess.value()
    }

    /// Returns true for critical success and critical failure.
    pub fn is_critical(self) -> bool {
        matches!(self, Self::CriticalFailure | Self::CriticalSuccess)
    }

    /// Apply a success level modifier.
    ///
    /// Critical levels are unchanged. Marginal levels move by `by` but
    /// stay within the marginal band.
    pub fn shifted(self, by: i32) -> Self {
        if self.is_critical() {
            return self;
        }
        if self.value() + by >= Self::MarginalSuccess.value() {
            Self::MarginalSuccess
        } else {
            Self::MarginalFailure
        }
    }

    /// Display label, e.g. "Critical Success".
    pub fn label(self) -> &'static str {
        match self {
            Self::CriticalFailure => "Critical Failure",
            Self::MarginalFailure => "Marginal Failure",
            Self::MarginalSuccess => "Marginal Success",
            Self::CriticalSuccess => "Critical Success",
        }
    }
}

impl std::fmt::Display for SuccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The category of a test.
///
/// Skill and dodge tests break ties in opposed resolution by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    /// A generic success test.
    #[default]
    Success,
    /// A skill test.
    Skill,
    /// An attribute test.
    Attribute,
    /// A dodge defense.
    Dodge,
    /// A block defense.
    Block,
    /// A counterstrike defense.
    Counterstrike,
    /// A shock test after injury.
    Shock,
    /// A stumble test.
    Stumble,
    /// A fumble test.
    Fumble,
    /// A morale test.
    Morale,
    /// A fear test.
    Fear,
    /// A fate test.
    Fate,
}

impl TestKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Success,
        Self::Skill,
        Self::Attribute,
        Self::Dodge,
        Self::Block,
        Self::Counterstrike,
        Self::Shock,
        Self::Stumble,
        Self::Fumble,
        Self::Morale,
        Self::Fear,
        Self::Fate,
    ];

    /// Lowercase identifier.
    pub fn id(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Skill => "skill",
            Self::Attribute => "attribute",
            Self::Dodge => "dodge",
            Self::Block => "block",
            Self::Counterstrike => "counterstrike",
            Self::Shock => "shock",
            Self::Stumble => "stumble",
            Self::Fumble => "fumble",
            Self::Morale => "morale",
            Self::Fear => "fear",
            Self::Fate => "fate",
        }
    }

    /// Default title for a test of this kind, e.g. "Skill Test".
    pub fn title(self) -> String {
        let id = self.id();
        let mut chars = id.chars();
        let capitalized: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        format!("{capitalized} Test")
    }

    /// Whether opposed tests against this kind always break ties.
    pub fn breaks_ties_by_default(self) -> bool {
        matches!(self, Self::Skill | Self::Dodge)
    }
}

impl std::fmt::Display for TestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for TestKind {
    type Err = SohlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.id() == needle)
            .ok_or_else(|| SohlError::InvalidConfig(format!("unknown test kind '{s}'")))
    }
}

/// Who may see a roll. Carried through unchanged for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollMode {
    /// Everyone sees the roll.
    #[default]
    Public,
    /// Only the game master and the roller.
    GmOnly,
    /// Only the game master; the roller does not see it.
    Blind,
    /// Only the roller.
    SelfOnly,
}

impl FromStr for RollMode {
    type Err = SohlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "gm" | "gm-only" | "gmonly" => Ok(Self::GmOnly),
            "blind" => Ok(Self::Blind),
            "self" => Ok(Self::SelfOnly),
            other => Err(SohlError::InvalidConfig(format!("unknown roll mode '{other}'"))),
        }
    }
}

impl std::fmt::Display for RollMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::GmOnly => write!(f, "gm"),
            Self::Blind => write!(f, "blind"),
            Self::SelfOnly => write!(f, "self"),
        }
    }
}

/// Input collected before a test is rolled (the situational dialog).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TestOptions {
    /// Added to the target as the player's situational modifier.
    pub situational_modifier: i32,
    /// Replaces the mastery level's success level modifier.
    pub success_level_mod: i32,
    /// Visibility of the roll.
    pub roll_mode: RollMode,
}

impl TestOptions {
    /// Options that keep the ledger's current success level modifier.
    pub fn for_ledger(mastery: &MasteryLevelLedger) -> Self {
        Self {
            success_level_mod: mastery.success_level_mod,
            ..Self::default()
        }
    }

    /// Set the situational modifier.
    pub fn with_situational_modifier(mut self, modifier: i32) -> Self {
        self.situational_modifier = modifier;
        self
    }

    /// Set the success level modifier.
    pub fn with_success_level_mod(mut self, modifier: i32) -> Self {
        self.success_level_mod = modifier;
        self
    }

    /// Set the roll mode.
    pub fn with_roll_mode(mut self, roll_mode: RollMode) -> Self {
        self.roll_mode = roll_mode;
        self
    }
}
