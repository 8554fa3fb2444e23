//! Single-actor success tests.
//!
//! A test owns a snapshot of a mastery-level ledger. [`SuccessTest::evaluate`]
//! rolls d100 once and classifies the roll; later calls keep the first
//! roll. New situational input can be folded in after the roll through
//! [`SuccessTest::apply_options`], which reclassifies the same roll.

use crate::describe::{DescriptionTable, LookupContext, ResolvedDescription};
use crate::dice::{Die, Roller};
use crate::error::SohlResult;
use crate::ledger::{DisabledReason, MasteryLevelLedger, ModSource};

use super::{RollMode, SuccessLevel, TestKind, TestOptions};

/// Where a test is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestState {
    /// Built, not yet rolled.
    Created,
    /// Rolled and classified.
    Evaluated {
        /// The d100 roll (1-100).
        roll: u32,
        /// The classification of the roll.
        success_level: SuccessLevel,
    },
    /// The ledger is disabled; no roll was made.
    Untestable(DisabledReason),
}

/// Classify a d100 roll against a mastery level.
///
/// A roll at or below the constrained target succeeds. When the ledger
/// has critical digits, a success whose last digit is a critical success
/// digit is critical, and likewise for failures. The ledger's success
/// level modifier is applied afterwards and never changes a critical.
pub fn classify(roll: u32, mastery: &MasteryLevelLedger) -> SuccessLevel {
    let last_digit = (roll % 10) as u8;
    let passed = f64::from(roll) <= mastery.constrained_effective();
    let level = match (passed, mastery.crit_allowed()) {
        (true, true) if mastery.crit_success_digits.contains(&last_digit) => {
            SuccessLevel::CriticalSuccess
        }
        (false, true) if mastery.crit_failure_digits.contains(&last_digit) => {
            SuccessLevel::CriticalFailure
        }
        (true, _) => SuccessLevel::MarginalSuccess,
        (false, _) => SuccessLevel::MarginalFailure,
    };
    level.shifted(mastery.success_level_mod)
}

/// One resolved skill or attribute check.
#[derive(Debug, Clone)]
pub struct SuccessTest {
    /// Category of the test.
    pub kind: TestKind,
    /// Display title.
    pub title: String,
    /// Visibility of the roll.
    pub roll_mode: RollMode,
    /// Situational modifier folded into the ledger, for display.
    pub situational_modifier: i32,
    mastery: MasteryLevelLedger,
    description_table: Option<DescriptionTable>,
    state: TestState,
}

impl SuccessTest {
    /// Create a test from a snapshot of a mastery level.
    pub fn new(kind: TestKind, mastery: MasteryLevelLedger) -> Self {
        Self {
            kind,
            title: kind.title(),
            roll_mode: RollMode::default(),
            situational_modifier: 0,
            mastery,
            description_table: None,
            state: TestState::Created,
        }
    }

    /// Set the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Attach a table used by [`SuccessTest::detail`].
    pub fn with_description_table(mut self, table: DescriptionTable) -> Self {
        self.description_table = Some(table);
        self
    }

    /// The mastery level snapshot the test rolls against.
    pub fn mastery(&self) -> &MasteryLevelLedger {
        &self.mastery
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TestState {
        self.state
    }

    /// Fold dialog input into the snapshot.
    ///
    /// A non-zero situational modifier becomes the player's ADD entry; zero
    /// removes it. The success level modifier is replaced. If the test was
    /// already rolled, the same roll is classified again.
    pub fn apply_options(&mut self, options: TestOptions) -> SohlResult<()> {
        self.situational_modifier = options.situational_modifier;
        if options.situational_modifier != 0 {
            self.mastery
                .ledger
                .add(ModSource::PLAYER, options.situational_modifier)?;
        } else {
            self.mastery.ledger.remove(&ModSource::PLAYER.abbrev);
        }
        self.mastery.success_level_mod = options.success_level_mod;
        self.roll_mode = options.roll_mode;

        if let TestState::Evaluated { roll, .. } = self.state {
            self.state = TestState::Evaluated {
                roll,
                success_level: classify(roll, &self.mastery),
            };
        }
        Ok(())
    }

    /// Roll and classify.
    ///
    /// Returns `false` if the ledger is disabled; nothing is rolled in that
    /// case. Once rolled, further calls return `true` without rolling.
    pub fn evaluate<R: Roller + ?Sized>(&mut self, roller: &mut R) -> bool {
        match self.state {
            TestState::Evaluated { .. } => {
                tracing::debug!(title = %self.title, "test already evaluated, keeping roll");
                return true;
            }
            TestState::Untestable(_) | TestState::Created => {}
        }

        if let Some(reason) = self.mastery.ledger.disabled() {
            tracing::debug!(title = %self.title, %reason, "test cannot be performed");
            self.state = TestState::Untestable(reason);
            return false;
        }

        let roll = roller.roll_die(Die::D100.sides());
        self.state = TestState::Evaluated {
            roll,
            success_level: classify(roll, &self.mastery),
        };
        true
    }

    /// Returns true once the test has been rolled.
    pub fn is_evaluated(&self) -> bool {
        matches!(self.state, TestState::Evaluated { .. })
    }

    /// The d100 roll, once evaluated.
    pub fn roll(&self) -> Option<u32> {
        match self.state {
            TestState::Evaluated { roll, .. } => Some(roll),
            _ => None,
        }
    }

    /// Last digit of the roll.
    pub fn last_digit(&self) -> Option<u8> {
        self.roll().map(|r| (r % 10) as u8)
    }

    /// The classification, once evaluated.
    pub fn success_level(&self) -> Option<SuccessLevel> {
        match self.state {
            TestState::Evaluated { success_level, .. } => Some(success_level),
            _ => None,
        }
    }

    /// The roll target: effective value clamped to the target range.
    pub fn target(&self) -> f64 {
        self.mastery.constrained_effective()
    }

    /// Returns true if the target range clipped the effective value.
    pub fn is_capped(&self) -> bool {
        self.mastery.effective() != self.mastery.constrained_effective()
    }

    /// Returns true for an evaluated success.
    pub fn is_success(&self) -> bool {
        self.success_level().is_some_and(SuccessLevel::is_success)
    }

    /// Returns true for an evaluated critical.
    pub fn is_critical(&self) -> bool {
        self.success_level().is_some_and(SuccessLevel::is_critical)
    }

    /// Success level folded onto 0 (failure) or 1 (success).
    pub fn norm_success_level(&self) -> Option<i32> {
        self.success_level().map(|l| i32::from(l.is_success()))
    }

    /// Success value: the ledger index shifted by `success level - 1`.
    pub fn success_value(&self) -> Option<i32> {
        self.success_level()
            .map(|l| self.mastery.ledger.index() + l.value() - 1)
    }

    /// Short outcome text.
    ///
    /// Without critical digits only "Success" or "Failure" is reported.
    pub fn description(&self) -> Option<&'static str> {
        let level = self.success_level()?;
        if self.mastery.crit_allowed() {
            Some(level.label())
        } else if level.is_success() {
            Some("Success")
        } else {
            Some("Failure")
        }
    }

    /// Lookup context for description tables.
    pub fn lookup_context(&self) -> Option<LookupContext> {
        let (roll, level) = match self.state {
            TestState::Evaluated {
                roll,
                success_level,
            } => (roll, success_level),
            _ => return None,
        };
        Some(LookupContext {
            value: roll as i32,
            last_digit: (roll % 10) as u8,
            success_level: level.value(),
            success_value: self.mastery.ledger.index() + level.value() - 1,
        })
    }

    /// Detailed outcome from the attached description table.
    pub fn detail(&self) -> Option<ResolvedDescription> {
        let table = self.description_table.as_ref()?;
        table.lookup(&self.lookup_context()?)
    }
}
