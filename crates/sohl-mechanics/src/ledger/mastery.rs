//! Mastery-level ledgers: percentile targets with critical digits.

use std::collections::BTreeSet;

use crate::dice::Roller;
use crate::error::SohlResult;
use crate::resolution::{SuccessTest, TestKind, TestOptions};
use crate::rules::VariantConfig;

use super::Ledger;

/// Lowest usable roll target.
pub const DEFAULT_MIN_TARGET: f64 = 5.0;
/// Highest usable roll target.
pub const DEFAULT_MAX_TARGET: f64 = 95.0;

/// A ledger whose effective value is a d100 roll target.
#[derive(Debug, Clone)]
pub struct MasteryLevelLedger {
    /// The underlying modifier ledger.
    pub ledger: Ledger,
    /// Lower clamp for the roll target.
    pub min_target: f64,
    /// Upper clamp for the roll target.
    pub max_target: f64,
    /// Shift applied to marginal results after classification.
    pub success_level_mod: i32,
    /// Roll digits that turn a success into a critical success.
    pub crit_success_digits: BTreeSet<u8>,
    /// Roll digits that turn a failure into a critical failure.
    pub crit_failure_digits: BTreeSet<u8>,
}

impl MasteryLevelLedger {
    /// Create a mastery level with the default 5-95 target range and no
    /// critical digits.
    pub fn new(base: f64) -> Self {
        Self {
            ledger: Ledger::new(base),
            min_target: DEFAULT_MIN_TARGET,
            max_target: DEFAULT_MAX_TARGET,
            success_level_mod: 0,
            crit_success_digits: BTreeSet::new(),
            crit_failure_digits: BTreeSet::new(),
        }
    }

    /// Create a mastery level using a variant's target range and digits.
    pub fn from_variant(base: f64, config: &VariantConfig) -> Self {
        Self::new(base)
            .with_target_range(f64::from(config.min_target), f64::from(config.max_target))
            .with_crit_digits(
                config.crit_success_digits.iter().copied(),
                config.crit_failure_digits.iter().copied(),
            )
    }

    /// Set the target clamp range.
    pub fn with_target_range(mut self, min: f64, max: f64) -> Self {
        self.min_target = min;
        self.max_target = max;
        self
    }

    /// Set the critical digit sets.
    pub fn with_crit_digits(
        mut self,
        success: impl IntoIterator<Item = u8>,
        failure: impl IntoIterator<Item = u8>,
    ) -> Self {
        self.crit_success_digits = success.into_iter().collect();
        self.crit_failure_digits = failure.into_iter().collect();
        self
    }

    /// Set the success level modifier.
    pub fn with_success_level_mod(mut self, modifier: i32) -> Self {
        self.success_level_mod = modifier;
        self
    }

    /// The unclamped effective value.
    pub fn effective(&self) -> f64 {
        self.ledger.effective()
    }

    /// The effective value clamped to `[min_target, max_target]`.
    pub fn constrained_effective(&self) -> f64 {
        self.ledger
            .effective()
            .max(self.min_target)
            .min(self.max_target)
    }

    /// Returns true if either critical digit set is non-empty.
    pub fn crit_allowed(&self) -> bool {
        !self.crit_success_digits.is_empty() || !self.crit_failure_digits.is_empty()
    }

    /// Secondary modifier derived from the base value.
    ///
    /// `(base / 2 - 25)` truncated to a multiple of `increment`, clamped
    /// to -25..=25.
    pub fn sec_mod(&self, increment: i32) -> i32 {
        let increment = increment.max(1);
        let base = self.ledger.base().unwrap_or(0.0);
        let steps = ((base / 2.0 - 25.0) / f64::from(increment)).trunc() as i32;
        (steps * increment).clamp(-25, 25)
    }

    /// Run the success test workflow.
    ///
    /// The ledger is snapshotted and `prompt` receives the snapshot; it
    /// returns `None` when the player cancels. Its options are folded into
    /// the snapshot and the test is rolled. Returns `Ok(None)` if the
    /// prompt was cancelled or the ledger cannot be tested.
    pub fn create_success_test<R, F>(
        &self,
        kind: TestKind,
        prompt: F,
        roller: &mut R,
    ) -> SohlResult<Option<SuccessTest>>
    where
        R: Roller + ?Sized,
        F: FnOnce(&MasteryLevelLedger) -> Option<TestOptions>,
    {
        let mut test = SuccessTest::new(kind, self.clone());
        let Some(options) = prompt(test.mastery()) else {
            tracing::debug!(%kind, "success test cancelled");
            return Ok(None);
        };
        test.apply_options(options)?;
        if !test.evaluate(roller) {
            return Ok(None);
        }
        Ok(Some(test))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedRoller;
    use crate::ledger::{DisabledReason, ModSource};
    use crate::resolution::SuccessLevel;
    use crate::rules::preset;

    #[test]
    fn constrained_effective_clamps() {
        let mut ml = MasteryLevelLedger::new(120.0);
        assert_eq!(ml.effective(), 120.0);
        assert_eq!(ml.constrained_effective(), 95.0);
        ml.ledger.set_base(-10.0);
        assert_eq!(ml.constrained_effective(), 5.0);
        ml.ledger.set_base(50.0);
        assert_eq!(ml.constrained_effective(), 50.0);
    }

    #[test]
    fn crit_allowed_needs_digits() {
        let ml = MasteryLevelLedger::new(50.0);
        assert!(!ml.crit_allowed());
        let ml = ml.with_crit_digits([], [0]);
        assert!(ml.crit_allowed());
    }

    #[test]
    fn from_variant_copies_settings() {
        let ml = MasteryLevelLedger::from_variant(60.0, &preset::legendary());
        assert_eq!(ml.min_target, 5.0);
        assert_eq!(ml.max_target, 95.0);
        assert!(ml.crit_success_digits.contains(&5));
        assert!(ml.crit_failure_digits.contains(&0));
    }

    #[test]
    fn secondary_modifier() {
        assert_eq!(MasteryLevelLedger::new(80.0).sec_mod(5), 15);
        assert_eq!(MasteryLevelLedger::new(10.0).sec_mod(5), -20);
        assert_eq!(MasteryLevelLedger::new(54.0).sec_mod(5), 0);
        assert_eq!(MasteryLevelLedger::new(200.0).sec_mod(5), 25);
        assert_eq!(MasteryLevelLedger::new(0.0).sec_mod(5), -25);
        assert_eq!(MasteryLevelLedger::new(64.0).sec_mod(2), 6);
    }

    #[test]
    fn workflow_folds_situational_modifier() {
        let mut ml = MasteryLevelLedger::new(45.0);
        ml.ledger
            .add(ModSource::new("Encumbrance", "Enc"), -10)
            .unwrap();

        let test = ml
            .create_success_test(
                TestKind::Skill,
                |snapshot| {
                    assert_eq!(snapshot.effective(), 35.0);
                    Some(TestOptions::for_ledger(snapshot).with_situational_modifier(10))
                },
                &mut ScriptedRoller::new([42]),
            )
            .unwrap()
            .unwrap();

        assert_eq!(test.target(), 45.0);
        assert_eq!(test.success_level(), Some(SuccessLevel::MarginalSuccess));
        assert_eq!(test.mastery().ledger.abbrev(), "Enc -10, SitMod +10");
        // The source ledger is untouched.
        assert!(!ml.ledger.has("SitMod"));
    }

    #[test]
    fn workflow_cancelled() {
        let ml = MasteryLevelLedger::new(45.0);
        let mut roller = ScriptedRoller::new([10]);
        let result = ml
            .create_success_test(TestKind::Skill, |_| None, &mut roller)
            .unwrap();
        assert!(result.is_none());
        assert_eq!(roller.remaining(), 1);
    }

    #[test]
    fn workflow_disabled() {
        let mut ml = MasteryLevelLedger::new(45.0);
        ml.ledger.set_disabled(DisabledReason::NoScore);
        let result = ml
            .create_success_test(
                TestKind::Attribute,
                |m| Some(TestOptions::for_ledger(m)),
                &mut ScriptedRoller::new([10]),
            )
            .unwrap();
        assert!(result.is_none());
    }
}
