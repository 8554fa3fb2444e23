//! Opposed tests: two evaluated success tests compared.
//!
//! Victory stars are the difference of the two success levels. When both
//! sides fail there is no winner. A true tie is broken, for kinds that
//! always break ties, by the higher roll and then by a coin flip drawn
//! from the roller.

use serde::{Deserialize, Serialize};

use crate::dice::Roller;
use crate::error::{SohlError, SohlResult};

use super::{SuccessTest, TestKind, TestState};

/// One side of an opposed test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The side that initiated the test.
    Source,
    /// The side that opposed it.
    Target,
}

impl Side {
    /// Tie-break direction: +1 for the source, -1 for the target.
    pub fn sign(self) -> i32 {
        match self {
            Self::Source => 1,
            Self::Target => -1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Target => write!(f, "target"),
        }
    }
}

/// Resolved numbers of an opposed test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpposedOutcome {
    /// Neither side succeeded.
    pub both_fail: bool,
    /// Source level minus target level, or 0 when both fail.
    pub victory_stars_base: i32,
    /// +1, -1, or 0 when no tie was broken.
    pub tie_break: i32,
}

/// A source test pitted against a target test.
#[derive(Debug, Clone)]
pub struct OpposedTest {
    source: SuccessTest,
    target: SuccessTest,
    /// Whether a true tie is broken instead of standing.
    pub breaks_ties: bool,
    outcome: Option<OpposedOutcome>,
}

impl OpposedTest {
    /// Pair two tests. Both must have been evaluated or found untestable.
    ///
    /// Ties are broken when the target's kind breaks ties by default.
    pub fn new(source: SuccessTest, target: SuccessTest) -> SohlResult<Self> {
        for test in [&source, &target] {
            if test.state() == TestState::Created {
                return Err(SohlError::NotEvaluated(test.title.clone()));
            }
        }
        let breaks_ties = target.kind.breaks_ties_by_default();
        Ok(Self {
            source,
            target,
            breaks_ties,
            outcome: None,
        })
    }

    /// Break ties when the target's kind is in `kinds`.
    pub fn with_tie_breaking_kinds(mut self, kinds: &[TestKind]) -> Self {
        self.breaks_ties = kinds.contains(&self.target.kind);
        self
    }

    /// The initiating test.
    pub fn source(&self) -> &SuccessTest {
        &self.source
    }

    /// The opposing test.
    pub fn target(&self) -> &SuccessTest {
        &self.target
    }

    /// The resolved numbers, once evaluated.
    pub fn outcome(&self) -> Option<OpposedOutcome> {
        self.outcome
    }

    /// Resolve the contest.
    ///
    /// Returns `false` when either side could not be tested. The roller
    /// is only consulted for a coin flip when both rolls are equal. Once
    /// resolved, further calls return `true` and change nothing.
    pub fn evaluate<R: Roller + ?Sized>(&mut self, roller: &mut R) -> bool {
        if self.outcome.is_some() {
            return true;
        }
        let (Some(source_level), Some(target_level)) =
            (self.source.success_level(), self.target.success_level())
        else {
            tracing::debug!("opposed test has an untestable side");
            return false;
        };

        let both_fail = !source_level.is_success() && !target_level.is_success();
        let victory_stars_base = if both_fail {
            0
        } else {
            source_level.value() - target_level.value()
        };

        let mut tie_break = 0;
        if !both_fail && victory_stars_base == 0 && self.breaks_ties {
            let source_roll = i64::from(self.source.roll().unwrap_or(0));
            let target_roll = i64::from(self.target.roll().unwrap_or(0));
            tie_break = (source_roll - target_roll).signum() as i32;
            if tie_break == 0 {
                let side = if roller.roll_die(2) == 1 {
                    Side::Source
                } else {
                    Side::Target
                };
                tracing::debug!(%side, "tie broken by coin flip");
                tie_break = side.sign();
            }
        }

        self.outcome = Some(OpposedOutcome {
            both_fail,
            victory_stars_base,
            tie_break,
        });
        true
    }

    /// Neither side succeeded.
    pub fn both_fail(&self) -> bool {
        self.outcome.is_some_and(|o| o.both_fail)
    }

    /// Equal success levels with at least one success, before tie-breaking.
    pub fn is_tied(&self) -> bool {
        self.outcome
            .is_some_and(|o| !o.both_fail && o.victory_stars_base == 0)
    }

    /// Signed margin of victory: positive favours the source.
    pub fn victory_stars(&self) -> i32 {
        match self.outcome {
            Some(o) if o.both_fail => 0,
            Some(o) => o.victory_stars_base + o.tie_break,
            None => 0,
        }
    }

    /// The source won.
    pub fn source_wins(&self) -> bool {
        self.victory_stars() > 0
    }

    /// The target won.
    pub fn target_wins(&self) -> bool {
        self.victory_stars() < 0
    }

    /// The winning side, if any.
    pub fn winner(&self) -> Option<Side> {
        match self.victory_stars() {
            v if v > 0 => Some(Side::Source),
            v if v < 0 => Some(Side::Target),
            _ => None,
        }
    }

    /// Stars for display: "★" per source star, "☆" per target star.
    pub fn victory_stars_text(&self) -> String {
        let stars = self.victory_stars();
        if stars > 0 {
            "★".repeat(stars as usize)
        } else if stars < 0 {
            "☆".repeat(stars.unsigned_abs() as usize)
        } else if self.both_fail() {
            "Both Fail".to_string()
        } else {
            "Tied".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedRoller;
    use crate::ledger::{DisabledReason, MasteryLevelLedger};
    use crate::resolution::SuccessLevel;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn make_test(kind: TestKind, base: f64, roll: u32) -> SuccessTest {
        let mastery = MasteryLevelLedger::new(base).with_crit_digits([0, 5], [0, 5]);
        let mut test = SuccessTest::new(kind, mastery);
        test.evaluate(&mut ScriptedRoller::new([roll]));
        test
    }

    fn resolve(source: SuccessTest, target: SuccessTest) -> OpposedTest {
        let mut opposed = OpposedTest::new(source, target).unwrap();
        assert!(opposed.evaluate(&mut ScriptedRoller::new([1])));
        opposed
    }

    #[test]
    fn requires_evaluated_tests() {
        let mastery = MasteryLevelLedger::new(50.0);
        let fresh = SuccessTest::new(TestKind::Skill, mastery);
        let done = make_test(TestKind::Skill, 50.0, 20);
        let err = OpposedTest::new(done, fresh).unwrap_err();
        assert!(matches!(err, SohlError::NotEvaluated(_)));
    }

    #[test]
    fn both_fail_has_no_winner() {
        let opposed = resolve(
            make_test(TestKind::Block, 30.0, 40),
            make_test(TestKind::Block, 30.0, 77),
        );
        assert!(opposed.both_fail());
        assert_eq!(opposed.victory_stars(), 0);
        assert_eq!(opposed.winner(), None);
        assert!(!opposed.is_tied());
        assert_eq!(opposed.victory_stars_text(), "Both Fail");
    }

    #[test]
    fn margin_is_level_difference() {
        // Critical success (2) against marginal failure (0).
        let opposed = resolve(
            make_test(TestKind::Block, 60.0, 25),
            make_test(TestKind::Block, 40.0, 62),
        );
        assert_eq!(
            opposed.source().success_level(),
            Some(SuccessLevel::CriticalSuccess)
        );
        assert_eq!(opposed.victory_stars(), 2);
        assert!(opposed.source_wins());
        assert_eq!(opposed.victory_stars_text(), "★★");

        let opposed = resolve(
            make_test(TestKind::Block, 40.0, 62),
            make_test(TestKind::Block, 60.0, 33),
        );
        assert_eq!(opposed.victory_stars(), -1);
        assert!(opposed.target_wins());
        assert_eq!(opposed.victory_stars_text(), "☆");
    }

    #[test]
    fn tie_stands_without_tie_breaking() {
        let opposed = resolve(
            make_test(TestKind::Block, 60.0, 31),
            make_test(TestKind::Block, 60.0, 42),
        );
        assert!(opposed.is_tied());
        assert_eq!(opposed.victory_stars(), 0);
        assert_eq!(opposed.victory_stars_text(), "Tied");
    }

    #[test]
    fn skill_tie_broken_by_higher_roll() {
        let opposed = resolve(
            make_test(TestKind::Skill, 60.0, 31),
            make_test(TestKind::Skill, 60.0, 42),
        );
        assert!(opposed.is_tied());
        assert_eq!(opposed.victory_stars(), -1);
        assert_eq!(opposed.winner(), Some(Side::Target));

        let opposed = resolve(
            make_test(TestKind::Block, 60.0, 44),
            make_test(TestKind::Dodge, 60.0, 12),
        );
        assert_eq!(opposed.winner(), Some(Side::Source));
    }

    #[test]
    fn equal_rolls_use_coin_flip() {
        let mut opposed = OpposedTest::new(
            make_test(TestKind::Skill, 60.0, 33),
            make_test(TestKind::Skill, 60.0, 33),
        )
        .unwrap();
        let mut roller = ScriptedRoller::new([2]);
        opposed.evaluate(&mut roller);
        assert_eq!(opposed.winner(), Some(Side::Target));
        assert_eq!(opposed.outcome().unwrap().tie_break, -1);
    }

    #[test]
    fn coin_flip_repeats_with_seed() {
        let winners: Vec<Option<Side>> = (0..5)
            .map(|_| {
                let mut opposed = OpposedTest::new(
                    make_test(TestKind::Skill, 60.0, 33),
                    make_test(TestKind::Skill, 60.0, 33),
                )
                .unwrap();
                opposed.evaluate(&mut StdRng::seed_from_u64(42));
                opposed.winner()
            })
            .collect();
        assert!(winners[0].is_some());
        assert!(winners.iter().all(|w| *w == winners[0]));
    }

    #[test]
    fn tie_breaking_kinds_from_variant() {
        let opposed = OpposedTest::new(
            make_test(TestKind::Block, 60.0, 31),
            make_test(TestKind::Block, 60.0, 42),
        )
        .unwrap()
        .with_tie_breaking_kinds(&[TestKind::Block]);
        assert!(opposed.breaks_ties);
    }

    #[test]
    fn source_kind_does_not_break_ties() {
        let kinds = crate::rules::preset::core().tie_breaking_kinds;
        let mut opposed = OpposedTest::new(
            make_test(TestKind::Skill, 60.0, 44),
            make_test(TestKind::Block, 60.0, 12),
        )
        .unwrap()
        .with_tie_breaking_kinds(&kinds);
        assert!(!opposed.breaks_ties);
        opposed.evaluate(&mut ScriptedRoller::new([1]));
        assert!(opposed.is_tied());
        assert_eq!(opposed.winner(), None);
        assert_eq!(opposed.victory_stars_text(), "Tied");
    }

    #[test]
    fn untestable_side_is_not_resolved() {
        let mut mastery = MasteryLevelLedger::new(50.0);
        mastery.ledger.set_disabled(DisabledReason::NoBlocking);
        let mut blocked = SuccessTest::new(TestKind::Block, mastery);
        assert!(!blocked.evaluate(&mut ScriptedRoller::new([10])));

        let mut opposed =
            OpposedTest::new(make_test(TestKind::Skill, 50.0, 20), blocked).unwrap();
        assert!(!opposed.evaluate(&mut ScriptedRoller::new([1])));
        assert_eq!(opposed.outcome(), None);
    }

    #[test]
    fn evaluate_is_stable() {
        let mut opposed = OpposedTest::new(
            make_test(TestKind::Skill, 60.0, 33),
            make_test(TestKind::Skill, 60.0, 33),
        )
        .unwrap();
        let mut roller = ScriptedRoller::new([1, 2]);
        opposed.evaluate(&mut roller);
        opposed.evaluate(&mut roller);
        assert_eq!(opposed.winner(), Some(Side::Source));
        assert_eq!(roller.remaining(), 1);
    }
}
