//! Impact results: one damage roll per impact ledger.

use crate::dice::{RollResult, Roller};
use crate::error::{SohlError, SohlResult};
use crate::ledger::ImpactLedger;

/// A damage roll bound to an impact ledger.
#[derive(Debug, Clone)]
pub struct ImpactResult {
    impact: ImpactLedger,
    roll: Option<RollResult>,
}

impl ImpactResult {
    /// Bind a result to its ledger. Nothing is rolled yet.
    pub fn new(impact: ImpactLedger) -> Self {
        Self { impact, roll: None }
    }

    /// The ledger being rolled.
    pub fn impact(&self) -> &ImpactLedger {
        &self.impact
    }

    /// Roll the dice once.
    ///
    /// Returns `false` if the dice were already rolled or the impact is
    /// disabled. A disabled impact is never rolled.
    pub fn evaluate<R: Roller + ?Sized>(&mut self, roller: &mut R) -> bool {
        if self.roll.is_some() {
            return false;
        }
        if let Some(reason) = self.impact.disabled() {
            tracing::debug!(%reason, "impact not rolled");
            return false;
        }
        let roll = self.impact.pool().roll(roller);
        tracing::debug!(label = %self.impact.label(), %roll, "impact rolled");
        self.roll = Some(roll);
        true
    }

    /// Returns true once the dice have been rolled.
    pub fn is_evaluated(&self) -> bool {
        self.roll.is_some()
    }

    /// The dice rolled, if any.
    pub fn roll(&self) -> Option<&RollResult> {
        self.roll.as_ref()
    }

    /// Dice total plus the ledger's effective value.
    pub fn total(&self) -> Option<f64> {
        self.roll
            .as_ref()
            .map(|r| f64::from(r.total()) + self.impact.effective())
    }

    /// The impact's label, e.g. "2d6+3e".
    pub fn label(&self) -> String {
        self.impact.label()
    }
}

impl TryFrom<Option<ImpactLedger>> for ImpactResult {
    type Error = SohlError;

    fn try_from(impact: Option<ImpactLedger>) -> SohlResult<Self> {
        impact
            .map(Self::new)
            .ok_or(SohlError::MissingLedger("impact result"))
    }
}
