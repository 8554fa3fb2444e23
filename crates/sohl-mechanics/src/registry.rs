//! Ledger construction keyed by kind.
//!
//! A [`LedgerFactory`] is built once per variant so every ledger it hands
//! out carries that variant's target range, critical digits and dice.

use serde::{Deserialize, Serialize};

use crate::error::{SohlError, SohlResult};
use crate::ledger::{Aspect, ImpactLedger, Ledger, MasteryLevelLedger};
use crate::rules::VariantConfig;

/// The three ledger flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerKind {
    /// A plain value ledger.
    Value,
    /// A d100 roll target.
    MasteryLevel,
    /// Damage dice plus a modifier.
    Impact,
}

impl LedgerKind {
    /// Every kind.
    pub const ALL: [Self; 3] = [Self::Value, Self::MasteryLevel, Self::Impact];

    /// Identifier used on the command line.
    pub fn id(self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::MasteryLevel => "mastery",
            Self::Impact => "impact",
        }
    }
}

impl std::fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for LedgerKind {
    type Err = SohlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "value" => Ok(Self::Value),
            "mastery" | "mastery_level" | "ml" => Ok(Self::MasteryLevel),
            "impact" => Ok(Self::Impact),
            _ => Err(SohlError::InvalidConfig(format!("unknown ledger kind '{s}'"))),
        }
    }
}

/// A ledger of any kind.
#[derive(Debug, Clone)]
pub enum AnyLedger {
    /// A plain value ledger.
    Value(Ledger),
    /// A mastery-level ledger.
    MasteryLevel(MasteryLevelLedger),
    /// An impact ledger.
    Impact(ImpactLedger),
}

impl AnyLedger {
    /// Which kind this is.
    pub fn kind(&self) -> LedgerKind {
        match self {
            Self::Value(_) => LedgerKind::Value,
            Self::MasteryLevel(_) => LedgerKind::MasteryLevel,
            Self::Impact(_) => LedgerKind::Impact,
        }
    }

    /// The underlying modifier ledger.
    pub fn ledger(&self) -> &Ledger {
        match self {
            Self::Value(l) => l,
            Self::MasteryLevel(ml) => &ml.ledger,
            Self::Impact(i) => &i.ledger,
        }
    }

    /// The underlying modifier ledger, mutably.
    pub fn ledger_mut(&mut self) -> &mut Ledger {
        match self {
            Self::Value(l) => l,
            Self::MasteryLevel(ml) => &mut ml.ledger,
            Self::Impact(i) => &mut i.ledger,
        }
    }
}

/// Builds ledgers configured for one variant.
#[derive(Debug, Clone, Default)]
pub struct LedgerFactory {
    config: VariantConfig,
}

impl LedgerFactory {
    /// Create a factory for a variant.
    pub fn new(config: VariantConfig) -> Self {
        Self { config }
    }

    /// The variant in use.
    pub fn config(&self) -> &VariantConfig {
        &self.config
    }

    /// Create a ledger of the given kind.
    pub fn create(&self, kind: LedgerKind, base: f64) -> AnyLedger {
        match kind {
            LedgerKind::Value => AnyLedger::Value(self.value(base)),
            LedgerKind::MasteryLevel => AnyLedger::MasteryLevel(self.mastery_level(base)),
            LedgerKind::Impact => AnyLedger::Impact(self.default_impact(base)),
        }
    }

    /// A plain value ledger.
    pub fn value(&self, base: f64) -> Ledger {
        Ledger::new(base)
    }

    /// A mastery level with the variant's target range and digits.
    pub fn mastery_level(&self, base: f64) -> MasteryLevelLedger {
        MasteryLevelLedger::from_variant(base, &self.config)
    }

    /// An impact ledger with explicit dice.
    ///
    /// Fails with [`SohlError::InvalidDie`] if the variant does not allow
    /// the die size, or [`SohlError::TooManyDice`] past its dice limit.
    pub fn impact(
        &self,
        base: f64,
        num_dice: u32,
        die: u32,
        aspect: Aspect,
    ) -> SohlResult<ImpactLedger> {
        if !self.config.allows_die(die) {
            return Err(SohlError::InvalidDie(die));
        }
        if !self.config.allows_dice_count(num_dice) {
            return Err(SohlError::TooManyDice {
                count: num_dice,
                max: self.config.max_impact_dice,
            });
        }
        Ok(ImpactLedger::new(base)
            .with_dice(num_dice, die)
            .with_aspect(aspect))
    }

    /// The die an impact gets when none is given: d6 if allowed, otherwise
    /// the smallest allowed die.
    pub fn default_die(&self) -> u32 {
        if self.config.allows_die(6) {
            return 6;
        }
        self.config
            .impact_dice
            .iter()
            .copied()
            .filter(|d| *d > 0)
            .min()
            .unwrap_or(0)
    }

    fn default_impact(&self, base: f64) -> ImpactLedger {
        let die = self.default_die();
        ImpactLedger::new(base).with_dice(u32::from(die > 0), die)
    }
}
