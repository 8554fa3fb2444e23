//! Impact ledgers: damage dice plus a modifier.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dice::{DicePool, Die};
use crate::error::SohlError;
use crate::rules::VariantConfig;

use super::{DisabledReason, Ledger};

/// Kind of damage an impact deals.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Aspect {
    /// Crushing damage.
    #[default]
    Blunt,
    /// Cutting damage.
    Edged,
    /// Claws.
    Claw,
    /// Thrusting damage.
    Piercing,
    /// Bites.
    Bite,
    /// Burns.
    Fire,
    /// Cold.
    Frost,
    /// Constriction.
    Squeeze,
    /// Lightning.
    Electric,
    /// Corrosion.
    Acid,
    /// Missiles.
    Projectile,
    /// Blasts.
    Explosive,
}

impl Aspect {
    /// Every aspect, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Blunt,
        Self::Edged,
        Self::Claw,
        Self::Piercing,
        Self::Bite,
        Self::Fire,
        Self::Frost,
        Self::Squeeze,
        Self::Electric,
        Self::Acid,
        Self::Projectile,
        Self::Explosive,
    ];

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Blunt => "blunt",
            Self::Edged => "edged",
            Self::Claw => "claw",
            Self::Piercing => "piercing",
            Self::Bite => "bite",
            Self::Fire => "fire",
            Self::Frost => "frost",
            Self::Squeeze => "squeeze",
            Self::Electric => "electric",
            Self::Acid => "acid",
            Self::Projectile => "projectile",
            Self::Explosive => "explosive",
        }
    }

    /// Single-letter code used in impact labels.
    pub fn code(self) -> char {
        self.name().chars().next().unwrap_or('?')
    }
}

impl std::fmt::Display for Aspect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Aspect {
    type Err = SohlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.name() == needle)
            .ok_or_else(|| SohlError::InvalidConfig(format!("unknown aspect '{s}'")))
    }
}

/// A ledger for damage: `num_dice` d `die` plus the effective value.
#[derive(Debug, Clone)]
pub struct ImpactLedger {
    /// The modifier added to the dice.
    pub ledger: Ledger,
    /// Damage type.
    pub aspect: Aspect,
    /// Number of dice rolled.
    pub num_dice: u32,
    /// Sides per die; 0 means no dice.
    pub die: u32,
}

impl ImpactLedger {
    /// Create a 1d6 blunt impact with the given modifier base.
    pub fn new(base: f64) -> Self {
        Self {
            ledger: Ledger::new(base),
            aspect: Aspect::default(),
            num_dice: 1,
            die: 6,
        }
    }

    /// Set the dice.
    pub fn with_dice(mut self, num_dice: u32, die: u32) -> Self {
        self.num_dice = num_dice;
        self.die = die;
        self
    }

    /// Set the aspect.
    pub fn with_aspect(mut self, aspect: Aspect) -> Self {
        self.aspect = aspect;
        self
    }

    /// The modifier added to the dice.
    pub fn effective(&self) -> f64 {
        self.ledger.effective()
    }

    /// Why the impact is inert, if it is.
    ///
    /// An impact with neither a die nor a modifier is disabled even when
    /// its ledger is not.
    pub fn disabled(&self) -> Option<DisabledReason> {
        self.ledger.disabled().or_else(|| {
            (self.die == 0 && self.effective() == 0.0).then_some(DisabledReason::NoModifierNoDie)
        })
    }

    /// Returns true if the impact cannot deal damage.
    pub fn is_disabled(&self) -> bool {
        self.disabled().is_some()
    }

    fn rolls_dice(&self) -> bool {
        self.num_dice > 0 && self.die > 0
    }

    /// The median total: `num_dice * (die + 1) / 2` plus the modifier.
    pub fn median(&self) -> f64 {
        let dice = if self.rolls_dice() {
            f64::from(self.num_dice) * (f64::from(self.die) / 2.0 + 0.5)
        } else {
            0.0
        };
        dice + self.effective()
    }

    /// Dice formula such as "2d6+3", "d6+0", "d8-1" or "5".
    pub fn dice_formula(&self) -> String {
        let effective = self.effective();
        if self.num_dice == 0 && effective == 0.0 {
            return "0".to_string();
        }
        let mut formula = String::new();
        if self.num_dice > 0 {
            if self.num_dice > 1 {
                formula.push_str(&self.num_dice.to_string());
            }
            formula.push('d');
            formula.push_str(&self.die.to_string());
            if effective >= 0.0 {
                formula.push('+');
            }
        }
        formula.push_str(&effective.to_string());
        formula
    }

    /// Formula followed by the aspect code, e.g. "2d6+3e".
    pub fn label(&self) -> String {
        format!("{}{}", self.dice_formula(), self.aspect.code())
    }

    /// The dice to roll. Empty when there are no dice.
    pub fn pool(&self) -> DicePool {
        match Die::from_sides(self.die) {
            Some(die) if self.num_dice > 0 => DicePool::new().add(die, self.num_dice),
            _ => DicePool::new(),
        }
    }

    /// Tactical advantage the variant grants for this aspect.
    pub fn tactical_advantage(&self, config: &VariantConfig) -> i32 {
        config
            .aspect_tactical_advantage
            .get(&self.aspect)
            .copied()
            .unwrap_or(0)
    }
}
