//! Modifier sources and disabled reasons.
//!
//! A [`ModSource`] names where a modification came from. Its
//! abbreviation is the key a ledger stores the entry under, so the same
//! source replaces its earlier contribution instead of stacking.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// The origin of a modification: a display name and a short key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModSource {
    /// Display name, e.g. "Encumbrance".
    pub name: Cow<'static, str>,
    /// Short key, e.g. "Enc". Unique per ledger.
    pub abbrev: Cow<'static, str>,
}

impl ModSource {
    /// Situational modifier entered by the player.
    pub const PLAYER: Self = Self::fixed("Player", "SitMod");
    /// Lower bound imposed by a rule.
    pub const MINIMUM_VALUE: Self = Self::fixed("Minimum Value", "MinVal");
    /// Upper bound imposed by a rule.
    pub const MAXIMUM_VALUE: Self = Self::fixed("Maximum Value", "MaxVal");
    /// Penalty for fighting several opponents.
    pub const OUTNUMBERED: Self = Self::fixed("Outnumbered", "Outn");
    /// Penalty for using the off hand.
    pub const OFF_HAND: Self = Self::fixed("Off Hand", "OffHnd");
    /// Bonus or penalty from magic.
    pub const MAGIC: Self = Self::fixed("Magic Modifier", "MagMod");
    /// Bonus bought with fate.
    pub const FATE_BONUS: Self = Self::fixed("Fate Bonus", "FateBns");
    /// Attribute boost to a mastery level.
    pub const ATTRIBUTE_BOOST: Self = Self::fixed("Mastery Level Attribute Boost", "MlAtrBst");
    /// Bonus from the birth sign.
    pub const SUNSIGN: Self = Self::fixed("Sunsign Modifier", "SSMod");
    /// Item durability.
    pub const DURABILITY: Self = Self::fixed("Durability", "Dur");
    /// Item weight.
    pub const ITEM_WEIGHT: Self = Self::fixed("Item Weight", "ItmWt");
    /// Protection granted by armor.
    pub const ARMOR_PROTECTION: Self = Self::fixed("Armor Protection", "ArmProt");

    /// A source from static strings, usable in constants.
    pub const fn fixed(name: &'static str, abbrev: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            abbrev: Cow::Borrowed(abbrev),
        }
    }

    /// A source from owned or borrowed strings.
    pub fn new(name: impl Into<String>, abbrev: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            abbrev: Cow::Owned(abbrev.into()),
        }
    }
}

impl From<(&str, &str)> for ModSource {
    fn from((name, abbrev): (&str, &str)) -> Self {
        Self::new(name, abbrev)
    }
}

impl From<&ModSource> for ModSource {
    fn from(source: &ModSource) -> Self {
        source.clone()
    }
}

impl std::fmt::Display for ModSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.abbrev)
    }
}

/// Why a ledger is inert.
///
/// A disabled ledger always resolves to 0 and shows the reason's
/// abbreviation instead of its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisabledReason {
    /// Disabled without a more specific reason.
    Disabled,
    /// The mastery level itself is switched off.
    MasteryLevelDisabled,
    /// The character has no fate available.
    NoFateAvailable,
    /// Non-player characters cannot use fate.
    NoFateNpc,
    /// Fate is switched off in the game settings.
    NoFateSettings,
    /// An aura prevents the use of fate.
    NoFateAura,
    /// A trait without a mastery level.
    TraitNoMasteryLevel,
    /// The item has no charges.
    NoCharges,
    /// The item cannot use charges.
    NoUseCharges,
    /// The injury does not heal.
    NoHealRate,
    /// A non-numeric trait has no score.
    NoScore,
    /// A non-numeric trait cannot use fate.
    NotNumericNoFate,
    /// A non-numeric trait has no mastery level.
    NotNumericNoMasteryLevel,
    /// Missile attacks cannot be defended against this way.
    NoMissileDefense,
    /// Blocking is not possible.
    NoBlocking,
    /// Counterstrike is not possible.
    NoCounterstrike,
    /// An impact with neither modifier nor die.
    NoModifierNoDie,
}

impl DisabledReason {
    /// All reasons, in catalog order.
    pub const ALL: [Self; 17] = [
        Self::Disabled,
        Self::MasteryLevelDisabled,
        Self::NoFateAvailable,
        Self::NoFateNpc,
        Self::NoFateSettings,
        Self::NoFateAura,
        Self::TraitNoMasteryLevel,
        Self::NoCharges,
        Self::NoUseCharges,
        Self::NoHealRate,
        Self::NoScore,
        Self::NotNumericNoFate,
        Self::NotNumericNoMasteryLevel,
        Self::NoMissileDefense,
        Self::NoBlocking,
        Self::NoCounterstrike,
        Self::NoModifierNoDie,
    ];

    /// Human-readable label.
    pub fn name(self) -> &'static str {
        match self {
            Self::Disabled => "Disabled",
            Self::MasteryLevelDisabled => "Mastery Level Disabled",
            Self::NoFateAvailable => "No Fate Available",
            Self::NoFateNpc => "No Fate for NPCs",
            Self::NoFateSettings => "Fate Disabled in Settings",
            Self::NoFateAura => "No Fate due to Aura",
            Self::TraitNoMasteryLevel => "Trait has no Mastery Level",
            Self::NoCharges => "No Charges",
            Self::NoUseCharges => "Does not Use Charges",
            Self::NoHealRate => "No Healing Rate",
            Self::NoScore => "Not Numeric, no Score",
            Self::NotNumericNoFate => "Not Numeric, no Fate",
            Self::NotNumericNoMasteryLevel => "Not Numeric, no Mastery Level",
            Self::NoMissileDefense => "No Missile Defense",
            Self::NoBlocking => "No Blocking",
            Self::NoCounterstrike => "No Counterstrike",
            Self::NoModifierNoDie => "No Modifier and No Die",
        }
    }

    /// Short label shown in place of the ledger's abbreviation string.
    pub fn abbrev(self) -> &'static str {
        match self {
            Self::Disabled => "DSBL",
            Self::MasteryLevelDisabled => "MLDsbl",
            Self::NoFateAvailable => "NoFate",
            Self::NoFateNpc => "NPC",
            Self::NoFateSettings => "NoFateSetg",
            Self::NoFateAura => "NoFateAura",
            Self::TraitNoMasteryLevel => "NotAttrNoML",
            Self::NoCharges => "NoChrg",
            Self::NoUseCharges => "NoUseChrg",
            Self::NoHealRate => "NoHeal",
            Self::NoScore => "NoScore",
            Self::NotNumericNoFate => "NotNumNoFate",
            Self::NotNumericNoMasteryLevel => "NoML",
            Self::NoMissileDefense => "NoMslDef",
            Self::NoBlocking => "NoBlk",
            Self::NoCounterstrike => "NoCX",
            Self::NoModifierNoDie => "NMND",
        }
    }

    /// Look a reason up by its abbreviation (case-insensitive).
    pub fn from_abbrev(abbrev: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.abbrev().eq_ignore_ascii_case(abbrev.trim()))
    }
}

impl std::fmt::Display for DisabledReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_sources() {
        assert_eq!(ModSource::PLAYER.abbrev, "SitMod");
        assert_eq!(ModSource::OUTNUMBERED.name, "Outnumbered");
    }

    #[test]
    fn source_from_tuple() {
        let source: ModSource = ("Encumbrance", "Enc").into();
        assert_eq!(source, ModSource::new("Encumbrance", "Enc"));
        assert_eq!(source.to_string(), "Encumbrance (Enc)");
    }

    #[test]
    fn reason_abbrev_lookup() {
        assert_eq!(DisabledReason::from_abbrev("dsbl"), Some(DisabledReason::Disabled));
        assert_eq!(DisabledReason::from_abbrev("NMND"), Some(DisabledReason::NoModifierNoDie));
        assert_eq!(DisabledReason::from_abbrev("nope"), None);
    }

    #[test]
    fn reason_abbrevs_are_unique() {
        for (i, a) in DisabledReason::ALL.iter().enumerate() {
            for b in &DisabledReason::ALL[i + 1..] {
                assert_ne!(a.abbrev(), b.abbrev());
            }
        }
    }
}
