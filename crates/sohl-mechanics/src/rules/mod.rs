//! Rule variants: the knobs that differ between editions.
//!
//! A [`VariantConfig`] carries the target range, critical digits, allowed
//! impact dice and tie-breaking rules for one edition. It can be loaded
//! from JSON via [`VariantConfig::from_path`] or built from the presets in
//! [`preset`].

pub mod preset;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SohlError, SohlResult};
use crate::ledger::Aspect;
use crate::resolution::TestKind;
use crate::validate::{ValidationIssue, validate_variant};

/// Edition-specific rule parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantConfig {
    /// Variant name (e.g., "core", "legendary").
    pub name: String,
    /// Lowest usable roll target.
    pub min_target: i32,
    /// Highest usable roll target.
    pub max_target: i32,
    /// Last digits that make a success critical.
    pub crit_success_digits: Vec<u8>,
    /// Last digits that make a failure critical.
    pub crit_failure_digits: Vec<u8>,
    /// Allowed impact die sizes; 0 means "no die".
    pub impact_dice: Vec<u32>,
    /// Most dice a single impact may roll.
    pub max_impact_dice: u32,
    /// Tactical advantage granted per impact aspect.
    pub aspect_tactical_advantage: BTreeMap<Aspect, i32>,
    /// Step size for secondary modifiers.
    pub sec_mod_increment: i32,
    /// Test kinds that always break ties in opposed tests.
    pub tie_breaking_kinds: Vec<TestKind>,
}

impl Default for VariantConfig {
    fn default() -> Self {
        preset::core()
    }
}

impl VariantConfig {
    /// Parse a variant from JSON. Missing fields take the core defaults.
    pub fn from_json_str(json: &str) -> SohlResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a variant from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> SohlResult<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading variant");
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Look up a built-in variant by name.
    pub fn by_name(name: &str) -> SohlResult<Self> {
        preset::by_name(name).ok_or_else(|| {
            SohlError::InvalidConfig(format!(
                "unknown variant '{name}' (expected one of: {})",
                preset::NAMES.join(", ")
            ))
        })
    }

    /// Set the roll target range.
    pub fn with_target_range(mut self, min: i32, max: i32) -> Self {
        self.min_target = min;
        self.max_target = max;
        self
    }

    /// Set the critical digit sets.
    pub fn with_crit_digits(mut self, success: &[u8], failure: &[u8]) -> Self {
        self.crit_success_digits = success.to_vec();
        self.crit_failure_digits = failure.to_vec();
        self
    }

    /// Returns true if impact dice of this size are allowed.
    pub fn allows_die(&self, sides: u32) -> bool {
        self.impact_dice.contains(&sides)
    }

    /// Returns true if an impact may roll `count` dice.
    pub fn allows_dice_count(&self, count: u32) -> bool {
        count <= self.max_impact_dice
    }

    /// Returns true if opposed tests of this kind always break ties.
    pub fn breaks_ties(&self, kind: TestKind) -> bool {
        self.tie_breaking_kinds.contains(&kind)
    }

    /// Check the variant for inconsistencies.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        validate_variant(self)
    }
}
