//! Built-in rule variants.

use std::collections::BTreeMap;

use crate::ledger::Aspect;
use crate::resolution::TestKind;
use crate::rules::VariantConfig;

/// Names accepted by [`by_name`].
pub const NAMES: &[&str] = &["core", "legendary"];

/// Look up a built-in variant by name (case-insensitive).
pub fn by_name(name: &str) -> Option<VariantConfig> {
    match name.to_ascii_lowercase().as_str() {
        "core" => Some(core()),
        "legendary" => Some(legendary()),
        _ => None,
    }
}

/// The core rules.
///
/// Targets are clamped to 5-95 and a last digit of 0 or 5 makes a result
/// critical. There is no tactical advantage table.
pub fn core() -> VariantConfig {
    VariantConfig {
        name: "core".to_string(),
        min_target: 5,
        max_target: 95,
        crit_success_digits: vec![0, 5],
        crit_failure_digits: vec![0, 5],
        impact_dice: vec![0, 4, 6, 8, 10, 12, 20],
        max_impact_dice: 20,
        aspect_tactical_advantage: BTreeMap::new(),
        sec_mod_increment: 5,
        tie_breaking_kinds: vec![TestKind::Skill, TestKind::Dodge],
    }
}

/// The Legendary edition.
///
/// Impact dice are limited to d4-d12, and each physical aspect grants a
/// fixed tactical advantage.
pub fn legendary() -> VariantConfig {
    VariantConfig {
        name: "legendary".to_string(),
        impact_dice: vec![0, 4, 6, 8, 10, 12],
        aspect_tactical_advantage: BTreeMap::from([
            (Aspect::Blunt, 3),
            (Aspect::Edged, 5),
            (Aspect::Piercing, 4),
            (Aspect::Fire, 2),
        ]),
        ..core()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate_cleanly() {
        for name in NAMES {
            let config = by_name(name).unwrap();
            assert_eq!(config.name, *name);
            assert!(config.validate().is_empty(), "{name} has issues");
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(by_name("Legendary").is_some());
        assert!(by_name("3e").is_none());
    }

    #[test]
    fn legendary_table() {
        let config = legendary();
        assert_eq!(config.aspect_tactical_advantage.len(), 4);
        assert_eq!(config.aspect_tactical_advantage[&Aspect::Piercing], 4);
        assert_eq!(config.min_target, 5);
        assert!(config.breaks_ties(TestKind::Dodge));
        assert!(!config.breaks_ties(TestKind::Block));
    }
}
