pub mod describe;
pub mod impact;
pub mod ledger;
pub mod opposed;
pub mod test;
pub mod variant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use sohl_mechanics::{DisabledReason, Ledger, ModifierRequest, Roller, ScriptedRoller, VariantConfig};

use crate::{RollArgs, VariantArgs};

/// Dice source for a command: fixed results if given, else a seeded RNG.
fn roller(args: &RollArgs) -> Box<dyn Roller> {
    if args.rolls.is_empty() {
        tracing::debug!(seed = args.seed, "rolling with seeded rng");
        Box::new(StdRng::seed_from_u64(args.seed))
    } else {
        Box::new(ScriptedRoller::new(args.rolls.iter().copied()))
    }
}

/// Load the selected variant and log any validation warnings.
fn load_variant(args: &VariantArgs) -> Result<VariantConfig, String> {
    let config = match &args.config {
        Some(path) => VariantConfig::from_path(path)
            .map_err(|e| format!("failed to load {}: {e}", path.display()))?,
        None => VariantConfig::by_name(&args.variant).map_err(|e| e.to_string())?,
    };
    for issue in config.validate() {
        if issue.is_error {
            return Err(format!("variant '{}': {issue}", config.name));
        }
        tracing::warn!(variant = %config.name, "{issue}");
    }
    Ok(config)
}

/// Apply `NAME:ABBREV:OPERATOR:VALUE` modifiers to a ledger in order.
fn apply_modifiers(ledger: &mut Ledger, modifiers: &[String]) -> Result<(), String> {
    for text in modifiers {
        let request: ModifierRequest = text.parse().map_err(|e| format!("{e}"))?;
        ledger.apply(request).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Parse a disabled-reason abbreviation.
fn parse_disabled(abbrev: &str) -> Result<DisabledReason, String> {
    DisabledReason::from_abbrev(abbrev).ok_or_else(|| {
        let known: Vec<&str> = DisabledReason::ALL.iter().map(|r| r.abbrev()).collect();
        format!(
            "unknown disabled reason '{abbrev}' (expected one of: {})",
            known.join(", ")
        )
    })
}
