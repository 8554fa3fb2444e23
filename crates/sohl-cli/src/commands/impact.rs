use colored::Colorize;
use sohl_mechanics::{Aspect, ImpactResult, LedgerFactory};

use crate::{RollArgs, VariantArgs};

pub fn run(
    base: f64,
    dice: u32,
    die: u32,
    aspect: &str,
    modifiers: &[String],
    variant: &VariantArgs,
    roll: &RollArgs,
) -> Result<(), String> {
    let config = super::load_variant(variant)?;
    let aspect: Aspect = aspect.parse().map_err(|e| format!("{e}"))?;
    let factory = LedgerFactory::new(config);

    let mut impact = factory
        .impact(base, dice, die, aspect)
        .map_err(|e| e.to_string())?;
    super::apply_modifiers(&mut impact.ledger, modifiers)?;

    println!("  {} {} ({aspect})", "Impact:".bold(), impact.label());
    println!("  Median: {}", impact.median());
    let advantage = impact.tactical_advantage(factory.config());
    if advantage != 0 {
        println!("  Tactical advantage: {advantage}");
    }

    let mut result = ImpactResult::new(impact);
    let mut roller = super::roller(roll);
    if !result.evaluate(roller.as_mut()) {
        let reason = result
            .impact()
            .disabled()
            .map_or_else(|| "not rolled".to_string(), |r| r.to_string());
        println!("  {} {reason}", "No damage:".red());
        return Ok(());
    }

    if let Some(dice_roll) = result.roll().filter(|r| !r.dice.is_empty()) {
        println!("  Roll: {dice_roll}");
    }
    if let Some(total) = result.total() {
        println!("  {} {}", "Total:".bold(), total.to_string().green().bold());
    }
    Ok(())
}
