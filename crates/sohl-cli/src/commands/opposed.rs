use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use sohl_mechanics::{
    MasteryLevelLedger, OpposedTest, Roller, Side, SuccessTest, TestKind, VariantConfig,
};

use crate::{RollArgs, VariantArgs};

pub fn run(
    source: (f64, &str),
    target: (f64, &str),
    variant: &VariantArgs,
    roll: &RollArgs,
) -> Result<(), String> {
    let config = super::load_variant(variant)?;
    let mut roller = super::roller(roll);

    let source_test = roll_side(source, &config, roller.as_mut())?;
    let target_test = roll_side(target, &config, roller.as_mut())?;

    let mut opposed = OpposedTest::new(source_test, target_test)
        .map_err(|e| e.to_string())?
        .with_tie_breaking_kinds(&config.tie_breaking_kinds);
    if !opposed.evaluate(roller.as_mut()) {
        return Err("opposed test has an untestable side".into());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Side", "Test", "Target", "Roll", "Result"]);
    for (side, test) in [
        (Side::Source, opposed.source()),
        (Side::Target, opposed.target()),
    ] {
        table.add_row(vec![
            side.to_string(),
            test.title.clone(),
            test.target().to_string(),
            test.roll().map_or_else(|| "-".to_string(), |r| r.to_string()),
            test.description().unwrap_or("-").to_string(),
        ]);
    }
    println!("{table}");
    println!();

    println!("  {} {}", "Victory stars:".bold(), opposed.victory_stars_text());
    match opposed.winner() {
        Some(side) => println!("  Winner: {}", side.to_string().green().bold()),
        None => println!("  Winner: {}", "none".dimmed()),
    }
    if opposed.is_tied() && opposed.breaks_ties {
        println!("  {}", "Tie broken".dimmed());
    }
    Ok(())
}

fn roll_side(
    (base, kind): (f64, &str),
    config: &VariantConfig,
    roller: &mut dyn Roller,
) -> Result<SuccessTest, String> {
    let kind: TestKind = kind.parse().map_err(|e| format!("{e}"))?;
    let mut test = SuccessTest::new(kind, MasteryLevelLedger::from_variant(base, config));
    test.evaluate(roller);
    Ok(test)
}
