use colored::Colorize;
use sohl_mechanics::describe::preset;
use sohl_mechanics::{MasteryLevelLedger, SuccessTest, TestKind, TestOptions};

use crate::{RollArgs, VariantArgs};

/// Arguments for a single success test.
pub struct TestArgs<'a> {
    pub base: f64,
    pub modifiers: &'a [String],
    pub kind: &'a str,
    pub sitmod: i32,
    pub sl_mod: Option<i32>,
    pub table: Option<&'a str>,
    pub disabled: Option<&'a str>,
    pub variant: &'a VariantArgs,
    pub roll: &'a RollArgs,
}

pub fn run(args: &TestArgs<'_>) -> Result<(), String> {
    let config = super::load_variant(args.variant)?;
    let kind: TestKind = args.kind.parse().map_err(|e| format!("{e}"))?;

    let mut mastery = MasteryLevelLedger::from_variant(args.base, &config);
    super::apply_modifiers(&mut mastery.ledger, args.modifiers)?;
    if let Some(abbrev) = args.disabled {
        mastery.ledger.set_disabled(super::parse_disabled(abbrev)?);
    }
    if let Some(reason) = mastery.ledger.disabled() {
        println!("  {} {}", kind.title().bold(), "cannot be performed".red());
        println!("  Reason: {reason}");
        return Ok(());
    }

    let mut roller = super::roller(args.roll);
    let test = mastery
        .create_success_test(
            kind,
            |ml| {
                let mut options =
                    TestOptions::for_ledger(ml).with_situational_modifier(args.sitmod);
                if let Some(sl_mod) = args.sl_mod {
                    options = options.with_success_level_mod(sl_mod);
                }
                Some(options)
            },
            roller.as_mut(),
        )
        .map_err(|e| e.to_string())?
        .ok_or("test could not be rolled")?;

    let test = match args.table {
        Some(name) => {
            let table = preset::by_name(name).ok_or_else(|| {
                format!(
                    "unknown table '{name}' (expected one of: {})",
                    preset::NAMES.join(", ")
                )
            })?;
            test.with_description_table(table)
        }
        None => test,
    };

    print_test(&test);
    Ok(())
}

fn print_test(test: &SuccessTest) {
    let ledger = &test.mastery().ledger;
    println!("  {}", test.title.bold());
    let capped = if test.is_capped() { " (capped)" } else { "" };
    if ledger.abbrev().is_empty() {
        println!("  Target: {}{capped}", test.target());
    } else {
        println!("  Target: {}{capped}  [{}]", test.target(), ledger.abbrev());
    }
    if let Some(roll) = test.roll() {
        println!("  Roll: {roll}");
    }
    if let Some(description) = test.description() {
        let text = if test.is_success() {
            description.green().bold()
        } else {
            description.red().bold()
        };
        println!("  Result: {text}");
    }
    if let Some(value) = test.success_value() {
        println!("  Success value: {value}");
    }
    if let Some(detail) = test.detail() {
        println!("  {}: {}", detail.label.bold(), detail.description);
    }
}
