use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use sohl_mechanics::{Ledger, ResolvedLedger};

pub fn run(
    base: Option<f64>,
    modifiers: &[String],
    disabled: Option<&str>,
    json: bool,
) -> Result<(), String> {
    let mut ledger = base.map(Ledger::new).unwrap_or_default();
    super::apply_modifiers(&mut ledger, modifiers)?;
    if let Some(abbrev) = disabled {
        ledger.set_disabled(super::parse_disabled(abbrev)?);
    }

    let resolved = ledger.resolve();
    if json {
        let out = serde_json::to_string_pretty(&resolved).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    print_entries(&resolved);
    print_summary(&resolved);
    Ok(())
}

fn print_entries(resolved: &ResolvedLedger) {
    if resolved.entries.is_empty() {
        println!("  No modifiers.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Source", "Abbrev", "Op", "Value"]);
    for entry in &resolved.entries {
        table.add_row(vec![
            entry.source.name.to_string(),
            entry.abbrev().to_string(),
            entry.operator.to_string(),
            entry.value.to_string(),
        ]);
    }
    println!("{table}");
    println!();
}

fn print_summary(resolved: &ResolvedLedger) {
    let base = resolved
        .base
        .map_or_else(|| "unset".to_string(), |b| b.to_string());
    println!("  {} {base}", "Base:".bold());
    println!("  {} {}", "Effective:".bold(), resolved.effective);
    println!("  {} {}", "Modifier:".bold(), resolved.modifier);
    println!("  {} {}", "Index:".bold(), resolved.index);
    if !resolved.abbrev.is_empty() {
        println!("  {} {}", "Abbrev:".bold(), resolved.abbrev);
    }
    if let Some(reason) = resolved.disabled {
        println!("  {} {reason}", "Disabled:".red().bold());
    }
}
