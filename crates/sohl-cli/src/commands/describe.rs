use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use sohl_mechanics::LookupContext;
use sohl_mechanics::describe::preset;

pub fn run(table: Option<&str>, value: Option<i32>, digit: Option<u8>) -> Result<(), String> {
    let Some(name) = table else {
        let mut listing = Table::new();
        listing.set_content_arrangement(ContentArrangement::Dynamic);
        listing.set_header(vec!["Table", "Keyed by", "Ranges"]);
        for name in preset::NAMES {
            if let Some(t) = preset::by_name(name) {
                listing.add_row(vec![
                    name.to_string(),
                    format!("{:?}", t.key),
                    t.entries().len().to_string(),
                ]);
            }
        }
        println!("{listing}");
        return Ok(());
    };

    let table = preset::by_name(name).ok_or_else(|| {
        format!(
            "unknown table '{name}' (expected one of: {})",
            preset::NAMES.join(", ")
        )
    })?;
    let value = value.ok_or("a value is required")?;

    let ctx = LookupContext {
        value,
        last_digit: digit.unwrap_or(value.rem_euclid(10) as u8),
        success_level: value,
        success_value: value,
    };
    let Some(found) = table.lookup(&ctx) else {
        println!("  No description for {value} in {}.", table.name);
        return Ok(());
    };

    println!("  {}", found.label.bold());
    if !found.description.is_empty() {
        println!("  {}", found.description);
    }
    let outcome = if found.success {
        "success".green()
    } else {
        "failure".red()
    };
    println!("  Outcome: {outcome}");
    println!("  Result: {}", found.result);
    Ok(())
}
