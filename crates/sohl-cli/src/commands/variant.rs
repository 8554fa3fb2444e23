use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use sohl_mechanics::VariantConfig;

use crate::VariantArgs;

pub fn run(args: &VariantArgs, json: bool) -> Result<(), String> {
    let config = match &args.config {
        Some(path) => VariantConfig::from_path(path)
            .map_err(|e| format!("failed to load {}: {e}", path.display()))?,
        None => VariantConfig::by_name(&args.variant).map_err(|e| e.to_string())?,
    };

    if json {
        let out = serde_json::to_string_pretty(&config).map_err(|e| e.to_string())?;
        println!("{out}");
    } else {
        print_config(&config);
    }

    let issues = config.validate();
    if issues.is_empty() {
        println!("  {} variant '{}' is valid", "OK".green().bold(), config.name);
        return Ok(());
    }
    for issue in &issues {
        if issue.is_error {
            eprintln!("  {}", issue.to_string().red());
        } else {
            eprintln!("  {}", issue.to_string().yellow());
        }
    }
    let errors = issues.iter().filter(|i| i.is_error).count();
    if errors > 0 {
        return Err(format!(
            "variant '{}' has {errors} error{}",
            config.name,
            if errors == 1 { "" } else { "s" }
        ));
    }
    Ok(())
}

fn join<T: ToString>(items: &[T]) -> String {
    if items.is_empty() {
        return "none".to_string();
    }
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_config(config: &VariantConfig) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Setting", "Value"]);
    table.add_row(vec!["name".to_string(), config.name.clone()]);
    table.add_row(vec![
        "target range".to_string(),
        format!("{}-{}", config.min_target, config.max_target),
    ]);
    table.add_row(vec![
        "crit success digits".to_string(),
        join(&config.crit_success_digits),
    ]);
    table.add_row(vec![
        "crit failure digits".to_string(),
        join(&config.crit_failure_digits),
    ]);
    let dice: Vec<String> = config
        .impact_dice
        .iter()
        .map(|d| if *d == 0 { "none".to_string() } else { format!("d{d}") })
        .collect();
    table.add_row(vec!["impact dice".to_string(), join(&dice)]);
    table.add_row(vec![
        "max impact dice".to_string(),
        config.max_impact_dice.to_string(),
    ]);
    let advantage: Vec<String> = config
        .aspect_tactical_advantage
        .iter()
        .map(|(aspect, bonus)| format!("{aspect} {bonus}"))
        .collect();
    table.add_row(vec!["tactical advantage".to_string(), join(&advantage)]);
    table.add_row(vec![
        "secondary modifier step".to_string(),
        config.sec_mod_increment.to_string(),
    ]);
    table.add_row(vec![
        "tie-breaking kinds".to_string(),
        join(&config.tie_breaking_kinds),
    ]);
    println!("{table}");
    println!();
}
