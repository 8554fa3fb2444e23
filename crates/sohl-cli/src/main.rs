//! CLI frontend for the Song of Heroic Lands modifier and resolution engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sohl",
    about = "Song of Heroic Lands: modifier ledgers and test resolution",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine decisions to stderr (overrides SOHL_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Rule variant selection shared by several commands.
#[derive(Args)]
struct VariantArgs {
    /// Built-in variant name (core, legendary)
    #[arg(long, default_value = "core")]
    variant: String,

    /// Load the variant from a JSON file instead
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Dice source shared by every rolling command.
#[derive(Args)]
struct RollArgs {
    /// Fixed die results, consumed in order (e.g. --roll 30,72)
    #[arg(long = "roll", value_delimiter = ',')]
    rolls: Vec<u32>,

    /// RNG seed used when no fixed results are given
    #[arg(short, long, default_value = "42")]
    seed: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a modifier ledger and show its entries
    Ledger {
        /// Base value (omit for an unset base)
        #[arg(short, long, allow_negative_numbers = true)]
        base: Option<f64>,

        /// Modifier as NAME:ABBREV:OPERATOR:VALUE (repeatable)
        #[arg(short, long = "modifier")]
        modifiers: Vec<String>,

        /// Disable the ledger with a reason abbreviation (e.g. DSBL, NoScore)
        #[arg(long)]
        disabled: Option<String>,

        /// Print the resolved ledger as JSON
        #[arg(long)]
        json: bool,
    },

    /// Roll a d100 success test against a mastery level
    Test {
        /// Mastery level base
        #[arg(short, long, allow_negative_numbers = true)]
        base: f64,

        /// Modifier as NAME:ABBREV:OPERATOR:VALUE (repeatable)
        #[arg(short, long = "modifier")]
        modifiers: Vec<String>,

        /// Test kind (skill, attribute, dodge, block, morale, ...)
        #[arg(short, long, default_value = "skill")]
        kind: String,

        /// Situational modifier added by the player
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        sitmod: i32,

        /// Success level shift applied to marginal results
        #[arg(long, allow_negative_numbers = true)]
        sl_mod: Option<i32>,

        /// Description table for the outcome (morale, fear, fate, ...)
        #[arg(short, long)]
        table: Option<String>,

        /// Disable the mastery level with a reason abbreviation
        #[arg(long)]
        disabled: Option<String>,

        #[command(flatten)]
        variant: VariantArgs,

        #[command(flatten)]
        roll: RollArgs,
    },

    /// Roll an opposed test between two mastery levels
    Opposed {
        /// Source mastery level
        #[arg(long, allow_negative_numbers = true)]
        source: f64,

        /// Target mastery level
        #[arg(long, allow_negative_numbers = true)]
        target: f64,

        /// Source test kind
        #[arg(long, default_value = "skill")]
        source_kind: String,

        /// Target test kind
        #[arg(long, default_value = "skill")]
        target_kind: String,

        #[command(flatten)]
        variant: VariantArgs,

        #[command(flatten)]
        roll: RollArgs,
    },

    /// Roll damage for an impact
    Impact {
        /// Modifier added to the dice
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        base: f64,

        /// Number of dice
        #[arg(short = 'n', long, default_value = "1")]
        dice: u32,

        /// Die size (0 for none)
        #[arg(short, long, default_value = "6")]
        die: u32,

        /// Impact aspect (blunt, edged, piercing, fire, ...)
        #[arg(short, long, default_value = "blunt")]
        aspect: String,

        /// Modifier as NAME:ABBREV:OPERATOR:VALUE (repeatable)
        #[arg(short, long = "modifier")]
        modifiers: Vec<String>,

        #[command(flatten)]
        variant: VariantArgs,

        #[command(flatten)]
        roll: RollArgs,
    },

    /// Show and validate a rule variant
    Variant {
        #[command(flatten)]
        variant: VariantArgs,

        /// Print the variant as JSON
        #[arg(long)]
        json: bool,
    },

    /// Look up a description table
    Describe {
        /// Table name (omit to list tables)
        table: Option<String>,

        /// Value to classify (success level, success value or raw value)
        #[arg(allow_negative_numbers = true)]
        value: Option<i32>,

        /// Last digit of the roll, for digit-refined entries
        #[arg(long)]
        digit: Option<u8>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("SOHL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Ledger {
            base,
            modifiers,
            disabled,
            json,
        } => commands::ledger::run(base, &modifiers, disabled.as_deref(), json),
        Commands::Test {
            base,
            modifiers,
            kind,
            sitmod,
            sl_mod,
            table,
            disabled,
            variant,
            roll,
        } => commands::test::run(&commands::test::TestArgs {
            base,
            modifiers: &modifiers,
            kind: &kind,
            sitmod,
            sl_mod,
            table: table.as_deref(),
            disabled: disabled.as_deref(),
            variant: &variant,
            roll: &roll,
        }),
        Commands::Opposed {
            source,
            target,
            source_kind,
            target_kind,
            variant,
            roll,
        } => commands::opposed::run(
            (source, &source_kind),
            (target, &target_kind),
            &variant,
            &roll,
        ),
        Commands::Impact {
            base,
            dice,
            die,
            aspect,
            modifiers,
            variant,
            roll,
        } => commands::impact::run(base, dice, die, &aspect, &modifiers, &variant, &roll),
        Commands::Variant { variant, json } => commands::variant::run(&variant, json),
        Commands::Describe {
            table,
            value,
            digit,
        } => commands::describe::run(table.as_deref(), value, digit),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
