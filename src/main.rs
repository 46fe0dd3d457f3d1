mod commands;
mod render;
mod rule_args;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use recurdate_core::constants::DEFAULT_LOG_LEVEL;
use recurdate_core::{ExpandOptions, Expander, Settings};
use tracing_subscriber::EnvFilter;

use crate::rule_args::RuleArgs;

#[derive(Parser)]
#[command(name = "recurdate")]
#[command(about = "Preview recurring dates as a list or on a month grid")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the next occurrences of a rule
    Preview {
        #[command(flatten)]
        rule: RuleArgs,

        /// Maximum number of occurrences to show (overrides config)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print occurrences as a JSON array of dates
        #[arg(long)]
        json: bool,
    },
    /// Show a month grid with occurrences highlighted
    Grid {
        #[command(flatten)]
        rule: RuleArgs,

        /// Month to show: YYYY-MM, "next" or "prev" (defaults to the start date's month)
        #[arg(long)]
        view: Option<String>,
    },
    /// Validate a rule without expanding it
    Check {
        #[command(flatten)]
        rule: RuleArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load()?;
    init_tracing(&settings.log_level);
    tracing::debug!(settings = ?settings, "Settings loaded");

    let today = Local::now().date_naive();
    let options = settings.expand_options();

    match cli.command {
        Commands::Preview { rule, limit, json } => {
            let rule = rule.into_rule(today)?;
            tracing::debug!(rule = %rule, "Previewing rule");
            let expander = Expander::new(ExpandOptions {
                max_occurrences: limit.unwrap_or(options.max_occurrences),
                ..options
            });
            commands::preview::run(&rule, &expander, json)
        }
        Commands::Grid { rule, view } => {
            let rule = rule.into_rule(today)?;
            tracing::debug!(rule = %rule, view = ?view, "Drawing month grid");
            commands::grid::run(&rule, &Expander::new(options), view.as_deref())
        }
        Commands::Check { rule } => {
            let rule = rule.into_rule(today)?;
            tracing::debug!(rule = %rule, "Checking rule");
            commands::check::run(&rule)
        }
    }
}

/// Log to stderr; RUST_LOG wins over the configured level.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
