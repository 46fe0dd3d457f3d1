use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use recurdate_core::{Expander, RecurrenceRule, StopReason};

use crate::render::render_occurrences;

pub fn run(rule: &RecurrenceRule, expander: &Expander, json: bool) -> Result<()> {
    rule.validate()?;

    let expansion = expander.expand_detailed(rule);

    if json {
        let out = serde_json::to_string_pretty(&expansion.dates)
            .context("Failed to serialize occurrences")?;
        println!("{}", out);
        return Ok(());
    }

    println!("{}", rule.to_string().bold());
    println!("{}", render_occurrences(&expansion.dates));

    match expansion.stop {
        StopReason::Cap => {
            println!("   {}", "(more occurrences follow)".dimmed());
        }
        StopReason::Horizon => {
            let note = format!(
                "(no further matches within {} years)",
                expander.options().horizon_years
            );
            println!("   {}", note.dimmed());
        }
        _ => {}
    }

    Ok(())
}
