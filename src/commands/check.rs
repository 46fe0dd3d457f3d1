use anyhow::Result;
use owo_colors::OwoColorize;
use recurdate_core::RecurrenceRule;

pub fn run(rule: &RecurrenceRule) -> Result<()> {
    match rule.validate() {
        Ok(()) => {
            println!("{} {}", "✓".green(), rule);
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "✗".red(), rule);
            Err(e.into())
        }
    }
}
