//! Day-off permissibility command.

use clap::Subcommand;
use daykeeper_core::Engine;

#[derive(Subcommand)]
pub enum DayoffAction {
    /// Score whether a day off is permissible right now
    Check {
        /// Evaluate as of this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        as_of: Option<String>,
    },
}

pub fn run(action: DayoffAction) -> Result<(), Box<dyn std::error::Error>> {
    let engine = Engine::open()?;

    match action {
        DayoffAction::Check { as_of } => {
            let today = super::resolve_today(as_of.as_deref())?;
            super::print_json(&engine.assess_day_off(today)?)
        }
    }
}
