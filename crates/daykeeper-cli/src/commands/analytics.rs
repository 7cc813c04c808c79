//! Analytics snapshot command.

use clap::Subcommand;
use daykeeper_core::Engine;

#[derive(Subcommand)]
pub enum AnalyticsAction {
    /// Recompute, persist, and print the analytics record
    Show {
        /// Evaluate as of this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        as_of: Option<String>,
    },
}

pub fn run(action: AnalyticsAction) -> Result<(), Box<dyn std::error::Error>> {
    let engine = Engine::open()?;

    match action {
        AnalyticsAction::Show { as_of } => {
            let today = super::resolve_today(as_of.as_deref())?;
            super::print_json(&engine.analytics_snapshot(today)?)
        }
    }
}
