//! Long-term task section commands.
//!
//! The section is owned by external tooling; the engine only round-trips
//! it, so these commands read and replace it wholesale.

use clap::Subcommand;
use daykeeper_core::Engine;

#[derive(Subcommand)]
pub enum LongtermAction {
    /// Print the long-term task section
    Show {
        #[arg(long)]
        as_of: Option<String>,
    },
    /// Replace the whole section with the given JSON object
    Edit {
        /// JSON object, e.g. '{"thesis": {"status": "drafting"}}'
        json: String,
        #[arg(long)]
        as_of: Option<String>,
    },
}

pub fn run(action: LongtermAction) -> Result<(), Box<dyn std::error::Error>> {
    let engine = Engine::open()?;

    match action {
        LongtermAction::Show { as_of } => {
            let today = super::resolve_today(as_of.as_deref())?;
            super::print_json(&engine.long_term_tasks(today)?)
        }
        LongtermAction::Edit { json, as_of } => {
            let today = super::resolve_today(as_of.as_deref())?;
            let value: serde_json::Value = serde_json::from_str(&json)?;
            super::print_json(&engine.replace_long_term_tasks(value, today)?)
        }
    }
}
