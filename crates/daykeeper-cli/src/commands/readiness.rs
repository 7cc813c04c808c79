//! Readiness gate command.

use clap::Args;
use daykeeper_core::Engine;

#[derive(Args)]
pub struct ReadinessArgs {
    /// Evaluate as of this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    pub as_of: Option<String>,
}

pub fn run(args: ReadinessArgs) -> Result<(), Box<dyn std::error::Error>> {
    let today = super::resolve_today(args.as_of.as_deref())?;
    let engine = Engine::open()?;
    super::print_json(&engine.check_readiness(today)?)
}
