//! Semester phase command.

use clap::Subcommand;
use daykeeper_core::{Engine, SemesterPhase};

#[derive(Subcommand)]
pub enum PhaseAction {
    /// Set the current semester phase
    Set {
        /// One of: early_semester, mid_semester, late_semester,
        /// finals_period, semester_break
        phase: String,
        /// Act as of this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        as_of: Option<String>,
    },
}

pub fn run(action: PhaseAction) -> Result<(), Box<dyn std::error::Error>> {
    let engine = Engine::open()?;

    match action {
        PhaseAction::Set { phase, as_of } => {
            let today = super::resolve_today(as_of.as_deref())?;
            let phase: SemesterPhase = phase.parse()?;
            engine.set_semester_phase(phase, today)?;
            super::print_json(&serde_json::json!({
                "status": "success",
                "new_phase": phase,
            }))
        }
    }
}
