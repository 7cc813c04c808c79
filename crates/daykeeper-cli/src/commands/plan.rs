//! Daily plan commands.

use clap::Subcommand;
use daykeeper_core::{parse_date, Engine, PlanInput, PlanTask};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Store the plan for a date, replacing any existing plan
    Set {
        /// Plan date (YYYY-MM-DD)
        date: String,
        /// Day context (e.g. steady, hectic)
        #[arg(long, default_value = "steady")]
        context: String,
        /// Self-assessed energy level
        #[arg(long, default_value = "medium")]
        energy_level: String,
        /// Task as '<name>=<hours>'; repeatable
        #[arg(long = "task", value_name = "NAME=HOURS")]
        tasks: Vec<String>,
        /// Act as of this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        as_of: Option<String>,
    },
}

pub fn run(action: PlanAction) -> Result<(), Box<dyn std::error::Error>> {
    let engine = Engine::open()?;

    match action {
        PlanAction::Set {
            date,
            context,
            energy_level,
            tasks,
            as_of,
        } => {
            let today = super::resolve_today(as_of.as_deref())?;
            let input = PlanInput {
                date: parse_date(&date)?,
                tasks: tasks
                    .iter()
                    .map(|spec| parse_task(spec))
                    .collect::<Result<Vec<_>, _>>()?,
                context,
                energy_level,
            };
            let plan = engine.set_daily_plan(input, today)?;
            super::print_json(&plan)
        }
    }
}

fn parse_task(spec: &str) -> Result<PlanTask, Box<dyn std::error::Error>> {
    let (name, hours) = spec
        .rsplit_once('=')
        .ok_or_else(|| format!("task '{spec}' must be '<name>=<hours>'"))?;
    let estimated_time: f64 = hours
        .trim()
        .parse()
        .map_err(|_| format!("bad hour estimate in task '{spec}'"))?;
    Ok(PlanTask::new(name.trim(), estimated_time))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_hours() {
        let task = parse_task("Math homework=2.5").unwrap();
        assert_eq!(task.name, "Math homework");
        assert_eq!(task.estimated_time, 2.5);
    }

    #[test]
    fn splits_on_the_last_equals_sign() {
        let task = parse_task("Review a=b mapping=1").unwrap();
        assert_eq!(task.name, "Review a=b mapping");
        assert_eq!(task.estimated_time, 1.0);
    }

    #[test]
    fn rejects_malformed_specs() {
        assert!(parse_task("no hours here").is_err());
        assert!(parse_task("task=lots").is_err());
    }
}
