use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "daykeeper-cli", version, about = "Daykeeper CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Planning readiness gate
    Readiness(commands::readiness::ReadinessArgs),
    /// Daily plan management
    Plan {
        #[command(subcommand)]
        action: commands::plan::PlanAction,
    },
    /// Completion reports, holidays, absences
    Report {
        #[command(subcommand)]
        action: commands::report::ReportAction,
    },
    /// Analytics snapshot
    Analytics {
        #[command(subcommand)]
        action: commands::analytics::AnalyticsAction,
    },
    /// Semester phase management
    Phase {
        #[command(subcommand)]
        action: commands::phase::PhaseAction,
    },
    /// Day-off permissibility scoring
    Dayoff {
        #[command(subcommand)]
        action: commands::dayoff::DayoffAction,
    },
    /// Long-term task section (owned by external tooling)
    Longterm {
        #[command(subcommand)]
        action: commands::longterm::LongtermAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Readiness(args) => commands::readiness::run(args),
        Commands::Plan { action } => commands::plan::run(action),
        Commands::Report { action } => commands::report::run(action),
        Commands::Analytics { action } => commands::analytics::run(action),
        Commands::Phase { action } => commands::phase::run(action),
        Commands::Dayoff { action } => commands::dayoff::run(action),
        Commands::Longterm { action } => commands::longterm::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
