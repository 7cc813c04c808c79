//! Configuration commands.

use clap::Subcommand;
use daykeeper_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current configuration
    Show,
    /// Point the journal at a different file
    SetJournal {
        /// Absolute path of the journal file
        path: std::path::PathBuf,
    },
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            super::print_json(&config)
        }
        ConfigAction::SetJournal { path } => {
            let mut config = Config::load()?;
            config.storage.journal_path = Some(path);
            config.save()?;
            println!("ok");
            Ok(())
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            println!("config reset to defaults");
            Ok(())
        }
    }
}
