use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::migrate::{migrate_config_file, missing_keys};
use crate::core::config::ConfigLogic;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            ConfigLogic::print(cfg)?;
        }

        if (*check || *migrate || *edit_config) && !path.exists() {
            return Err(AppError::Config(format!(
                "{} does not exist, run `rmontaje init` first",
                path.display()
            )));
        }

        if *check {
            let missing = missing_keys(&path)?;
            if missing.is_empty() {
                success("Configuration file is complete.");
            } else {
                warning(format!("Missing keys: {}", missing.join(", ")));
                info("Run `rmontaje config --migrate` to add them with default values.");
            }
        }

        if *migrate {
            migrate_config_file(&path)?;
        }

        if *edit_config {
            ConfigLogic::edit(&path, editor)?;
        }
    }

    Ok(())
}
