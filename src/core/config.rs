use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, success, warning};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    /// Print the effective configuration (file values plus CLI overrides).
    pub fn print(cfg: &Config) -> AppResult<()> {
        let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
        println!("📄 Current configuration:\n");
        println!("{}", yaml);
        Ok(())
    }

    /// Open the configuration file in the requested editor, falling back to
    /// $EDITOR / $VISUAL / a platform default.
    pub fn edit(path: &Path, editor: &Option<String>) -> AppResult<()> {
        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

        match Command::new(&editor_to_use).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!("Configuration file edited using '{editor_to_use}'"));
                return Ok(());
            }
            _ => warning(format!(
                "Editor '{editor_to_use}' not available, falling back to '{default_editor}'"
            )),
        }

        match Command::new(&default_editor).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!(
                    "Configuration file edited using fallback '{default_editor}'"
                ));
                Ok(())
            }
            _ => {
                error(format!(
                    "Failed to edit configuration file using fallback '{default_editor}'"
                ));
                Err(AppError::Config("no usable editor".into()))
            }
        }
    }
}
