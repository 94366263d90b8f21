use crate::core::calculator::shift::ShiftRules;
use crate::core::validator::DuplicatePolicy;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

pub mod migrate; // use submodule at src/config/migrate.rs

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_roster_file")]
    pub roster_file: String,
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
    #[serde(default = "default_regular_workday")]
    pub regular_workday: String,
    #[serde(default = "default_lunch")]
    pub lunch_break_minutes: i64,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_roster_file() -> String {
    Config::config_dir()
        .join("roster.csv")
        .to_string_lossy()
        .to_string()
}
fn default_regular_workday() -> String {
    "8h".to_string()
}
fn default_lunch() -> i64 {
    60
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            roster_file: default_roster_file(),
            duplicate_policy: DuplicatePolicy::default(),
            regular_workday: default_regular_workday(),
            lunch_break_minutes: default_lunch(),
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rmontaje")
        } else {
            let home = dirs::home_dir()
                .or_else(|| env::var("HOME").ok().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from("."));
            home.join(".rmontaje")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rmontaje.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rmontaje.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    pub fn save(&self) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        fs::create_dir_all(Self::config_dir())?;
        let mut file = fs::File::create(Self::config_file())?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Lunch and regular-day settings for shift closing.
    pub fn shift_rules(&self) -> ShiftRules {
        ShiftRules {
            lunch_minutes: self.lunch_break_minutes.max(0),
            regular_minutes: parse_work_duration_to_minutes(&self.regular_workday)
                .unwrap_or(8 * 60),
        }
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> io::Result<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            dir.join("rmontaje.sqlite")
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Default::default()
        };

        if !is_test {
            config.save().map_err(|e| io::Error::other(e.to_string()))?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(db_path)
    }
}

/// "8h", "7h30m", "450m" or plain minutes.
pub fn parse_work_duration_to_minutes(s: &str) -> Option<i64> {
    let s = s.trim().to_lowercase();
    if let Ok(m) = s.parse::<i64>() {
        return Some(m);
    }

    let (hours, rest) = match s.split_once('h') {
        Some((h, rest)) => (h.trim().parse::<i64>().ok()?, rest.trim()),
        None => (0, s.as_str()),
    };

    let minutes = match rest.strip_suffix('m') {
        Some(m) => m.trim().parse::<i64>().ok()?,
        None if rest.is_empty() => 0,
        None => return None,
    };

    Some(hours * 60 + minutes)
}
