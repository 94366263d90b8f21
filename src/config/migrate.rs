use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Keys a current configuration file is expected to carry.
const EXPECTED_KEYS: [&str; 6] = [
    "database",
    "roster_file",
    "duplicate_policy",
    "regular_workday",
    "lunch_break_minutes",
    "separator_char",
];

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let yaml: Value = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;

    match yaml {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{} is not a YAML mapping",
            path.display()
        ))),
    }
}

/// Keys missing from the configuration file at `path`.
pub fn missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let map = read_mapping(path)?;
    Ok(EXPECTED_KEYS
        .iter()
        .filter(|k| !map.contains_key(Value::String(k.to_string())))
        .map(|k| k.to_string())
        .collect())
}

/// Add every missing key with its default value, keeping existing values.
/// Returns the keys that were added.
pub fn migrate_config_file(path: &Path) -> AppResult<Vec<String>> {
    let mut map = read_mapping(path)?;
    let defaults = match serde_yaml::to_value(Config::default()) {
        Ok(Value::Mapping(m)) => m,
        _ => return Err(AppError::ConfigSave),
    };

    let mut added = Vec::new();
    for key in EXPECTED_KEYS {
        let k = Value::String(key.to_string());
        if !map.contains_key(&k)
            && let Some(v) = defaults.get(&k)
        {
            map.insert(k, v.clone());
            added.push(key.to_string());
        }
    }

    if added.is_empty() {
        info("Configuration already up to date.");
        return Ok(added);
    }

    let yaml = serde_yaml::to_string(&Value::Mapping(map)).map_err(|_| AppError::ConfigSave)?;
    fs::write(path, yaml)?;

    success(format!("Configuration migrated: added {}", added.join(", ")));
    Ok(added)
}
