//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override
//! earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.wakeel/config.toml`
//! 3. **Project config** - `./.wakeel/config.toml`
//!
//! Files are merged at the TOML table level, so a project file can override
//! a single key without restating whole sections.

use std::fs;
use std::path::Path;

use crate::errors::ConfigError;
use crate::paths::WakeelPaths;
use crate::types::WakeelConfig;
use crate::validation::validate_config;

/// Load configuration from the hierarchy of config files.
///
/// Missing config files are not errors; parse and validation failures are.
pub fn load_hierarchy() -> Result<WakeelConfig, ConfigError> {
    let mut merged = toml::Table::new();

    let paths = WakeelPaths::resolve()?;
    if let Some(user) = load_config_table(&paths.user_config())? {
        merge_tables(&mut merged, user);
    }

    let project_root = std::env::current_dir()?;
    if let Some(project) = load_config_table(&WakeelPaths::project_config(&project_root))? {
        merge_tables(&mut merged, project);
    }

    let config: WakeelConfig =
        toml::Value::Table(merged)
            .try_into()
            .map_err(|e| ConfigError::ConfigParseError {
                message: e.to_string(),
            })?;

    validate_config(&config)?;
    Ok(config)
}

/// Load a single config file as a raw TOML table.
///
/// Returns `Ok(None)` if the file does not exist.
fn load_config_table(path: &Path) -> Result<Option<toml::Table>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ConfigError::IoError { source: e }),
    };

    let table: toml::Table =
        toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
            message: format!("{}: {}", path.display(), e),
        })?;
    Ok(Some(table))
}

/// Deep-merge `overlay` into `base`. Tables merge recursively; any other
/// value in the overlay replaces the base value.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(base_table)), toml::Value::Table(overlay_table)) => {
                merge_tables(base_table, overlay_table);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_overrides_scalar_inside_table() {
        let mut base: toml::Table =
            toml::from_str("[monitor]\nmin_run_interval_secs = 300\nmax_ticket_age_hours = 24\n")
                .unwrap();
        let overlay: toml::Table =
            toml::from_str("[monitor]\nmin_run_interval_secs = 600\n").unwrap();

        merge_tables(&mut base, overlay);

        let merged: WakeelConfig = toml::Value::Table(base).try_into().unwrap();
        assert_eq!(merged.monitor.min_run_interval_secs, 600);
        assert_eq!(merged.monitor.max_ticket_age_hours, 24);
    }

    #[test]
    fn empty_hierarchy_yields_defaults() {
        let config: WakeelConfig = toml::Value::Table(toml::Table::new()).try_into().unwrap();
        assert_eq!(config, WakeelConfig::default());
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let result = load_config_table(Path::new("/nonexistent/wakeel/config.toml"));
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn parse_error_is_reported_with_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "this is not toml [[").unwrap();

        let err = load_config_table(&path).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }
}
