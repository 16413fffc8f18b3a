use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

pub const ENV_USER_AGENT: &str = "HOOT_USER_AGENT";
pub const ENV_DELAY: &str = "HOOT_DELAY";
pub const ENV_DB_PATH: &str = "HOOT_DB_PATH";
pub const ENV_CSV_PATH: &str = "HOOT_CSV_PATH";
pub const ENV_LOG_LEVEL: &str = "HOOT_LOG_LEVEL";

/// Loads and parses a configuration file from the given path
///
/// Sections and keys missing from the file keep their defaults.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use hoot_scraper::config::load_config;
///
/// let config = load_config(Path::new("hoot.toml")).unwrap();
/// println!("Delay: {}s", config.scraper.request_delay);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Builds the effective configuration for a run
///
/// Layers, lowest first: built-in defaults, the optional TOML file, then the
/// `HOOT_*` environment variables. The result is validated once at the end.
pub fn load_settings(path: Option<&Path>) -> Result<Config, ConfigError> {
    load_settings_with(path, |_| {})
}

/// Same as [`load_settings`], with command-line overrides applied on top of
/// the environment before the single validation pass
///
/// A value fixed by `overrides` replaces an invalid environment value instead
/// of failing on it.
pub fn load_settings_with<O>(path: Option<&Path>, overrides: O) -> Result<Config, ConfigError>
where
    O: FnOnce(&mut Config),
{
    build_settings(path, |key| std::env::var(key).ok(), overrides)
}

fn build_settings<L, O>(path: Option<&Path>, lookup: L, overrides: O) -> Result<Config, ConfigError>
where
    L: Fn(&str) -> Option<String>,
    O: FnOnce(&mut Config),
{
    let mut config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => Config::default(),
    };

    apply_env_overrides(&mut config, lookup)?;
    overrides(&mut config);
    validate(&config)?;
    Ok(config)
}

/// Applies `HOOT_*` overrides read through `lookup`
///
/// `lookup` is usually `std::env::var`; tests pass a map instead of touching
/// the process environment.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(agent) = lookup(ENV_USER_AGENT) {
        config.user_agent.identity = Some(agent);
    }

    if let Some(raw) = lookup(ENV_DELAY) {
        config.scraper.request_delay =
            raw.trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidEnv {
                    key: ENV_DELAY.to_string(),
                    value: raw.clone(),
                })?;
    }

    if let Some(path) = lookup(ENV_DB_PATH) {
        config.output.database_path = path;
    }

    if let Some(path) = lookup(ENV_CSV_PATH) {
        config.output.csv_path = path;
    }

    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        config.logging.level = level;
    }

    Ok(())
}
