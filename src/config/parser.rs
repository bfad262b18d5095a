use crate::config::types::Config;
use crate::ConfigError;
use std::path::Path;

/// Loads a configuration file from the given path
///
/// Validation is deferred to [`crate::config::CrawlBudget::from_config`] so
/// command-line overrides can be applied first.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded configuration
/// * `Err(ConfigError)` - Failed to read or parse the file
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use wordsmith::config::load_config;
///
/// let config = load_config(Path::new("wordsmith.toml")).unwrap();
/// println!("Max depth: {}", config.depth);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}
