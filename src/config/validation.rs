use crate::config::types::{non_empty, Config};
use crate::url::normalize_url;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_credentials(config)?;
    validate_limits(config)?;
    validate_word_lengths(config)?;

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Both halves of basic auth must be given together
fn validate_credentials(config: &Config) -> Result<(), ConfigError> {
    match (non_empty(&config.user), non_empty(&config.pass)) {
        (Some(_), None) | (None, Some(_)) => Err(ConfigError::PartialCredentials),
        _ => Ok(()),
    }
}

/// Validates concurrency and timing limits
fn validate_limits(config: &Config) -> Result<(), ConfigError> {
    if config.threads < 1 {
        return Err(ConfigError::Validation(format!(
            "threads must be >= 1, got {}",
            config.threads
        )));
    }

    if config.timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout must be >= 1s, got {}s",
            config.timeout
        )));
    }

    Ok(())
}

/// The accepted length window (min, max) must not be empty
fn validate_word_lengths(config: &Config) -> Result<(), ConfigError> {
    if config.min_length >= config.max_length {
        return Err(ConfigError::Validation(format!(
            "min_length must be less than max_length, got {} and {}",
            config.min_length, config.max_length
        )));
    }

    Ok(())
}

/// Parses and validates the seed URL
///
/// # Returns
///
/// * `Ok(Url)` - The normalized seed
/// * `Err(ConfigError::MissingSeed)` - No seed was given
/// * `Err(ConfigError::InvalidSeed)` - The seed is not an absolute http(s) URL
pub fn parse_seed_url(seed: Option<&str>) -> Result<Url, ConfigError> {
    let seed = seed.map(str::trim).filter(|s| !s.is_empty());
    let seed = seed.ok_or(ConfigError::MissingSeed)?;
    Ok(normalize_url(seed)?)
}
