use crate::config::types::Config;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.root_urls.is_empty() {
        return Err(ConfigError::Validation(
            "root_urls must contain at least one URL".to_string(),
        ));
    }

    for root in &config.root_urls {
        Url::parse(root).map_err(|e| {
            ConfigError::Validation(format!("Invalid root URL '{}': {}", root, e))
        })?;
    }

    if config.user_agents.is_empty() {
        return Err(ConfigError::Validation(
            "user_agents must contain at least one identity string".to_string(),
        ));
    }

    // The jitter is drawn from the half-open range [min_sleep, max_sleep)
    if config.min_sleep >= config.max_sleep {
        return Err(ConfigError::Validation(format!(
            "min_sleep ({}) must be less than max_sleep ({})",
            config.min_sleep, config.max_sleep
        )));
    }

    if config.timeout == Some(0) {
        return Err(ConfigError::Validation(
            "timeout must be greater than zero, or false to disable".to_string(),
        ));
    }

    Ok(())
}
