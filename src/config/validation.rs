use crate::config::types::{Config, CrawlerConfig, HttpConfig};
use crate::url::is_valid_absolute_url;
use crate::ConfigError;

/// Upper bound on concurrency slots
pub const MAX_CONCURRENCY_LIMIT: usize = 1024;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_http_config(&config.http)?;
    Ok(())
}

/// Validates the seed URL given on the command line
///
/// The seed must carry both a scheme and a host; anything else aborts the run
/// before any request is made.
pub fn validate_seed(seed: &str) -> Result<(), ConfigError> {
    if !is_valid_absolute_url(seed) {
        return Err(ConfigError::InvalidUrl(format!(
            "'{}' is not a valid absolute URL",
            seed
        )));
    }
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    // Zero is allowed: every child visit then runs inline
    if config.max_concurrency > MAX_CONCURRENCY_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max_concurrency must be between 0 and {}, got {}",
            MAX_CONCURRENCY_LIMIT, config.max_concurrency
        )));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_max_pages() {
        let mut config = Config::default();
        config.crawler.max_pages = 0;
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    fn test_validate_max_concurrency() {
        let mut config = Config::default();
        config.crawler.max_concurrency = 0;
        assert!(validate(&config).is_ok());

        config.crawler.max_concurrency = MAX_CONCURRENCY_LIMIT + 1;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_http_config() {
        let mut config = Config::default();
        config.http.user_agent = "   ".to_string();
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.http.request_timeout_secs = Some(0);
        assert!(validate(&config).is_err());

        config.http.request_timeout_secs = Some(10);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_seed() {
        assert!(validate_seed("https://blog.boot.dev").is_ok());
        assert!(validate_seed("http://localhost:8080/docs/").is_ok());

        assert!(validate_seed("blog.boot.dev").is_err());
        assert!(validate_seed("/path/only").is_err());
        assert!(validate_seed("mailto:someone@example.com").is_err());
        assert!(validate_seed("").is_err());
    }
}
