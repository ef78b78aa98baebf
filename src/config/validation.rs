use crate::config::types::{Config, CrawlConfig, HttpConfig, OutputConfig, SelectorConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_http_config(&config.http)?;
    validate_selector_config(&config.selectors)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the crawl loop configuration
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if !config.page_url.contains("{page}") {
        return Err(ConfigError::Validation(format!(
            "page-url must contain a {{page}} placeholder, got '{}'",
            config.page_url
        )));
    }

    // The template must produce a fetchable URL once the placeholder is filled
    let sample = config.page_url.replace("{page}", "1");
    let parsed = Url::parse(&sample)
        .map_err(|e| ConfigError::InvalidUrl(format!("page-url '{}': {}", config.page_url, e)))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "page-url must be http or https, got scheme '{}'",
            parsed.scheme()
        )));
    }

    if config.max_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "max-attempts must be >= 1, got {}",
            config.max_attempts
        )));
    }

    if config.fallback_max_page < 1 {
        return Err(ConfigError::Validation(format!(
            "fallback-max-page must be >= 1, got {}",
            config.fallback_max_page
        )));
    }

    Ok(())
}

/// Validates the HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_ms < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-ms must be >= 1, got {}",
            config.timeout_ms
        )));
    }

    Ok(())
}

/// Validates that every configured selector compiles
fn validate_selector_config(config: &SelectorConfig) -> Result<(), ConfigError> {
    let selectors = [
        ("pagination", &config.pagination),
        ("container", &config.container),
        ("station-block", &config.station_block),
        ("station-text", &config.station_text),
        ("unit-block", &config.unit_block),
        ("unit-row", &config.unit_row),
    ];

    for (name, value) in selectors {
        Selector::parse(value).map_err(|e| {
            ConfigError::InvalidSelector(format!("{} '{}': {:?}", name, value, e))
        })?;
    }

    Ok(())
}

/// Validates the output artifact configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database-path cannot be empty".to_string(),
        ));
    }

    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv-path cannot be empty".to_string(),
        ));
    }

    if config.log_path.is_empty() {
        return Err(ConfigError::Validation(
            "log-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            crawl: CrawlConfig {
                page_url: "https://listings.example.com/search?page={page}".to_string(),
                pacing_ms: 2_000,
                max_attempts: 3,
                initial_backoff_ms: 10_000,
                fallback_max_page: 100,
            },
            http: HttpConfig::default(),
            selectors: SelectorConfig::default(),
            output: OutputConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_page_url_requires_placeholder() {
        let mut config = valid_config();
        config.crawl.page_url = "https://listings.example.com/search?page=1".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_page_url_must_parse() {
        let mut config = valid_config();
        config.crawl.page_url = "not a url {page}".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_page_url_rejects_non_http_scheme() {
        let mut config = valid_config();
        config.crawl.page_url = "ftp://listings.example.com/{page}".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_max_attempts_must_be_positive() {
        let mut config = valid_config();
        config.crawl.max_attempts = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_fallback_max_page_must_be_positive() {
        let mut config = valid_config();
        config.crawl.fallback_max_page = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_broken_selector_is_rejected() {
        let mut config = valid_config();
        config.selectors.container = "[[invalid".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidSelector(_))
        ));
    }

    #[test]
    fn test_empty_output_path_is_rejected() {
        let mut config = valid_config();
        config.output.csv_path = String::new();
        assert!(validate(&config).is_err());
    }
}
