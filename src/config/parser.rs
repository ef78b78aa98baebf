use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
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
/// use ekimae::config::load_config;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// println!("Fallback page bound: {}", config.crawl.fallback_max_page);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// This is used to tell apart scrape runs made against different
/// configurations when reading back the artifacts.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_minimal_config_applies_defaults() {
        let file = write_config(
            r#"
            [crawl]
            page-url = "https://listings.example.com/search?page={page}"
            "#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.crawl.pacing_ms, 2_000);
        assert_eq!(config.crawl.max_attempts, 3);
        assert_eq!(config.crawl.initial_backoff_ms, 10_000);
        assert_eq!(config.crawl.fallback_max_page, 100);
        assert_eq!(config.http.timeout_ms, 20_000);
        assert_eq!(config.selectors.container, ".cassetteitem");
        assert_eq!(config.output.database_path, "./listings.db");
    }

    #[test]
    fn test_load_config_overrides() {
        let file = write_config(
            r#"
            [crawl]
            page-url = "https://listings.example.com/search?page={page}"
            pacing-ms = 500
            fallback-max-page = 25

            [output]
            database-path = "/tmp/custom.db"
            "#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.crawl.pacing_ms, 500);
        assert_eq!(config.crawl.fallback_max_page, 25);
        assert_eq!(config.output.database_path, "/tmp/custom.db");
        // Unspecified sections keep their defaults
        assert_eq!(config.output.csv_path, "./listings.csv");
    }

    #[test]
    fn test_load_config_missing_page_url_fails() {
        let file = write_config("[crawl]\npacing-ms = 100\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let file = write_config("not toml at all [[[");
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_config_hash_is_stable() {
        let file = write_config(
            r#"
            [crawl]
            page-url = "https://listings.example.com/search?page={page}"
            "#,
        );

        let first = compute_config_hash(file.path()).unwrap();
        let second = compute_config_hash(file.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn test_load_config_with_hash() {
        let file = write_config(
            r#"
            [crawl]
            page-url = "https://listings.example.com/search?page={page}"
            "#,
        );

        let (config, hash) = load_config_with_hash(file.path()).unwrap();
        assert_eq!(config.crawl.fallback_max_page, 100);
        assert!(!hash.is_empty());
    }
}
