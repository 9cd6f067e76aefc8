//! Configuration validator for kernel32-bindings

use super::loader::{Config, ConfigError, LibraryConfig, LoggingConfig, ProbeConfig};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the entire configuration
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        Self::validate_library(&config.library)?;
        Self::validate_logging(&config.logging)?;
        Self::validate_probe(&config.probe)?;
        Ok(())
    }

    fn validate_library(library: &LibraryConfig) -> Result<(), ConfigError> {
        if library.name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Library name cannot be empty".to_string(),
            ));
        }

        if library.name.contains('\0') {
            return Err(ConfigError::Invalid(
                "Library name cannot contain NUL".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid log level: {}. Must be one of: {:?}",
                logging.level, valid_levels
            )));
        }

        Ok(())
    }

    // The number's syntax is for GetNumberFormatW to judge
    fn validate_probe(probe: &ProbeConfig) -> Result<(), ConfigError> {
        if probe.sample_number.is_empty() {
            return Err(ConfigError::Invalid(
                "Probe sample number cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Validates a configuration
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    ConfigValidator::validate(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_invalid_library_name() {
        let mut config = Config::default();
        config.library.name = "  ".to_string();
        let result = validate_config(&config);
        assert!(result.unwrap_err().to_string().contains("Library name"));

        config.library.name = "kernel32\0.dll".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();
        let result = validate_config(&config);
        assert!(result.unwrap_err().to_string().contains("log level"));
    }

    #[test]
    fn test_log_level_case_insensitive() {
        let mut config = Config::default();
        config.logging.level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_sample_number() {
        let mut config = Config::default();
        config.probe.sample_number.clear();
        assert!(validate_config(&config).is_err());
    }
}
