//! Default configuration values for kernel32-bindings

use serde::{Deserialize, Serialize};

/// Default configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigDefaults {
    pub library: LibraryDefaults,
    pub logging: LoggingDefaults,
    pub probe: ProbeDefaults,
}

/// Default library configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryDefaults {
    pub name: String,
    pub strict: bool,
}

/// Default logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingDefaults {
    pub level: String,
    pub show_target: bool,
}

/// Default probe configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeDefaults {
    pub sample_number: String,
    pub list_drives: bool,
}

/// Returns the default configuration
pub fn default_config() -> ConfigDefaults {
    ConfigDefaults {
        library: LibraryDefaults {
            name: "kernel32.dll".to_string(),
            strict: true,
        },
        logging: LoggingDefaults {
            level: "info".to_string(),
            show_target: false,
        },
        probe: ProbeDefaults {
            sample_number: "1234567.891".to_string(),
            list_drives: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_defaults() {
        let config = default_config();
        assert_eq!(config.library.name, "kernel32.dll");
        assert!(config.library.strict);
    }

    #[test]
    fn test_logging_defaults() {
        let config = default_config();
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.show_target);
    }

    #[test]
    fn test_probe_defaults() {
        let config = default_config();
        assert_eq!(config.probe.sample_number, "1234567.891");
        assert!(config.probe.list_drives);
    }

    #[test]
    fn test_serialization() {
        let config = default_config();
        let serialized = toml::to_string(&config).unwrap();
        assert!(serialized.contains("[library]"));
        assert!(serialized.contains("kernel32.dll"));

        let deserialized: ConfigDefaults = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.library.name, config.library.name);
        assert_eq!(deserialized.probe.sample_number, config.probe.sample_number);
    }
}
