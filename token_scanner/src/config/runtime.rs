// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Errors raised while loading runtime configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid configuration TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ConfigError::Io { .. } => crate::logging::codes::system::CONFIGURATION_ERROR,
            ConfigError::Parse(_) => crate::logging::codes::system::CONFIGURATION_ERROR,
        }
    }
}

/// How the scanner treats unterminated strings and unrecognized characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Absorb both conditions silently
    #[default]
    Lenient,
    /// Surface the first condition as a `LexerError`
    Strict,
}

impl ScanMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanMode::Lenient => "lenient",
            ScanMode::Strict => "strict",
        }
    }

    pub fn is_strict(&self) -> bool {
        matches!(self, ScanMode::Strict)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Diagnostic policy for malformed input
    pub mode: ScanMode,

    /// Whether to collect per-kind token metrics
    pub collect_detailed_metrics: bool,

    /// Whether to track operator usage patterns
    pub track_operator_patterns: bool,

    /// Whether lenient scans log each dropped fragment
    pub log_dropped_characters: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            mode: env::var(env_vars::LEXICAL_MODE)
                .ok()
                .and_then(|v| parse_scan_mode(&v))
                .unwrap_or_default(),
            collect_detailed_metrics: env::var(env_vars::LEXICAL_DETAILED_METRICS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            track_operator_patterns: env::var(env_vars::LEXICAL_TRACK_OPERATORS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dropped_characters: env::var(env_vars::LEXICAL_LOG_DROPPED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessorPreferences {
    /// Required file extension (without the dot), if any
    pub required_extension: Option<String>,

    /// Whether to enable detailed performance logging
    pub enable_performance_logging: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            required_extension: env::var(env_vars::REQUIRED_EXTENSION)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| v.trim_start_matches('.').to_lowercase()),
            enable_performance_logging: env::var(env_vars::ENABLE_PERFORMANCE_LOGGING)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Minimum level that reaches the logger
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Warning),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_log_level(s).ok_or_else(|| format!("unknown log level '{}'", s))
    }
}

/// Parse log level from string (used for environment variables)
fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

/// Parse scan mode from string (used for environment variables)
fn parse_scan_mode(mode: &str) -> Option<ScanMode> {
    match mode.to_lowercase().as_str() {
        "lenient" => Some(ScanMode::Lenient),
        "strict" => Some(ScanMode::Strict),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub lexical: LexicalPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse a runtime configuration from TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a runtime configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // File Processor
    pub const REQUIRED_EXTENSION: &str = "TOKSCAN_REQUIRED_EXTENSION";
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "TOKSCAN_ENABLE_PERFORMANCE_LOGGING";

    // Lexical
    pub const LEXICAL_MODE: &str = "TOKSCAN_LEXICAL_MODE";
    pub const LEXICAL_DETAILED_METRICS: &str = "TOKSCAN_LEXICAL_DETAILED_METRICS";
    pub const LEXICAL_TRACK_OPERATORS: &str = "TOKSCAN_LEXICAL_TRACK_OPERATORS";
    pub const LEXICAL_LOG_DROPPED: &str = "TOKSCAN_LEXICAL_LOG_DROPPED";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "TOKSCAN_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "TOKSCAN_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "TOKSCAN_LOGGING_MIN_LEVEL";
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("invalid"), None);
    }

    #[test]
    fn test_scan_mode_parsing() {
        assert_eq!(parse_scan_mode("strict"), Some(ScanMode::Strict));
        assert_eq!(parse_scan_mode("Lenient"), Some(ScanMode::Lenient));
        assert_eq!(parse_scan_mode("loose"), None);
        assert_eq!(ScanMode::default(), ScanMode::Lenient);
    }

    #[test]
    fn test_partial_toml_keeps_other_sections() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [lexical]
            mode = "strict"
            track_operator_patterns = true

            [logging]
            min_log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.lexical.mode, ScanMode::Strict);
        assert!(config.lexical.track_operator_patterns);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let result = RuntimeConfig::from_toml_str("[lexical]\nmode = \"sloppy\"\n");
        assert_matches!(result, Err(ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_config_file() {
        let result = RuntimeConfig::from_file("/definitely/not/here/tokscan.toml");
        assert_matches!(result, Err(ConfigError::Io { .. }));
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let mut config = RuntimeConfig::default();
        config.lexical.mode = ScanMode::Strict;
        config.file_processor.required_extension = Some("src".to_string());

        let rendered = config.to_toml_string().unwrap();
        let reparsed = RuntimeConfig::from_toml_str(&rendered).unwrap();

        assert_eq!(reparsed.lexical.mode, ScanMode::Strict);
        assert_eq!(
            reparsed.file_processor.required_extension.as_deref(),
            Some("src")
        );
    }

    #[test]
    fn test_env_var_names_exist() {
        assert!(env_vars::LEXICAL_MODE.starts_with("TOKSCAN_"));
        assert!(env_vars::LOGGING_MIN_LEVEL.starts_with("TOKSCAN_"));
    }
}
