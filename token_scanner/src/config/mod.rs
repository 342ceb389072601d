//! Configuration module for the token scanner
//!
//! Compile-time limits are generated by build.rs from `config/<profile>.toml`.
//! Runtime preferences live in [`runtime`].

// Generated at compile time from the TOML configuration
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::{
    ConfigError, FileProcessorPreferences, LexicalPreferences, LogLevel, LoggingPreferences,
    RuntimeConfig, ScanMode,
};

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("TOKSCAN_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("TOKSCAN_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time::*;
    use super::*;

    #[test]
    fn test_generated_constants_are_sane() {
        assert!(file_processing::MAX_FILE_SIZE > 0);
        assert!(file_processing::LARGE_FILE_THRESHOLD <= file_processing::MAX_FILE_SIZE);
        assert!(lexical::MAX_DIAGNOSTICS > 0);
        assert!(lexical::MAX_DIAGNOSTIC_FRAGMENT_LENGTH > 0);
        assert!(logging::LOG_BUFFER_SIZE >= 100);
    }

    #[test]
    fn test_source_info_names_profile() {
        let info = build_info::source_info();
        assert!(info.contains(build_info::profile()));
        assert!(info.ends_with(".toml"));
    }
}
