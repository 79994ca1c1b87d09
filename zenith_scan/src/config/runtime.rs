// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterPreferences {
    /// Whether parse and serialize outcomes are reported to the global logger
    pub log_conversions: bool,

    /// Whether every ParseProgress entry is emitted as a debug event after a parse
    pub log_parse_trail: bool,

    /// Whether enhanced error messages append the rendered progress trail
    pub include_trail_in_errors: bool,
}

impl Default for ConverterPreferences {
    fn default() -> Self {
        Self {
            log_conversions: env::var(env_vars::CONVERTER_LOG_CONVERSIONS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_parse_trail: env::var(env_vars::CONVERTER_LOG_PARSE_TRAIL)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            include_trail_in_errors: env::var(env_vars::CONVERTER_INCLUDE_TRAIL_IN_ERRORS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging (user preference)
    pub use_structured_logging: bool,

    /// Whether to enable console output (user preference)
    pub enable_console_logging: bool,

    /// Whether events are forwarded to the `log` facade instead of printed directly
    pub use_log_facade: bool,

    /// User preferred minimum log level (within security constraints)
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
            use_log_facade: env::var(env_vars::LOGGING_USE_FACADE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
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

    /// Convert to events::LogLevel
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }

    /// Convert from events::LogLevel
    pub fn from_events_log_level(level: crate::logging::events::LogLevel) -> Self {
        match level {
            crate::logging::events::LogLevel::Error => LogLevel::Error,
            crate::logging::events::LogLevel::Warning => LogLevel::Warning,
            crate::logging::events::LogLevel::Info => LogLevel::Info,
            crate::logging::events::LogLevel::Debug => LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub converter: ConverterPreferences,
    pub logging: LoggingPreferences,
}

/// Environment variable names for configuration
pub mod env_vars {
    // Converter
    pub const CONVERTER_LOG_CONVERSIONS: &str = "ZENITH_CONVERTER_LOG_CONVERSIONS";
    pub const CONVERTER_LOG_PARSE_TRAIL: &str = "ZENITH_CONVERTER_LOG_PARSE_TRAIL";
    pub const CONVERTER_INCLUDE_TRAIL_IN_ERRORS: &str = "ZENITH_CONVERTER_INCLUDE_TRAIL_IN_ERRORS";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "ZENITH_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "ZENITH_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_USE_FACADE: &str = "ZENITH_LOGGING_USE_FACADE";
    pub const LOGGING_MIN_LEVEL: &str = "ZENITH_LOGGING_MIN_LEVEL";
}

#[cfg(test)]
mod tests {
    use super::*;

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
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_log_level_round_trip_through_events() {
        for level in [
            LogLevel::Error,
            LogLevel::Warning,
            LogLevel::Info,
            LogLevel::Debug,
        ] {
            assert_eq!(
                LogLevel::from_events_log_level(level.to_events_log_level()),
                level
            );
        }
    }

    #[test]
    fn test_env_var_names_are_prefixed() {
        for name in [
            env_vars::CONVERTER_LOG_CONVERSIONS,
            env_vars::CONVERTER_LOG_PARSE_TRAIL,
            env_vars::CONVERTER_INCLUDE_TRAIL_IN_ERRORS,
            env_vars::LOGGING_MIN_LEVEL,
        ] {
            assert!(name.starts_with("ZENITH_"));
        }
    }
}
