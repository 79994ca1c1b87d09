//! Configuration access for logging
//!
//! Combines compile-time logging limits with the runtime preferences held by
//! `crate::config`. Limits are fixed at build time; preferences are user-tunable.

use crate::config::compile_time::logging::*;
use crate::config::runtime::LoggingPreferences;

type EventsLogLevel = crate::logging::events::LogLevel;

fn preferences() -> &'static LoggingPreferences {
    &crate::config::runtime_config().logging
}

/// Minimum log level, never quieter than the compile-time floor
pub fn get_min_log_level() -> EventsLogLevel {
    effective_min_level(preferences())
}

/// `preferences.min_log_level` raised to the compile-time floor
pub fn effective_min_level(preferences: &LoggingPreferences) -> EventsLogLevel {
    preferences
        .min_log_level
        .to_events_log_level()
        .max(get_security_log_level())
}

/// Lowest level that can never be filtered out
pub fn get_security_log_level() -> EventsLogLevel {
    match SECURITY_MIN_LOG_LEVEL {
        0 => EventsLogLevel::Error,
        1 => EventsLogLevel::Warning,
        _ => EventsLogLevel::Info,
    }
}

pub fn use_structured_logging() -> bool {
    preferences().use_structured_logging
}

pub fn use_console_logging() -> bool {
    preferences().enable_console_logging
}

pub fn use_log_facade() -> bool {
    preferences().use_log_facade
}

/// Capacity of the in-memory event buffer
pub fn get_log_buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

pub fn get_max_log_message_length() -> usize {
    MAX_LOG_MESSAGE_LENGTH
}

/// Validate compile-time constants are usable
pub fn validate_config() -> Result<(), String> {
    if LOG_BUFFER_SIZE == 0 {
        return Err("Log buffer size must be non-zero".to_string());
    }

    if MAX_LOG_MESSAGE_LENGTH < 64 {
        return Err(format!(
            "Max log message length too small: {}",
            MAX_LOG_MESSAGE_LENGTH
        ));
    }

    Ok(())
}

/// Configuration summary for diagnostics
pub fn get_config_summary() -> String {
    let preferences = preferences();

    format!(
        "Logging Configuration ({}):\n\
         === Limits (Compile-time) ===\n\
         - Log buffer size: {}\n\
         - Max message length: {}\n\
         - Minimum enforced level: {}\n\
         === Preferences (Runtime) ===\n\
         - Min log level: {:?}\n\
         - Structured logging: {}\n\
         - Console logging: {}\n\
         - Log facade: {}",
        crate::config::build_info::source_info(),
        LOG_BUFFER_SIZE,
        MAX_LOG_MESSAGE_LENGTH,
        get_security_log_level().as_str(),
        preferences.min_log_level,
        preferences.use_structured_logging,
        preferences.enable_console_logging,
        preferences.use_log_facade,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(validate_config().is_ok());
    }

    #[test]
    fn test_min_level_respects_floor() {
        assert!(get_min_log_level() >= get_security_log_level());
    }

    #[test]
    fn test_effective_level_is_floored() {
        let mut preferences = LoggingPreferences::default();
        preferences.min_log_level = crate::config::runtime::LogLevel::Error;
        assert_eq!(effective_min_level(&preferences), get_security_log_level());

        preferences.min_log_level = crate::config::runtime::LogLevel::Debug;
        assert_eq!(effective_min_level(&preferences), EventsLogLevel::Debug);
    }

    #[test]
    fn test_summary_lists_limits() {
        let summary = get_config_summary();
        assert!(summary.contains("Log buffer size"));
        assert!(summary.contains("Log facade"));
    }
}
