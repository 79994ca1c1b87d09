//! Configuration module for the Zenith scan converter
//! Compile-time limits are generated from TOML; user preferences are read at runtime

// Include generated constants from build.rs
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

use runtime::RuntimeConfig;
use std::sync::OnceLock;

static RUNTIME_CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

/// Install runtime preferences. Fails if preferences were already installed or read.
pub fn init_runtime_config(config: RuntimeConfig) -> Result<(), String> {
    RUNTIME_CONFIG
        .set(config)
        .map_err(|_| "Runtime configuration already initialized".to_string())
}

/// Current runtime preferences, falling back to environment defaults
pub fn runtime_config() -> &'static RuntimeConfig {
    RUNTIME_CONFIG.get_or_init(RuntimeConfig::default)
}

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("ZENITH_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("ZENITH_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time::parser::*;
    use super::*;

    #[test]
    fn test_generated_parser_limits() {
        assert!(MAX_TUPLE_DEPTH > 0);
        assert!(MAX_TUPLE_NODE_COUNT >= MAX_TUPLE_DEPTH);
        assert!(MAX_TUPLE_LENGTH >= 5);
        assert!(MAX_IF_ARMS > 0);
    }

    #[test]
    fn test_runtime_config_is_set_once() {
        let current = runtime_config().clone();
        assert!(init_runtime_config(current).is_err());
    }

    #[test]
    fn test_source_info_names_profile() {
        assert!(build_info::source_info().ends_with(".toml"));
        assert!(build_info::source_info().contains(build_info::profile()));
    }
}
