// build.rs - TOML-driven compile-time limit generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    parser: ParserLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct ParserLimits {
    max_tuple_depth: usize,
    max_tuple_node_count: usize,
    max_tuple_length: usize,
    max_if_arms: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
    security_min_log_level: u8,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=ZENITH_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=ZENITH_CONFIG_DIR");

    let profile = env::var("ZENITH_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("ZENITH_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Config lives at the workspace root, one level above this crate
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_TUPLE_DEPTH: usize = 4_096;
    const ABSOLUTE_MAX_TUPLE_NODES: usize = 10_000_000;

    if config.parser.max_tuple_depth == 0 {
        panic!("LIMITS: max_tuple_depth must be at least 1");
    }

    if config.parser.max_tuple_depth > ABSOLUTE_MAX_TUPLE_DEPTH {
        panic!("LIMITS: max_tuple_depth exceeds absolute maximum");
    }

    if config.parser.max_tuple_node_count > ABSOLUTE_MAX_TUPLE_NODES {
        panic!("LIMITS: max_tuple_node_count exceeds absolute maximum");
    }

    // An If tuple needs room for one true arm and the false arm
    if config.parser.max_tuple_length < 5 {
        panic!("LIMITS: max_tuple_length must allow an If tuple (at least 5)");
    }

    if config.logging.security_min_log_level > 2 {
        panic!("LIMITS: security_min_log_level too high (max: 2)");
    }

    if profile == "production" && config.parser.max_tuple_depth > 256 {
        panic!("PRODUCTION: max_tuple_depth too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod parser {{
        pub const MAX_TUPLE_DEPTH: usize = {};
        pub const MAX_TUPLE_NODE_COUNT: usize = {};
        pub const MAX_TUPLE_LENGTH: usize = {};
        pub const MAX_IF_ARMS: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const SECURITY_MIN_LOG_LEVEL: u8 = {};
    }}
}}
"#,
        profile,
        config.parser.max_tuple_depth,
        config.parser.max_tuple_node_count,
        config.parser.max_tuple_length,
        config.parser.max_if_arms,
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
        config.logging.security_min_log_level,
    );

    fs::write(output_path, constants_code).unwrap();
}
