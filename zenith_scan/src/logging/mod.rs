//! Global logging module for the Zenith converter
//!
//! Thread-safe global logging with an optional per-thread input context and a
//! macro interface. Every call is a no-op until `init_global_logging` runs.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{
    ConsoleLogger, FacadeLogger, Logger, LoggerKind, LoggingService, MemoryLogger,
    StructuredLogger,
};

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

thread_local! {
    static INPUT_CONTEXT: RefCell<Option<InputContext>> = const { RefCell::new(None) };
}

/// Identifies the input currently being converted on this thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputContext {
    pub source: String,
    pub index: Option<usize>,
}

impl InputContext {
    pub fn new(source: impl Into<String>, index: Option<usize>) -> Self {
        Self {
            source: source.into(),
            index,
        }
    }
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging from runtime preferences
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;
    install(Arc::new(service::create_configured_service()))
}

/// Initialize with custom service (embedding applications and tests)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    install(service)
}

fn install(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service.clone())
        .map_err(|_| "Global logger already initialized".to_string())?;

    for code in [
        codes::parse::STRUCTURAL,
        codes::parse::LIMIT_EXCEEDED,
        codes::system::INTERNAL_ERROR,
    ] {
        if codes::get_description(code.as_str()) == "Unknown error" {
            return Err(format!("Missing metadata for error code: {}", code));
        }
    }

    service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

// ============================================================================
// INPUT CONTEXT MANAGEMENT
// ============================================================================

pub fn set_input_context(context: InputContext) {
    INPUT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(context);
    });
}

pub fn clear_input_context() {
    INPUT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Execute function with input context
pub fn with_input_context<F, R>(context: InputContext, f: F) -> R
where
    F: FnOnce() -> R,
{
    set_input_context(context);
    let result = f();
    clear_input_context();
    result
}

/// Current input context (used by macros)
pub fn get_current_input_context() -> Option<InputContext> {
    INPUT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Attach the current input context, if any, to an event
pub fn attach_input_context(event: LogEvent) -> LogEvent {
    match get_current_input_context() {
        Some(ctx) => {
            let event = event.with_context("input", &ctx.source);
            match ctx.index {
                Some(index) => event.with_context("input_index", &index.to_string()),
                None => event,
            }
        }
        None => event,
    }
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

fn dispatch(mut event: LogEvent, context: Vec<(&str, &str)>) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };
    if !logger.should_log(event.level) {
        return;
    }

    for (key, value) in context {
        event = event.with_context(key, value);
    }
    logger.log_event(attach_input_context(event));
}

/// Log error with context (used by log_error! macro)
pub fn log_error_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch(LogEvent::error(code, message), context);
}

/// Log success with context (used by log_success! macro)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch(LogEvent::success(code, message), context);
}

/// Log warning with context (used by log_warning! macro)
pub fn log_warning_with_context(code: Option<Code>, message: &str, context: Vec<(&str, &str)>) {
    let event = match code {
        Some(code) => LogEvent::warning_with_code(code, message),
        None => LogEvent::warning(message),
    };
    dispatch(event, context);
}

/// Log info with context (used by log_info! macro)
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(LogEvent::info(message), context);
}

/// Log debug with context (used by log_debug! macro)
pub fn log_debug_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(LogEvent::debug(message), context);
}

/// Whether a debug event would reach a logger; lets callers skip building context
pub fn debug_enabled() -> bool {
    try_get_global_logger()
        .map(|logger| logger.should_log(LogLevel::Debug))
        .unwrap_or(false)
}

/// Get system diagnostics
pub fn get_system_diagnostics() -> String {
    let mut diagnostics = String::new();

    diagnostics.push_str("=== Logging System Diagnostics ===\n");
    diagnostics.push_str(&format!("Initialized: {}\n", is_initialized()));
    if let Some(logger) = try_get_global_logger() {
        diagnostics.push_str(&format!("Active level: {}\n", logger.min_level().as_str()));
    }
    diagnostics.push('\n');
    diagnostics.push_str(&config::get_config_summary());

    diagnostics
}

// ============================================================================
// SAFE FALLBACK LOGGING
// ============================================================================

/// Safe error logging (won't panic if uninitialized)
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(LogEvent::error(code, message));
    } else {
        eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message);
    }
}

/// Critical error logging, always echoed to stderr
pub fn safe_log_critical(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(LogEvent::error(code, message));
    }
    eprintln!("CRITICAL ERROR [{}]: {}", code.as_str(), message);
}
