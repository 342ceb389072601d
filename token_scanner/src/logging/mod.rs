//! Global logging for the token scanner
//!
//! A process-wide `LoggingService` behind a `OnceLock`, a thread-local source
//! context attached to every event, and the support functions the logging
//! macros expand to. Logging before initialization is a no-op.

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
    ConsoleLogger, Logger, LoggingService, MemoryLogger, MultiLogger, StructuredLogger,
};

use crate::config::runtime::LoggingPreferences;
use crate::utils::Span;

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

thread_local! {
    static SOURCE_CONTEXT: RefCell<Option<String>> = RefCell::new(None);
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging from runtime preferences
pub fn init_global_logging(preferences: LoggingPreferences) -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;
    config::init_runtime_preferences(preferences)?;

    let logging_service = Arc::new(service::create_configured_service());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized".to_string())?;

    for code in [
        codes::system::INTERNAL_ERROR,
        codes::lexical::UNTERMINATED_STRING,
        codes::success::TOKENIZATION_COMPLETE,
    ] {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!("Missing metadata for code: {}", code));
        }
    }

    logging_service.log_event(LogEvent::success(
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

/// Whether debug events would reach the global logger
pub fn debug_enabled() -> bool {
    try_get_global_logger()
        .map(|logger| logger.should_log(LogLevel::Debug))
        .unwrap_or(false)
}

// ============================================================================
// SOURCE CONTEXT
// ============================================================================

/// Name the input being scanned on this thread
pub fn set_source_context(source_name: &str) {
    SOURCE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(source_name.to_string());
    });
}

pub fn clear_source_context() {
    SOURCE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Run `f` with `source_name` attached to every event it logs
pub fn with_source_context<F, R>(source_name: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = get_current_source_context();
    set_source_context(source_name);
    let result = f();
    match previous {
        Some(name) => set_source_context(&name),
        None => clear_source_context(),
    }
    result
}

pub fn get_current_source_context() -> Option<String> {
    SOURCE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

fn dispatch(mut event: LogEvent, context: Vec<(&str, String)>) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };

    for (key, value) in &context {
        event = event.with_context(key, value);
    }

    if let Some(source) = get_current_source_context() {
        event = event.with_context("source", &source);
    }

    logger.log_event(event);
}

/// Used by `log_error!`
pub fn log_error_with_context(
    code: Code,
    message: &str,
    span: Option<Span>,
    context: Vec<(&str, String)>,
) {
    let mut event = LogEvent::error(code, message);
    if let Some(s) = span {
        event = event.with_span(s);
    }
    dispatch(event, context);
}

/// Used by `log_warning!`
pub fn log_warning_with_context(
    code: Option<Code>,
    message: &str,
    span: Option<Span>,
    context: Vec<(&str, String)>,
) {
    let mut event = match code {
        Some(code) => LogEvent::warning_with_code(code, message),
        None => LogEvent::warning(message),
    };
    if let Some(s) = span {
        event = event.with_span(s);
    }
    dispatch(event, context);
}

/// Used by `log_success!`
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, String)>) {
    dispatch(LogEvent::success(code, message), context);
}

/// Used by `log_info!`
pub fn log_info_with_context(message: &str, context: Vec<(&str, String)>) {
    dispatch(LogEvent::info(message), context);
}

/// Used by `log_debug!`
pub fn log_debug_with_context(message: &str, context: Vec<(&str, String)>) {
    dispatch(LogEvent::debug(message), context);
}

/// Error logging that falls back to stderr when uninitialized
pub fn safe_log_error(code: Code, message: &str) {
    match try_get_global_logger() {
        Some(logger) => logger.log_error(code, message),
        None => eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message),
    }
}

/// Get system diagnostics
pub fn get_system_diagnostics() -> String {
    format!(
        "=== Logging System Diagnostics ===\nInitialized: {}\n\n{}",
        is_initialized(),
        config::get_config_summary()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_context_management() {
        assert!(get_current_source_context().is_none());

        set_source_context("input.src");
        assert_eq!(get_current_source_context().as_deref(), Some("input.src"));

        clear_source_context();
        assert!(get_current_source_context().is_none());
    }

    #[test]
    fn test_with_source_context_restores_previous() {
        set_source_context("outer");
        let result = with_source_context("inner", || {
            assert_eq!(get_current_source_context().as_deref(), Some("inner"));
            7
        });
        assert_eq!(result, 7);
        assert_eq!(get_current_source_context().as_deref(), Some("outer"));
        clear_source_context();
    }

    #[test]
    fn test_logging_without_initialization_is_harmless() {
        log_info_with_context("no logger", vec![("k", "v".to_string())]);
        safe_log_error(codes::system::INTERNAL_ERROR, "fallback path");
    }

    #[test]
    fn test_diagnostics() {
        let diagnostics = get_system_diagnostics();
        assert!(diagnostics.contains("Logging System Diagnostics"));
        assert!(diagnostics.contains("Log buffer size"));
    }
}
