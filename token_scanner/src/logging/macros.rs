//! Logging macros taking `"key" => value` context pairs with Display values

/// Log an error with a code, optional span and context
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr, span = $span:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::log_error_with_context(
            $code,
            $message,
            Some($span),
            vec![$(($key, format!("{}", $value))),*],
        )
    };

    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::log_error_with_context(
            $code,
            $message,
            None,
            vec![$(($key, format!("{}", $value))),*],
        )
    };
}

/// Log a warning, optionally with a specific code and span
#[macro_export]
macro_rules! log_warning {
    (code = $code:expr, $message:expr, span = $span:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::log_warning_with_context(
            Some($code),
            $message,
            Some($span),
            vec![$(($key, format!("{}", $value))),*],
        )
    };

    (code = $code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::log_warning_with_context(
            Some($code),
            $message,
            None,
            vec![$(($key, format!("{}", $value))),*],
        )
    };

    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::log_warning_with_context(
            None,
            $message,
            None,
            vec![$(($key, format!("{}", $value))),*],
        )
    };
}

/// Log a success event with a code
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::log_success_with_context(
            $code,
            $message,
            vec![$(($key, format!("{}", $value))),*],
        )
    };
}

/// Log an informational message
#[macro_export]
macro_rules! log_info {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::log_info_with_context(
            $message,
            vec![$(($key, format!("{}", $value))),*],
        )
    };
}

/// Log a debug message; context values are only formatted when debug is enabled
#[macro_export]
macro_rules! log_debug {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        if $crate::logging::debug_enabled() {
            $crate::logging::log_debug_with_context(
                $message,
                vec![$(($key, format!("{}", $value))),*],
            )
        }
    };
}

/// Log a success event with elapsed time in milliseconds
#[macro_export]
macro_rules! log_performance {
    ($code:expr, $message:expr, duration = $duration:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::log_success!($code, $message,
            "duration_ms" => format!("{:.3}", $duration.as_secs_f64() * 1000.0)
            $(, $key => $value)*
        )
    };
}
