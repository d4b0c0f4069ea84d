//! Logging utilities for colorwiz.
//!
//! Structured `tracing` helpers so that model activity, scheme loading and
//! CLI operations produce searchable, consistent log records.

use std::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::ColorwizError;

/// Initialize the tracing subscriber with the given log level.
/// `RUST_LOG`, when set, takes precedence.
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Log a start message for a significant operation
pub fn log_operation_start(operation: &str, details: Option<&str>) {
    if let Some(details) = details {
        info!(
            operation = operation,
            details = details,
            "Starting operation"
        );
    } else {
        info!(operation = operation, "Starting operation");
    }
}

/// Log the completion of a significant operation
pub fn log_operation_end(operation: &str, start_time: Instant, success: bool) {
    let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;

    if success {
        info!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation completed successfully"
        );
    } else {
        warn!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation completed with warnings"
        );
    }
}

/// Log an operation with timing and result in a single statement
pub fn log_timed_operation<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let operation_id = Uuid::new_v4();

    debug!(
        operation = operation,
        operation_id = %operation_id,
        "Starting operation"
    );

    let result = f();

    info!(
        operation = operation,
        operation_id = %operation_id,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Operation completed"
    );

    result
}

/// Log the labels collected for one property
pub fn log_collection_stats(property: &str, labels: &[&str]) {
    info!(
        operation = "collect",
        property = property,
        label_count = labels.len(),
        labels = %labels.join(", "),
        "Property labels collected"
    );
}

/// Log a scheme that could not be loaded; the color map keeps its defaults
pub fn log_scheme_warning(property: &str, error: &ColorwizError) {
    warn!(
        property = property,
        error = %error,
        "Cannot load color scheme, keeping defaults"
    );
}

/// Log an error with context
pub fn log_error(error: &ColorwizError, context: &str) {
    error!(
        error = %error,
        context = context,
        error_type = std::any::type_name_of_val(error),
        "Error occurred"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_log_timed_operation() {
        // This is more of a functional test to ensure it doesn't panic
        let result = log_timed_operation("test_operation", || {
            std::thread::sleep(Duration::from_millis(1));
            42
        });

        assert_eq!(result, 42);
    }

    #[test]
    fn test_log_helpers_do_not_panic() {
        let err = ColorwizError::precondition("No property found");
        log_error(&err, "test");
        log_scheme_warning("status", &err);
        log_collection_stats("status", &["open", "closed"]);
        log_operation_end("test", Instant::now(), false);
    }
}
