//! Logging utilities for radiator.
//!
//! This module provides structured logging functionality so that figure
//! construction and rendering can be traced and timed in host applications.

use std::time::Instant;
use tracing::{debug, info, warn};

/// Initialize the tracing subscriber with the given log level
///
/// `RUST_LOG` takes precedence over the supplied level when set.
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
        .init();
}

/// Log the completion of a significant operation
pub fn log_operation_end(operation: &str, start_time: Instant, success: bool) {
    let duration = start_time.elapsed();
    let duration_ms = duration.as_secs_f64() * 1000.0;

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

    debug!(operation = operation, "Starting operation");

    let result = f();

    let duration = start.elapsed();

    info!(
        operation = operation,
        duration_ms = duration.as_secs_f64() * 1000.0,
        "Operation completed"
    );

    result
}

/// Log detailed information about a rendered figure
pub fn log_render_stats(
    width: u32,
    height: u32,
    collection_count: usize,
    has_heatmap: bool,
    has_colorbar: bool,
    duration_ms: u64,
) {
    info!(
        width = width,
        height = height,
        collection_count = collection_count,
        has_heatmap = has_heatmap,
        has_colorbar = has_colorbar,
        duration_ms = duration_ms,
        "Figure rendered"
    );
}
