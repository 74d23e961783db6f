use crate::application::ports::logger::{LogLevel, Logger};

/// Forwards use-case log lines to `tracing` under a dedicated target, so
/// they can be filtered apart from request and driver noise.
#[derive(Default, Clone)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Error => tracing::error!(target: "dental_auth::audit", "{message}"),
            LogLevel::Warn => tracing::warn!(target: "dental_auth::audit", "{message}"),
            LogLevel::Info => tracing::info!(target: "dental_auth::audit", "{message}"),
            LogLevel::Debug => tracing::debug!(target: "dental_auth::audit", "{message}"),
        }
    }
}
