use crate::application::{dto::ApiSuccessResponse, error::ApplicationError};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    pub message: String,
    pub extra_data: Option<String>,
}

impl LogMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            extra_data: None,
        }
    }

    pub fn with_extra(mut self, extra_data: impl Into<String>) -> Self {
        self.extra_data = Some(extra_data.into());
        self
    }

    pub fn render(&self) -> String {
        match self.extra_data.as_deref() {
            Some(extra) if !extra.is_empty() => format!("{}: {extra}.", self.message),
            _ => format!("{}.", self.message),
        }
    }
}

/// Log sink used by every use case. Implementations must not panic.
pub trait Logger: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

impl dyn Logger {
    /// Log a success line and wrap `data` in a success envelope.
    pub fn log_and_return_data<T>(
        &self,
        message: LogMessage,
        data: Option<T>,
    ) -> ApiSuccessResponse<T> {
        self.log(LogLevel::Info, &message.render());
        ApiSuccessResponse::new(message.message, data)
    }

    /// Log the error's full line (log-only detail included) and hand it back.
    pub fn log_and_return_error(&self, error: ApplicationError) -> ApplicationError {
        self.log(LogLevel::Error, &error.log_line());
        error
    }
}
