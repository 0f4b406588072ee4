//! Logging sinks for the dispatcher and tracing setup for binaries.

use crate::config::ChaincodeConfig;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Fire-and-forget diagnostic sink injected into a [`Dispatcher`](crate::Dispatcher).
pub trait Logger: Send + Sync {
    fn info(&self, message: &str);
}

/// Forwards messages to `tracing` at info level, tagged with the chaincode name.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    chaincode: String,
}

impl TracingLogger {
    pub fn new(chaincode: impl Into<String>) -> Self {
        Self {
            chaincode: chaincode.into(),
        }
    }
}

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(chaincode = %self.chaincode, "{message}");
    }
}

/// Keeps every message in memory, in order.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<String>>,
}

impl MemoryLogger {
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Logger for MemoryLogger {
    fn info(&self, message: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_owned());
    }
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter {filter:?}: {reason}")]
    Filter { filter: String, reason: String },

    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Installs the global `tracing` subscriber described by `config`.
///
/// `log_format` is either `"json"` or anything else for plain text.
pub fn init_tracing(config: &ChaincodeConfig) -> Result<(), LoggingError> {
    let filter =
        EnvFilter::try_new(&config.log_level).map_err(|e| LoggingError::Filter {
            filter: config.log_level.clone(),
            reason: e.to_string(),
        })?;
    let installed = match config.log_format.as_str() {
        "json" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_target(true)
            .try_init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
    };
    installed.map_err(|e| LoggingError::Install(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_logger_keeps_order() {
        let logger = MemoryLogger::default();
        logger.info("first");
        logger.info("second");
        assert_eq!(logger.lines(), ["first", "second"]);
    }

    #[test]
    fn bad_filter_is_reported() {
        let config = ChaincodeConfig {
            log_level: "chaincode=loud".into(),
            ..ChaincodeConfig::default()
        };
        assert!(matches!(
            init_tracing(&config),
            Err(LoggingError::Filter { .. })
        ));
    }

    #[test]
    fn tracing_logger_does_not_need_a_subscriber() {
        TracingLogger::new("very-simple").info("no subscriber installed");
    }
}
