//! Unified error handling system
//!
//! Provides structured error types with context, recovery suggestions, and proper error chaining

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

pub type LangscanResult<T> = Result<T, LangscanError>;

/// Error context providing additional information for debugging and recovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Timestamp when error occurred
    pub timestamp: DateTime<Utc>,
    /// Component where error originated
    pub component: String,
    /// Operation being performed when error occurred
    pub operation: Option<String>,
    /// Additional metadata
    pub metadata: std::collections::HashMap<String, String>,
    /// Recovery suggestions
    pub recovery_suggestions: Vec<String>,
}

impl ErrorContext {
    pub fn new(component: &str) -> Self {
        Self {
            error_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            component: component.to_string(),
            operation: None,
            metadata: std::collections::HashMap::new(),
            recovery_suggestions: Vec::new(),
        }
    }

    pub fn with_operation(mut self, operation: &str) -> Self {
        self.operation = Some(operation.to_string());
        self
    }

    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.recovery_suggestions.push(suggestion.to_string());
        self
    }
}

/// Main error type for the langscan system
#[derive(Error, Debug)]
pub enum LangscanError {
    #[error("Repository error: {message}")]
    Repository {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Hosting API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        context: ErrorContext,
    },

    #[error("Resource not found: {resource}")]
    NotFound {
        resource: String,
        context: ErrorContext,
    },

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Operation timeout: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
        context: ErrorContext,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },
}

impl LangscanError {
    /// Get the error context
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            LangscanError::Repository { context, .. } => Some(context),
            LangscanError::Api { context, .. } => Some(context),
            LangscanError::NotFound { context, .. } => Some(context),
            LangscanError::Network { context, .. } => Some(context),
            LangscanError::Validation { context, .. } => Some(context),
            LangscanError::Config { context, .. } => Some(context),
            LangscanError::Timeout { context, .. } => Some(context),
            LangscanError::Internal { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Whether this error is terminal for the current operation, as opposed
    /// to a per-item failure a batch caller may skip
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LangscanError::Validation { .. } | LangscanError::Config { .. }
        )
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            LangscanError::Internal { .. } => {
                error!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Internal error occurred"
                );
            }
            LangscanError::Config { .. } | LangscanError::Validation { .. } => {
                error!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Configuration or validation error"
                );
            }
            LangscanError::Network { .. } | LangscanError::Timeout { .. } => {
                warn!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Network or timeout error"
                );
            }
            _ => {
                error!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Error occurred"
                );
            }
        }
    }
}

/// Convenience macros for creating errors with context
#[macro_export]
macro_rules! repository_error {
    ($msg:expr, $component:expr) => {
        $crate::error::LangscanError::Repository {
            message: $msg.to_string(),
            source: None,
            context: $crate::error::ErrorContext::new($component),
        }
    };
    ($msg:expr, $component:expr, $source:expr) => {
        $crate::error::LangscanError::Repository {
            message: $msg.to_string(),
            source: Some(Box::new($source)),
            context: $crate::error::ErrorContext::new($component),
        }
    };
}

#[macro_export]
macro_rules! validation_error {
    ($msg:expr, $field:expr, $component:expr) => {
        $crate::error::LangscanError::Validation {
            message: $msg.to_string(),
            field: Some($field.to_string()),
            context: $crate::error::ErrorContext::new($component)
                .with_suggestion("Check the field value and format"),
        }
    };
}

#[macro_export]
macro_rules! not_found_error {
    ($resource:expr, $component:expr) => {
        $crate::error::LangscanError::NotFound {
            resource: $resource.to_string(),
            context: $crate::error::ErrorContext::new($component)
                .with_suggestion("Verify the resource path or URL")
                .with_suggestion("Check if the resource exists and is accessible"),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_context_builder() {
        let context = ErrorContext::new("test_component")
            .with_operation("test_op")
            .with_metadata("key", "value")
            .with_suggestion("try again");

        assert_eq!(context.component, "test_component");
        assert_eq!(context.operation.as_deref(), Some("test_op"));
        assert_eq!(
            context.metadata.get("key").map(String::as_str),
            Some("value")
        );
        assert_eq!(context.recovery_suggestions.len(), 1);
        assert!(!context.error_id.is_empty());
    }

    #[test]
    fn repository_error_macro_wraps_source() {
        let source = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let error = repository_error!("snapshot write failed", "cache", source);

        match error {
            LangscanError::Repository {
                message, source, ..
            } => {
                assert_eq!(message, "snapshot write failed");
                assert!(source.is_some());
            }
            _ => panic!("Expected Repository error"),
        }
    }

    #[test]
    fn terminal_classification() {
        let validation = validation_error!("bad input", "url", "test");
        assert!(validation.is_terminal());

        let not_found = not_found_error!("owner/repo", "test");
        assert!(!not_found.is_terminal());

        let api = LangscanError::Api {
            status: 403,
            message: "rate limited".to_string(),
            context: ErrorContext::new("test"),
        };
        assert!(!api.is_terminal());
    }

    #[test]
    fn io_error_conversion() {
        fn read_missing() -> LangscanResult<String> {
            Ok(std::fs::read_to_string("/definitely/not/a/real/path")?)
        }
        assert!(matches!(read_missing(), Err(LangscanError::Io(_))));
    }
}
