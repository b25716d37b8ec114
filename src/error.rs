use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "task.text", "settings.openai.api_key")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., legal values, upstream response excerpt)
    pub details: Option<String>,
    /// Source of the error (e.g., "openai", "batch_executor")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the library.
///
/// Provider failures surface as `Network` (transport) or `Api` (non-2xx vendor
/// response). The batch engine never propagates these; it captures them per task
/// as [`crate::batch::TaskError`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Invalid parameter domain: {message}")]
    InvalidDomain { message: String },

    #[error("Network transport error: {message}{}", format_context(.context))]
    Network {
        message: String,
        context: ErrorContext,
    },

    #[error("Provider API error (HTTP {status}): {message}{}", format_context(.context))]
    Api {
        status: u16,
        message: String,
        context: ErrorContext,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a new configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create a new validation error with structured context
    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    /// Create a new invalid-domain error (empty parameter domain)
    pub fn invalid_domain(msg: impl Into<String>) -> Self {
        Error::InvalidDomain {
            message: msg.into(),
        }
    }

    /// Create a new network transport error with structured context
    pub fn network_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Network {
            message: msg.into(),
            context,
        }
    }

    /// Create a new provider API error for a non-success HTTP status
    pub fn api(status: u16, msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Api {
            status,
            message: msg.into(),
            context,
        }
    }

    /// HTTP status of the upstream response, if this is an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. }
            | Error::Validation { context, .. }
            | Error::Network { context, .. }
            | Error::Api { context, .. } => Some(context),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context_parts() {
        let err = Error::validation_with_context(
            "invalid voice 'robot'",
            ErrorContext::new()
                .with_field_path("options.voice")
                .with_source("openai"),
        );
        let rendered = err.to_string();
        assert!(rendered.contains("invalid voice 'robot'"));
        assert!(rendered.contains("field: options.voice"));
        assert!(rendered.contains("source: openai"));
    }

    #[test]
    fn api_error_exposes_status() {
        let err = Error::api(429, "quota exceeded", ErrorContext::new());
        assert_eq!(err.status(), Some(429));
        assert!(err.to_string().contains("HTTP 429"));
    }

    #[test]
    fn context_accessor_covers_structured_variants() {
        let err = Error::configuration("missing key");
        assert!(err.context().is_some());
        let err = Error::invalid_domain("no voices");
        assert!(err.context().is_none());
    }
}
