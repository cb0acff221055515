use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Resolution and execution failures surfaced by [`CommandRunner::run`](crate::CommandRunner::run).
///
/// The `available` payloads are sorted so callers can render stable help text.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("command '{path}' not found. Available: {list}", list = .available.join(", "))]
    CommandNotFound {
        path: String,
        available: Vec<String>,
    },

    #[error("provider '{name}' not found. Available: {list}", list = .available.join(", "))]
    ProviderNotFound {
        name: String,
        available: Vec<String>,
    },

    #[error(
        "provider '{provider}' has no fetcher for '{model}'. Available: {list}",
        list = .available.join(", ")
    )]
    FetcherNotFound {
        provider: String,
        model: String,
        available: Vec<String>,
    },

    #[error("command '{path}' declares neither a provider model nor a handler")]
    MissingHandler { path: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl DispatchError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::CommandNotFound { .. } => "dispatch.command_not_found",
            Self::ProviderNotFound { .. } => "dispatch.provider_not_found",
            Self::FetcherNotFound { .. } => "dispatch.fetcher_not_found",
            Self::MissingHandler { .. } => "dispatch.missing_handler",
            Self::Fetch(error) => error.code(),
        }
    }

    /// Valid alternatives for resolution failures; empty for everything else.
    pub fn available(&self) -> &[String] {
        match self {
            Self::CommandNotFound { available, .. }
            | Self::ProviderNotFound { available, .. }
            | Self::FetcherNotFound { available, .. } => available,
            Self::MissingHandler { .. } | Self::Fetch(_) => &[],
        }
    }

    /// True when the failure happened while resolving, before any fetcher ran.
    pub const fn is_resolution(&self) -> bool {
        !matches!(self, Self::Fetch(_))
    }
}

/// Fetcher-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Upstream,
    Transform,
    SchemaMismatch,
    InvalidParams,
    Internal,
}

/// Provider-defined failure raised by `fetch`, `transform`, or a command handler.
///
/// The runner forwards it untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
}

impl FetchError {
    pub fn upstream(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Upstream,
            message: message.into(),
        }
    }

    pub fn transform(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Transform,
            message: message.into(),
        }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::InvalidParams,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Internal,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            FetchErrorKind::Upstream => "fetch.upstream",
            FetchErrorKind::Transform => "fetch.transform",
            FetchErrorKind::SchemaMismatch => "fetch.schema_mismatch",
            FetchErrorKind::InvalidParams => "fetch.invalid_params",
            FetchErrorKind::Internal => "fetch.internal",
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for FetchError {}

impl From<SchemaError> for FetchError {
    fn from(error: SchemaError) -> Self {
        Self {
            kind: FetchErrorKind::SchemaMismatch,
            message: error.to_string(),
        }
    }
}

/// Raw data could not populate a typed record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("record #{index} does not match schema '{model}': {detail}")]
    SchemaMismatch {
        model: &'static str,
        index: usize,
        detail: String,
    },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("date must be ISO formatted (YYYY-MM-DD): '{value}'")]
    InvalidDate { value: String },
}

impl SchemaError {
    pub fn mismatch(model: &'static str, index: usize, detail: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            model,
            index,
            detail: detail.into(),
        }
    }

    pub fn timestamp_not_utc(value: impl Into<String>) -> Self {
        Self::TimestampNotUtc {
            value: value.into(),
        }
    }

    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }
}

/// Errors from envelope conversions.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
