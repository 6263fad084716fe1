//! Error types for repository operations.
//!
//! Every error carries an [`ErrorContext`] describing which lookup failed, so
//! that the message surfaced on the error page and in the logs names the
//! database and TIC involved.

use std::fmt;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Structured context for repository errors.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "fetch_spoc_tces")
    pub operation: Option<String>,
    /// The table or database involved (e.g., "tess_tcestats")
    pub entity: Option<String>,
    /// The TIC being looked up, if any
    pub entity_id: Option<String>,
    /// Additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with an operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    /// Set the entity type.
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Set the entity ID.
    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    /// Set additional details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    fn is_empty(&self) -> bool {
        self.operation.is_none()
            && self.entity.is_none()
            && self.entity_id.is_none()
            && self.details.is_none()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref entity) = self.entity {
            parts.push(format!("entity={}", entity));
        }
        if let Some(ref id) = self.entity_id {
            parts.push(format!("id={}", id));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The database could not be opened or queried.
    #[error("Backend unavailable: {message} {context}")]
    Unavailable {
        message: String,
        context: ErrorContext,
    },

    /// A row did not decode into the expected TCE shape. The whole fetch is
    /// abandoned; no partial results are returned.
    #[error("Corrupt record: {message} {context}")]
    CorruptRecord {
        message: String,
        context: ErrorContext,
    },

    /// Configuration or initialization error.
    #[error("Configuration error: {message} {context}")]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    /// Internal/unexpected errors (e.g. a blocking task panicked).
    #[error("Internal error: {message} {context}")]
    Internal {
        message: String,
        context: ErrorContext,
    },
}

impl RepositoryError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn corrupt_record(message: impl Into<String>) -> Self {
        Self::CorruptRecord {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Get the error context.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Unavailable { context, .. }
            | Self::CorruptRecord { context, .. }
            | Self::Configuration { context, .. }
            | Self::Internal { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::Unavailable { context, .. }
            | Self::CorruptRecord { context, .. }
            | Self::Configuration { context, .. }
            | Self::Internal { context, .. } => context,
        }
    }

    /// Replace the error context wholesale, keeping any details already set.
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        let ctx = self.context_mut();
        let details = ctx.details.take();
        *ctx = context;
        if ctx.details.is_none() {
            ctx.details = details;
        }
        self
    }

    pub fn is_corrupt_record(&self) -> bool {
        matches!(self, Self::CorruptRecord { .. })
    }
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        use rusqlite::Error as E;
        match err {
            // Row-level decoding problems: the table does not hold what we expect.
            E::InvalidColumnType(idx, ref name, ref ty) => RepositoryError::CorruptRecord {
                message: err.to_string(),
                context: ErrorContext::default()
                    .with_details(format!("column={} index={} sql_type={}", name, idx, ty)),
            },
            E::FromSqlConversionFailure(idx, ref ty, _) => RepositoryError::CorruptRecord {
                message: err.to_string(),
                context: ErrorContext::default()
                    .with_details(format!("index={} sql_type={}", idx, ty)),
            },
            E::IntegralValueOutOfRange(idx, value) => RepositoryError::CorruptRecord {
                message: err.to_string(),
                context: ErrorContext::default()
                    .with_details(format!("index={} value={}", idx, value)),
            },
            E::InvalidColumnIndex(_) | E::InvalidColumnName(_) => {
                RepositoryError::corrupt_record(err.to_string())
            }
            E::SqliteFailure(ref code, _) => RepositoryError::Unavailable {
                message: err.to_string(),
                context: ErrorContext::default()
                    .with_details(format!("sqlite_code={:?}", code.code)),
            },
            other => RepositoryError::unavailable(other.to_string()),
        }
    }
}
