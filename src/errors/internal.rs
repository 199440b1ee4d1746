use thiserror::Error;

/// Internal error type for store and service operations.
///
/// Domain failures (NotFound, Conflict, Forbidden, Validation) describe why a
/// workflow operation was refused; the infrastructure variants (Database,
/// Transaction) wrap the underlying driver error. This type is NOT exposed
/// via API - the API layer converts it to `ApiError`.
#[derive(Error, Debug)]
pub enum ForumError {
    /// A referenced entity id does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The operation clashes with existing state (duplicate vote, tag in
    /// use, duplicate username/email, merging a tag with itself)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The acting user is not allowed to perform the operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Input failed validation (missing/oversized fields, non-image upload)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Database query or operation failed
    #[error("Database error: {operation} failed: {source}")]
    Database {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    /// Database transaction begin/commit failed
    #[error("Transaction error: {operation} failed: {source}")]
    Transaction {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    /// Cryptographic operation failed (hashing, token signing)
    #[error("Crypto error: {operation} failed: {message}")]
    Crypto { operation: String, message: String },

    /// File storage operation failed
    #[error("Storage error: {operation} failed: {message}")]
    Storage { operation: String, message: String },
}

impl ForumError {
    /// Create a NotFound error for an entity id
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a database error with operation context
    pub fn database(operation: impl Into<String>, source: sea_orm::DbErr) -> Self {
        Self::Database {
            operation: operation.into(),
            source,
        }
    }

    /// Create a transaction error with operation context
    pub fn transaction(operation: impl Into<String>, source: sea_orm::DbErr) -> Self {
        Self::Transaction {
            operation: operation.into(),
            source,
        }
    }

    /// Create a crypto error with operation context
    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a storage error with operation context
    pub fn storage(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            operation: operation.into(),
            message: message.into(),
        }
    }
}
