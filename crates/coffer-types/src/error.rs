//! Error types for Coffer
//!
//! One taxonomy for the whole workspace. Configuration errors are returned
//! synchronously and never retried; store not-found errors propagate
//! verbatim; codec and crypto errors carry a fixed contextual prefix over
//! the collaborator's message.

use thiserror::Error;

/// Result type for Coffer operations
pub type Result<T> = std::result::Result<T, CofferError>;

/// Coffer error types
#[derive(Debug, Clone, Error)]
pub enum CofferError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================

    /// No store resolved for the operation
    #[error("no store specified")]
    NoStore,

    /// No encryptor resolved for the operation
    #[error("no encryptor specified")]
    NoEncryptor,

    /// Hierarchical-deterministic creation without a seed
    #[error("no seed specified")]
    NoSeed,

    /// Named store kind not in the fixed set
    #[error("unknown wallet store \"{name}\"")]
    UnknownStore { name: String },

    /// Kind tag not in the alias table
    #[error("unsupported wallet type \"{kind}\"")]
    UnsupportedKind { kind: String },

    // ========================================================================
    // Store Errors
    // ========================================================================

    /// No wallet with this name in the store
    #[error("wallet \"{name}\" not found")]
    NotFound { name: String },

    /// A wallet with this name already exists in the store
    #[error("wallet \"{name}\" already exists")]
    AlreadyExists { name: String },

    /// Backend-side storage failure
    #[error("store error: {message}")]
    Store { message: String },

    // ========================================================================
    // Codec Errors
    // ========================================================================

    /// Malformed envelope JSON or missing type tag
    #[error("failed to decode wallet: {message}")]
    Decode { message: String },

    // ========================================================================
    // Crypto Errors
    // ========================================================================

    /// Could not decrypt an export blob
    #[error("failed to decrypt wallet: {message}")]
    Decrypt { message: String },

    /// Could not parse the export wrapper
    #[error("failed to import wallet: {message}")]
    Import { message: String },

    /// Collaborator-side encryption failure, message surfaced as-is
    #[error("{message}")]
    Crypto { message: String },

    // ========================================================================
    // General Errors
    // ========================================================================

    /// Malformed wallet/account path
    #[error("invalid account format")]
    InvalidPath,

    /// A delegated kind call exceeded the fixed bound
    #[error("operation timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

impl CofferError {
    /// Create a not-found error for a wallet name
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Create a backend storage error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a decrypt error
    pub fn decrypt(message: impl Into<String>) -> Self {
        Self::Decrypt {
            message: message.into(),
        }
    }

    /// Create an import error
    pub fn import(message: impl Into<String>) -> Self {
        Self::Import {
            message: message.into(),
        }
    }

    /// Create a collaborator-side crypto error
    pub fn crypto(message: impl Into<String>) -> Self {
        Self::Crypto {
            message: message.into(),
        }
    }

    /// Check whether enumeration may drop the offending record instead of
    /// aborting the stream
    pub fn is_per_record(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::UnsupportedKind { .. })
    }
}

impl From<serde_json::Error> for CofferError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}
