//! Error types for VEIL.
//!
//! Every protocol error is a local validation failure surfaced to the
//! immediate caller. Operations either apply their state change fully or
//! not at all, so none of these errors leave partial mutations behind.

use thiserror::Error;

/// Result type alias using `VeilError`.
pub type Result<T> = std::result::Result<T, VeilError>;

/// Main error type for all VEIL operations.
#[derive(Debug, Error)]
pub enum VeilError {
    // ═══════════════════════════════════════════════════════════════════════════
    // INPUT VALIDATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Malformed hex input (digest primitive, keys, tags).
    #[error("Invalid hex encoding: {0}")]
    InvalidEncoding(String),

    /// Missing or malformed key fields in a meta-address.
    #[error("Invalid meta-address: {0}")]
    InvalidMetaAddress(String),

    /// Deposit amount is zero, negative, non-integral, or out of range.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// A required request parameter was not supplied.
    #[error("Missing parameters: {0}")]
    MissingParameters(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // LOOKUP ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Deposit references an announcement id the ledger does not hold.
    #[error("Unknown announcement: {0}")]
    UnknownAnnouncement(u64),

    /// No meta-address is published for the name.
    #[error("No meta-address registered for '{0}'")]
    NotRegistered(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // BACKEND ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Announcement ledger backend failure.
    #[error("Ledger error: {0}")]
    LedgerError(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<hex::FromHexError> for VeilError {
    fn from(err: hex::FromHexError) -> Self {
        VeilError::InvalidEncoding(err.to_string())
    }
}

impl VeilError {
    /// Returns true if the caller can correct this error by fixing its input.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            VeilError::InvalidEncoding(_)
                | VeilError::InvalidMetaAddress(_)
                | VeilError::InvalidAmount(_)
                | VeilError::MissingParameters(_)
        )
    }

    /// Returns true if the error reports a missing record.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            VeilError::UnknownAnnouncement(_) | VeilError::NotRegistered(_)
        )
    }
}
