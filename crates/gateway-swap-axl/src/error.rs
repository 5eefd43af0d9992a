// crates/gateway-swap-axl/src/error.rs
// ============================================================================
// Module: AXL Errors
// Description: Error taxonomy for the AXL client.
// Purpose: Keep SOAP-level failures typed until they cross into the core API.
// Dependencies: gateway-swap-core, thiserror
// ============================================================================

//! AXL client error type and its mapping onto [`gateway_swap_core::ApiError`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use gateway_swap_core::ApiError;
use thiserror::Error;

use crate::xml::XmlError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// AXL client errors.
///
/// # Invariants
/// - Variants are stable for CLI error mapping and tests.
/// - String payloads are user-facing and may include untrusted server text.
#[derive(Debug, Error)]
pub enum AxlError {
    /// Configuration error.
    #[error("axl client config error: {0}")]
    Config(String),
    /// Transport error.
    #[error("axl transport error: {0}")]
    Transport(String),
    /// XML encoding or parsing error.
    #[error("axl xml error: {0}")]
    Xml(#[from] XmlError),
    /// The reply parsed but did not have the expected shape.
    #[error("axl protocol error: {0}")]
    Protocol(String),
    /// SOAP fault returned by the server.
    #[error("{message}")]
    Fault {
        /// `axlcode` from the fault detail, when present.
        code: Option<String>,
        /// `faultstring`, or `axlmessage` when the fault string is empty.
        message: String,
    },
    /// Response size exceeds limits.
    #[error("axl response exceeds size limit ({actual} > {limit})")]
    ResponseTooLarge {
        /// Actual size in bytes.
        actual: usize,
        /// Maximum size in bytes.
        limit: usize,
    },
    /// The API version could not be determined from the schema file.
    #[error("axl schema error: {0}")]
    Schema(String),
}

impl From<AxlError> for ApiError {
    fn from(err: AxlError) -> Self {
        match err {
            AxlError::Fault {
                code,
                message,
            } => Self::Fault {
                code,
                message,
            },
            AxlError::ResponseTooLarge {
                actual,
                limit,
            } => Self::ResponseTooLarge {
                actual,
                limit,
            },
            AxlError::Transport(message) => Self::Transport(message),
            err @ (AxlError::Config(_) | AxlError::Schema(_)) => Self::Transport(err.to_string()),
            err @ (AxlError::Xml(_) | AxlError::Protocol(_)) => Self::Protocol(err.to_string()),
        }
    }
}
