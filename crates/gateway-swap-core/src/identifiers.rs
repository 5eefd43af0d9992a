// crates/gateway-swap-core/src/identifiers.rs
// ============================================================================
// Module: Gateway Swap Identifiers
// Description: Device identifiers in API form and raw database form.
// Purpose: Normalize AXL UUIDs for use in direct configuration-store queries.
// Dependencies: serde, thiserror, uuid
// ============================================================================

//! ## Overview
//! Structured AXL requests return device identifiers upper-cased and wrapped
//! in braces (`{6F2A0C1E-...}`), while the configuration store keeps them
//! lower-case without braces. [`RawUuid`] is the only form that may be
//! interpolated into a direct query, so it is parsed with [`uuid::Uuid`] and
//! stored in hyphenated lower-case form at construction.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Identifier could not be normalized into the raw store form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid device uuid: {value}")]
pub struct InvalidUuid {
    /// Offending input value.
    pub value: String,
}

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Device identifier exactly as returned by the AXL API.
///
/// # Invariants
/// - Opaque; no format is enforced until converted with [`AxlUuid::to_raw`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxlUuid(String);

impl AxlUuid {
    /// Wraps an API identifier string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier string as received.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the identifier into its raw configuration-store form.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidUuid`] when the identifier is not a UUID.
    pub fn to_raw(&self) -> Result<RawUuid, InvalidUuid> {
        RawUuid::parse(&self.0)
    }
}

impl fmt::Display for AxlUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Device identifier in configuration-store form: lower-case, unbraced.
///
/// # Invariants
/// - Always a canonical 8-4-4-4-12 UUID of lower-case hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RawUuid(String);

impl RawUuid {
    /// Normalizes a braced or bare UUID in any case into the raw form.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidUuid`] when the value is not a UUID in hyphenated,
    /// simple, braced, or URN form.
    pub fn parse(value: &str) -> Result<Self, InvalidUuid> {
        let uuid = Uuid::parse_str(value.trim()).map_err(|_| InvalidUuid {
            value: value.to_string(),
        })?;
        Ok(Self(uuid.hyphenated().to_string()))
    }

    /// Returns the raw identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RawUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
