// crates/gateway-swap-core/src/ports.rs
// ============================================================================
// Module: Port Enumeration
// Description: Direct-query construction and row decoding for gateway ports.
// Purpose: List the analog endpoints attached to an MGCP gateway.
// Dependencies: thiserror, crate::api, crate::identifiers
// ============================================================================

//! ## Overview
//! The structured API has no call that lists the endpoints of an MGCP gateway,
//! so ports are found by querying `mgcpdevicemember` for rows whose `fkmgcp`
//! is the gateway's raw identifier. Each row's `fkdevice` is the endpoint id.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::api::SqlRow;
use crate::identifiers::AxlUuid;
use crate::identifiers::RawUuid;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Column holding the endpoint identifier.
pub const DEVICE_COLUMN: &str = "fkdevice";

// ============================================================================
// SECTION: Query
// ============================================================================

/// Builds the member query for a gateway.
///
/// `gateway` is validated hex, so interpolation cannot alter the statement.
#[must_use]
pub fn member_query(gateway: &RawUuid) -> String {
    format!("SELECT * FROM mgcpdevicemember WHERE fkmgcp='{gateway}'")
}

// ============================================================================
// SECTION: Rows
// ============================================================================

/// A required column was absent or empty in a query row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("query row {row} is missing column {column}")]
pub struct MissingColumn {
    /// Zero-based row position.
    pub row: usize,
    /// Column name.
    pub column: &'static str,
}

/// One gateway membership row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortMember {
    /// Endpoint identifier in API form.
    pub device: AxlUuid,
}

impl PortMember {
    /// Decodes a membership row.
    ///
    /// # Errors
    ///
    /// Returns [`MissingColumn`] when `fkdevice` is absent or empty.
    pub fn from_row(position: usize, row: &SqlRow) -> Result<Self, MissingColumn> {
        let device = row.column(DEVICE_COLUMN).ok_or(MissingColumn {
            row: position,
            column: DEVICE_COLUMN,
        })?;
        Ok(Self {
            device: AxlUuid::new(device),
        })
    }
}
