// crates/gateway-swap-core/src/api.rs
// ============================================================================
// Module: Administrative API Interface
// Description: Backend-agnostic contract for the call-control admin API.
// Purpose: Decouple the swap pipeline from the SOAP transport.
// Dependencies: serde, thiserror, crate model types
// ============================================================================

//! ## Overview
//! [`AdminApi`] names the five remote operations a gateway swap needs. Each
//! returns a typed record decoded at the boundary; implementations must not
//! hand loosely-typed response trees to the pipeline.
//!
//! Implementations are synchronous: one request, one response, fixed timeout.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::endpoint::AnalogEndpointDescriptor;
use crate::endpoint::AnalogEndpointRecord;
use crate::gateway::GatewayDescriptor;
use crate::gateway::GatewayRecord;
use crate::identifiers::AxlUuid;

// ============================================================================
// SECTION: Operations
// ============================================================================

/// Remote operations used by a gateway swap.
///
/// # Invariants
/// - [`ApiOperation::as_str`] returns the AXL request element name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ApiOperation {
    /// `getGateway`.
    GetGateway,
    /// `executeSQLQuery`.
    ExecuteSqlQuery,
    /// `addGateway`.
    AddGateway,
    /// `getGatewayEndpointAnalogAccess`.
    GetGatewayEndpointAnalogAccess,
    /// `addGatewayEndpointAnalogAccess`.
    AddGatewayEndpointAnalogAccess,
}

impl ApiOperation {
    /// Returns the AXL operation name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GetGateway => "getGateway",
            Self::ExecuteSqlQuery => "executeSQLQuery",
            Self::AddGateway => "addGateway",
            Self::GetGatewayEndpointAnalogAccess => "getGatewayEndpointAnalogAccess",
            Self::AddGatewayEndpointAnalogAccess => "addGatewayEndpointAnalogAccess",
        }
    }
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Administrative API errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - String payloads may contain untrusted server text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server rejected the request with a fault.
    #[error("{message}")]
    Fault {
        /// Vendor error code, when supplied.
        code: Option<String>,
        /// Fault message.
        message: String,
    },
    /// The request could not be delivered or the reply could not be read.
    #[error("transport error: {0}")]
    Transport(String),
    /// The reply was delivered but did not have the expected shape.
    #[error("protocol error: {0}")]
    Protocol(String),
    /// The reply exceeded the configured size limit.
    #[error("response exceeds size limit ({actual} > {limit})")]
    ResponseTooLarge {
        /// Observed size in bytes.
        actual: usize,
        /// Maximum size in bytes.
        limit: usize,
    },
}

// ============================================================================
// SECTION: Direct Query Rows
// ============================================================================

/// One row returned by a direct query, as column name/value pairs.
///
/// # Invariants
/// - Column order follows the response; empty values are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SqlRow {
    /// Columns in response order.
    pub columns: Vec<(String, Option<String>)>,
}

impl SqlRow {
    /// Builds a row from `(column, value)` pairs.
    #[must_use]
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<String>)>,
        K: Into<String>,
    {
        Self {
            columns: pairs.into_iter().map(|(name, value)| (name.into(), value)).collect(),
        }
    }

    /// Returns the first non-empty value of `name`.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .and_then(|(_, value)| value.as_deref())
    }
}

// ============================================================================
// SECTION: Admin API
// ============================================================================

/// Call-control administrative API used by the swap pipeline.
pub trait AdminApi {
    /// Looks up a gateway by domain name.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the gateway does not exist or the call fails.
    fn get_gateway(&self, domain_name: &str) -> Result<GatewayRecord, ApiError>;

    /// Runs a direct query against the configuration store.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the query is rejected or the call fails.
    fn execute_sql_query(&self, sql: &str) -> Result<Vec<SqlRow>, ApiError>;

    /// Creates a gateway and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the gateway is rejected or the call fails.
    fn add_gateway(&self, gateway: &GatewayDescriptor) -> Result<AxlUuid, ApiError>;

    /// Fetches an analog access endpoint by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the endpoint does not exist or the call fails.
    fn get_gateway_endpoint_analog_access(
        &self,
        uuid: &AxlUuid,
    ) -> Result<AnalogEndpointRecord, ApiError>;

    /// Creates an analog access endpoint and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the endpoint is rejected or the call fails.
    fn add_gateway_endpoint_analog_access(
        &self,
        endpoint: &AnalogEndpointDescriptor,
    ) -> Result<AxlUuid, ApiError>;
}
