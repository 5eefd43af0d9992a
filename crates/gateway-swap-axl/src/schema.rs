// crates/gateway-swap-axl/src/schema.rs
// ============================================================================
// Module: AXL Schema Version
// Description: API version handling and discovery from the local WSDL.
// Purpose: Derive the request namespace and SOAPAction for a publisher.
// Dependencies: gateway-swap-core, crate::xml
// ============================================================================

//! ## Overview
//! Every AXL request is tied to a schema version: it selects the body
//! namespace (`http://www.cisco.com/AXL/API/<version>`) and appears in the
//! `SOAPAction` header. The version is either given explicitly or read from
//! the downloaded `AXLAPI.wsdl`, which declares the versioned namespace.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::fs;
use std::path::Path;

use gateway_swap_core::ApiOperation;

use crate::error::AxlError;
use crate::xml::XmlElement;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Prefix shared by every versioned AXL namespace.
pub const AXL_NAMESPACE_PREFIX: &str = "http://www.cisco.com/AXL/API/";

// ============================================================================
// SECTION: Version
// ============================================================================

/// AXL schema version in `<major>.<minor>` form.
///
/// # Invariants
/// - Both components are non-empty ASCII digit runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxlVersion(String);

impl AxlVersion {
    /// Parses a `<major>.<minor>` version string.
    ///
    /// # Errors
    ///
    /// Returns [`AxlError::Config`] when the value is not a dotted numeric pair.
    pub fn parse(value: &str) -> Result<Self, AxlError> {
        let value = value.trim();
        let valid = value.split_once('.').is_some_and(|(major, minor)| {
            is_digits(major) && is_digits(minor)
        });
        if !valid {
            return Err(AxlError::Config(format!("invalid axl api version: {value}")));
        }
        Ok(Self(value.to_string()))
    }

    /// Returns the version string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the request body namespace for this version.
    #[must_use]
    pub fn namespace(&self) -> String {
        format!("{AXL_NAMESPACE_PREFIX}{}", self.0)
    }

    /// Returns the quoted `SOAPAction` header value for `operation`.
    #[must_use]
    pub fn soap_action(&self, operation: ApiOperation) -> String {
        format!("\"CUCM:DB ver={} {}\"", self.0, operation.as_str())
    }

    /// Extracts the version from a versioned AXL namespace URI.
    #[must_use]
    pub fn from_namespace(namespace: &str) -> Option<Self> {
        let version = namespace.trim().strip_prefix(AXL_NAMESPACE_PREFIX)?;
        Self::parse(version.trim_end_matches('/')).ok()
    }
}

impl fmt::Display for AxlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns true for a non-empty run of ASCII digits.
fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

// ============================================================================
// SECTION: Discovery
// ============================================================================

/// Reads the AXL version from the versioned namespace declared in a WSDL or XSD.
///
/// # Errors
///
/// Returns [`AxlError::Schema`] when the file cannot be read or parsed, or
/// declares no versioned AXL namespace.
pub fn load_schema_version(path: &Path) -> Result<AxlVersion, AxlError> {
    let text = fs::read_to_string(path)
        .map_err(|err| AxlError::Schema(format!("failed to read {}: {err}", path.display())))?;
    let root = XmlElement::parse(&text)
        .map_err(|err| AxlError::Schema(format!("failed to parse {}: {err}", path.display())))?;
    root.find_attribute_value(&|value| AxlVersion::from_namespace(value).is_some())
        .and_then(AxlVersion::from_namespace)
        .ok_or_else(|| {
            AxlError::Schema(format!("no axl api namespace declared in {}", path.display()))
        })
}
