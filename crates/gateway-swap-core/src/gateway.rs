// crates/gateway-swap-core/src/gateway.rs
// ============================================================================
// Module: Gateway Model
// Description: Gateway records read from AXL and descriptors submitted to it.
// Purpose: Give the gateway lookup and creation calls typed shapes.
// Dependencies: serde, crate::identifiers
// ============================================================================

//! ## Overview
//! A [`GatewayRecord`] is what `getGateway` returns for the source device. A
//! [`GatewayDescriptor`] is what `addGateway` accepts for the replacement. The
//! unit/subunit hierarchy is shared between the two.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::identifiers::AxlUuid;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Signaling protocol used for every replacement gateway.
pub const GATEWAY_PROTOCOL: &str = "MGCP";

// ============================================================================
// SECTION: Hardware Hierarchy
// ============================================================================

/// Physical unit (module slot) of a gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayUnit {
    /// Slot index.
    pub index: u32,
    /// Module product name.
    pub product: String,
    /// Subunits (cards) installed in this unit.
    pub subunits: Vec<GatewaySubunit>,
}

/// Subunit (voice card) installed in a gateway unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewaySubunit {
    /// Subunit index within the unit.
    pub index: u32,
    /// Card product name.
    pub product: String,
    /// First port number on the card.
    pub begin_port: u32,
}

// ============================================================================
// SECTION: Gateway Record
// ============================================================================

/// Source gateway as returned by `getGateway`.
///
/// # Invariants
/// - Values are untrusted remote data; only `uuid` is required to be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayRecord {
    /// Internal identifier (braced, upper-case).
    pub uuid: AxlUuid,
    /// Gateway domain name.
    pub domain_name: String,
    /// Hardware model, for example `VG310`.
    pub product: String,
    /// Signaling protocol.
    pub protocol: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Owning call-manager group.
    pub call_manager_group: Option<String>,
    /// Installed units.
    pub units: Vec<GatewayUnit>,
}

// ============================================================================
// SECTION: Vendor Configuration
// ============================================================================

/// One vendor-specific configuration element, rendered as `<name>value</name>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorConfigEntry {
    /// XML element name.
    pub name: String,
    /// Element text.
    pub value: String,
}

/// Ordered vendor configuration attached to a new gateway.
///
/// # Invariants
/// - Every entry name is a valid XML element name (see [`VendorConfig::invalid_entry`]).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VendorConfig {
    /// Entries in submission order.
    pub entries: Vec<VendorConfigEntry>,
}

impl VendorConfig {
    /// Builds a vendor configuration from `(name, value)` pairs.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(name, value)| VendorConfigEntry {
                    name: name.into(),
                    value: value.into(),
                })
                .collect(),
        }
    }

    /// Fax/modem settings applied to every swapped gateway unless overridden.
    #[must_use]
    pub fn swap_defaults() -> Self {
        Self::from_pairs([("ModemPassthrough", "Disable"), ("T38FaxRelay", "Enable")])
    }

    /// Returns true when there are no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the first entry whose name is not a usable XML element name.
    #[must_use]
    pub fn invalid_entry(&self) -> Option<&VendorConfigEntry> {
        self.entries.iter().find(|entry| !is_element_name(&entry.name))
    }
}

/// Returns true for an ASCII letter followed by letters, digits, `_` or `-`.
fn is_element_name(name: &str) -> bool {
    let mut bytes = name.bytes();
    bytes.next().is_some_and(|first| first.is_ascii_alphabetic())
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

// ============================================================================
// SECTION: Gateway Descriptor
// ============================================================================

/// Replacement gateway submitted with `addGateway`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayDescriptor {
    /// New gateway domain name.
    pub domain_name: String,
    /// Target hardware model.
    pub product: String,
    /// Signaling protocol (always [`GATEWAY_PROTOCOL`]).
    pub protocol: String,
    /// Description carried over from the source gateway.
    pub description: Option<String>,
    /// Call-manager group carried over from the source gateway.
    pub call_manager_group: Option<String>,
    /// Unit/subunit layout for the target model.
    pub units: Vec<GatewayUnit>,
    /// Vendor-specific configuration elements.
    pub vendor_config: VendorConfig,
}
