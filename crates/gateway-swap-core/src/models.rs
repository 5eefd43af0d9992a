// crates/gateway-swap-core/src/models.rs
// ============================================================================
// Module: Model Mapping
// Description: Static source-to-target hardware model table.
// Purpose: Translate a retiring gateway model into its replacement layout.
// Dependencies: crate::gateway
// ============================================================================

//! ## Overview
//! Each supported source model maps to exactly one replacement model with a
//! fixed single-unit, single-subunit layout and a port renumbering rule. The
//! VG420 is deliberately absent as a target: its 84/144 port cards do not line
//! up with the VG320, so the VG320 swaps to the 48-port VG410 layout.
//!
//! | Source | Target | Subunit card |
//! |--------|--------|--------------|
//! | VG204  | VG400  | VG-4FXS/4FXO |
//! | VG310  | VG410  | VG-24FXS     |
//! | VG320  | VG410  | VG-48FXS     |

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::gateway::GATEWAY_PROTOCOL;
use crate::gateway::GatewayDescriptor;
use crate::gateway::GatewayRecord;
use crate::gateway::GatewaySubunit;
use crate::gateway::GatewayUnit;
use crate::gateway::VendorConfig;

// ============================================================================
// SECTION: Port Renumbering
// ============================================================================

/// Renumbering rule for ports moving onto the replacement card.
///
/// # Invariants
/// - Ports on `subunit` are shifted by `offset`; all other ports keep their index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortOffsetRule {
    /// Source subunit whose ports are shifted.
    pub subunit: u32,
    /// Amount added to the port index.
    pub offset: u32,
}

impl PortOffsetRule {
    /// Computes the port index on the replacement card.
    ///
    /// Returns `None` when the shifted index does not fit in `u32`.
    #[must_use]
    pub const fn apply(self, source_subunit: u32, index: u32) -> Option<u32> {
        if source_subunit == self.subunit { index.checked_add(self.offset) } else { Some(index) }
    }
}

/// Second-card ports land after the 24 ports of the first card.
const SECOND_CARD_OFFSET: PortOffsetRule = PortOffsetRule {
    subunit: 1,
    offset: 24,
};

// ============================================================================
// SECTION: Mapping Table
// ============================================================================

/// Replacement layout for one source model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelMapping {
    /// Source model as reported by the call-control system.
    pub source_product: &'static str,
    /// Replacement model.
    pub target_product: &'static str,
    /// Unit index on the replacement.
    pub unit_index: u32,
    /// Unit (module) product on the replacement.
    pub unit_product: &'static str,
    /// Subunit index on the replacement.
    pub subunit_index: u32,
    /// Subunit (card) product on the replacement.
    pub subunit_product: &'static str,
    /// First port number on the replacement card.
    pub begin_port: u32,
    /// Port renumbering rule for endpoints moved to the replacement.
    pub port_offset: PortOffsetRule,
}

/// Supported swaps.
pub const MODEL_MAPPINGS: &[ModelMapping] = &[
    ModelMapping {
        source_product: "VG204",
        target_product: "VG400",
        unit_index: 0,
        unit_product: "VG-1NIM-MBRD",
        subunit_index: 1,
        subunit_product: "VG-4FXS/4FXO",
        begin_port: 0,
        port_offset: SECOND_CARD_OFFSET,
    },
    ModelMapping {
        source_product: "VG310",
        target_product: "VG410",
        unit_index: 0,
        unit_product: "VG-1NIM-MBRD",
        subunit_index: 1,
        subunit_product: "VG-24FXS",
        begin_port: 0,
        port_offset: SECOND_CARD_OFFSET,
    },
    ModelMapping {
        source_product: "VG320",
        target_product: "VG410",
        unit_index: 0,
        unit_product: "VG-1NIM-MBRD",
        subunit_index: 1,
        subunit_product: "VG-48FXS",
        begin_port: 0,
        port_offset: SECOND_CARD_OFFSET,
    },
];

impl ModelMapping {
    /// Looks up the mapping for a source model (ASCII case-insensitive, trimmed).
    #[must_use]
    pub fn for_source(product: &str) -> Option<&'static Self> {
        let product = product.trim();
        MODEL_MAPPINGS.iter().find(|mapping| mapping.source_product.eq_ignore_ascii_case(product))
    }

    /// Builds the replacement gateway descriptor for `source`.
    #[must_use]
    pub fn gateway_descriptor(
        &self,
        source: &GatewayRecord,
        domain_name: String,
        vendor_config: VendorConfig,
    ) -> GatewayDescriptor {
        GatewayDescriptor {
            domain_name,
            product: self.target_product.to_string(),
            protocol: GATEWAY_PROTOCOL.to_string(),
            description: source.description.clone(),
            call_manager_group: source.call_manager_group.clone(),
            units: vec![GatewayUnit {
                index: self.unit_index,
                product: self.unit_product.to_string(),
                subunits: vec![GatewaySubunit {
                    index: self.subunit_index,
                    product: self.subunit_product.to_string(),
                    begin_port: self.begin_port,
                }],
            }],
            vendor_config,
        }
    }
}
