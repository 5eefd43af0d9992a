// crates/gateway-swap-core/src/endpoint.rs
// ============================================================================
// Module: Analog Endpoint Model
// Description: Analog access endpoint records, descriptors, and port defaults.
// Purpose: Carry per-port configuration from the source gateway to the new one.
// Dependencies: serde, thiserror, crate::identifiers, crate::models
// ============================================================================

//! ## Overview
//! Every FXS port on the source gateway is read as an [`AnalogEndpointRecord`]
//! and re-created as an [`AnalogEndpointDescriptor`] on the replacement. Only
//! the line (DN, partition, display, external mask), description, device pool
//! and location travel across; port signaling uses [`DEFAULT_ANALOG_PORT`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::identifiers::AxlUuid;
use crate::models::ModelMapping;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Product name of a replacement endpoint.
pub const ENDPOINT_PRODUCT: &str = "Cisco MGCP FXS Port";
/// Device class of a replacement endpoint.
pub const ENDPOINT_CLASS: &str = "Gateway";
/// Protocol of a replacement endpoint.
pub const ENDPOINT_PROTOCOL: &str = "Analog Access";
/// Protocol side of a replacement endpoint.
pub const ENDPOINT_PROTOCOL_SIDE: &str = "User";
/// Trunk selection order of a replacement endpoint.
pub const TRUNK_SELECTION_ORDER: &str = "Top Down";

// ============================================================================
// SECTION: Port Settings
// ============================================================================

/// Fixed signaling parameters applied to every re-created FXS port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalogPortSettings {
    /// Port number within the endpoint.
    pub port_number: u32,
    /// Caller ID generation.
    pub caller_id_enable: bool,
    /// Calling party selection.
    pub calling_party_selection: &'static str,
    /// Expected digit count.
    pub expected_digits: u32,
    /// Significant digit count.
    pub sig_digits: u32,
    /// Whether significant digit truncation is enabled.
    pub sig_digits_enable: bool,
    /// Calling line presentation.
    pub presentation_bit: &'static str,
    /// Silence suppression threshold.
    pub silence_suppression_threshold: &'static str,
    /// SMDI port number.
    pub smdi_port_number: u32,
    /// Trunk type.
    pub trunk: &'static str,
    /// Trunk direction.
    pub trunk_direction: &'static str,
    /// Trunk level.
    pub trunk_level: &'static str,
    /// Receive pad.
    pub trunk_pad_rx: &'static str,
    /// Transmit pad.
    pub trunk_pad_tx: &'static str,
    /// Timers 1 through 6, in milliseconds.
    pub timers: [u32; 6],
}

/// Loop-start FXS defaults used for every migrated port.
pub const DEFAULT_ANALOG_PORT: AnalogPortSettings = AnalogPortSettings {
    port_number: 1,
    caller_id_enable: false,
    calling_party_selection: "Originator",
    expected_digits: 10,
    sig_digits: 10,
    sig_digits_enable: false,
    presentation_bit: "Allowed",
    silence_suppression_threshold: "Disable",
    smdi_port_number: 2048,
    trunk: "POTS",
    trunk_direction: "Bothways",
    trunk_level: "ONS",
    trunk_pad_rx: "NoDbPadding",
    trunk_pad_tx: "NoDbPadding",
    timers: [200, 0, 100, 1000, 0, 0],
};

// ============================================================================
// SECTION: Endpoint Record
// ============================================================================

/// First line configured on a source endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    /// Directory number pattern.
    pub pattern: String,
    /// Route partition of the directory number.
    pub partition: Option<String>,
    /// Caller ID display name.
    pub display: Option<String>,
    /// External phone number mask.
    pub e164_mask: Option<String>,
}

/// Source endpoint as returned by `getGatewayEndpointAnalogAccess`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalogEndpointRecord {
    /// Endpoint identifier.
    pub uuid: AxlUuid,
    /// Owning gateway domain.
    pub domain_name: String,
    /// Physical unit.
    pub unit: u32,
    /// Physical subunit.
    pub subunit: u32,
    /// Slot-relative port index.
    pub index: u32,
    /// Endpoint name (`AALN/...`).
    pub name: String,
    /// Endpoint description.
    pub description: Option<String>,
    /// Device pool name.
    pub device_pool: Option<String>,
    /// Location name.
    pub location: Option<String>,
    /// First configured line, when any.
    pub line: Option<LineRecord>,
}

// ============================================================================
// SECTION: Endpoint Descriptor
// ============================================================================

/// Line submitted with a replacement endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineDescriptor {
    /// Line index on the port.
    pub index: u32,
    /// Directory number pattern.
    pub pattern: String,
    /// Route partition of the directory number.
    pub partition: Option<String>,
    /// Caller ID display name.
    pub display: Option<String>,
    /// External phone number mask.
    pub e164_mask: Option<String>,
}

/// Replacement endpoint submitted with `addGatewayEndpointAnalogAccess`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalogEndpointDescriptor {
    /// Replacement gateway domain.
    pub domain_name: String,
    /// Unit on the replacement gateway.
    pub unit: u32,
    /// Subunit on the replacement gateway.
    pub subunit: u32,
    /// Port index on the replacement card.
    pub index: u32,
    /// Endpoint name (`AALN/S{unit}/SU{subunit}/{index}@{domain}`).
    pub name: String,
    /// Description carried from the source endpoint.
    pub description: Option<String>,
    /// Endpoint product.
    pub product: &'static str,
    /// Device class.
    pub class: &'static str,
    /// Endpoint protocol.
    pub protocol: &'static str,
    /// Protocol side.
    pub protocol_side: &'static str,
    /// Device pool carried from the source endpoint.
    pub device_pool: Option<String>,
    /// Location carried from the source endpoint.
    pub location: Option<String>,
    /// Port signaling settings.
    pub port: AnalogPortSettings,
    /// Line carried from the source endpoint.
    pub line: LineDescriptor,
    /// Trunk selection order.
    pub trunk_selection_order: &'static str,
}

/// Errors raised while mapping a source endpoint onto the replacement card.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointMappingError {
    /// The source endpoint has no line to carry across.
    #[error("endpoint {name} has no directory number line")]
    MissingLine {
        /// Source endpoint name.
        name: String,
    },
    /// Renumbering pushed the port index past the representable range.
    #[error("port index {index} on subunit {subunit} overflows after renumbering")]
    PortIndexOverflow {
        /// Source subunit.
        subunit: u32,
        /// Source port index.
        index: u32,
    },
}

impl AnalogEndpointDescriptor {
    /// Maps `source` onto the replacement layout described by `mapping`.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointMappingError`] when the source has no line or the
    /// renumbered index overflows.
    pub fn for_replacement(
        source: &AnalogEndpointRecord,
        mapping: &ModelMapping,
        domain_name: &str,
    ) -> Result<Self, EndpointMappingError> {
        let line = source.line.as_ref().ok_or_else(|| EndpointMappingError::MissingLine {
            name: source.name.clone(),
        })?;
        let index = mapping.port_offset.apply(source.subunit, source.index).ok_or(
            EndpointMappingError::PortIndexOverflow {
                subunit: source.subunit,
                index: source.index,
            },
        )?;
        Ok(Self {
            domain_name: domain_name.to_string(),
            unit: mapping.unit_index,
            subunit: mapping.subunit_index,
            index,
            name: endpoint_name(mapping.unit_index, mapping.subunit_index, index, domain_name),
            description: source.description.clone(),
            product: ENDPOINT_PRODUCT,
            class: ENDPOINT_CLASS,
            protocol: ENDPOINT_PROTOCOL,
            protocol_side: ENDPOINT_PROTOCOL_SIDE,
            device_pool: source.device_pool.clone(),
            location: source.location.clone(),
            port: DEFAULT_ANALOG_PORT,
            line: LineDescriptor {
                index: 1,
                pattern: line.pattern.clone(),
                partition: line.partition.clone(),
                display: line.display.clone(),
                e164_mask: line.e164_mask.clone(),
            },
            trunk_selection_order: TRUNK_SELECTION_ORDER,
        })
    }
}

/// Formats an analog access endpoint name.
#[must_use]
pub fn endpoint_name(unit: u32, subunit: u32, index: u32, domain_name: &str) -> String {
    format!("AALN/S{unit}/SU{subunit}/{index}@{domain_name}")
}
