// crates/gateway-swap-core/src/lib.rs
// ============================================================================
// Module: Gateway Swap Core
// Description: Typed gateway/endpoint model, model mapping, and swap pipeline.
// Purpose: Provide the backend-agnostic logic for like-for-like gateway swaps.
// Dependencies: serde, thiserror, tracing
// ============================================================================

//! ## Overview
//! This crate holds everything about a gateway swap that does not touch the
//! network: the records read from the call-control system, the descriptors
//! submitted back to it, the static model mapping table, identifier
//! normalization for direct queries, and the linear swap pipeline that drives
//! an [`AdminApi`] implementation.
//!
//! Invariants:
//! - Records are decoded once at the API boundary and never mutated.
//! - Descriptors are built from records and submitted at most once.
//! - Unsupported source models fail before any creation call is issued.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod api;
pub mod endpoint;
pub mod gateway;
pub mod identifiers;
pub mod models;
pub mod pipeline;
pub mod ports;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use api::AdminApi;
pub use api::ApiError;
pub use api::ApiOperation;
pub use api::SqlRow;
pub use endpoint::AnalogEndpointDescriptor;
pub use endpoint::AnalogEndpointRecord;
pub use endpoint::AnalogPortSettings;
pub use endpoint::DEFAULT_ANALOG_PORT;
pub use endpoint::LineDescriptor;
pub use endpoint::LineRecord;
pub use gateway::GatewayDescriptor;
pub use gateway::GatewayRecord;
pub use gateway::GatewaySubunit;
pub use gateway::GatewayUnit;
pub use gateway::VendorConfig;
pub use gateway::VendorConfigEntry;
pub use identifiers::AxlUuid;
pub use identifiers::RawUuid;
pub use models::MODEL_MAPPINGS;
pub use models::ModelMapping;
pub use models::PortOffsetRule;
pub use pipeline::GatewaySwap;
pub use pipeline::MigratedEndpoint;
pub use pipeline::NoopObserver;
pub use pipeline::SwapError;
pub use pipeline::SwapEvent;
pub use pipeline::SwapInterrupted;
pub use pipeline::SwapObserver;
pub use pipeline::SwapOptions;
pub use pipeline::SwapReport;
pub use ports::PortMember;
