// crates/gateway-swap-axl/src/lib.rs
// ============================================================================
// Module: Gateway Swap AXL Client
// Description: SOAP/AXL implementation of the administrative API.
// Purpose: Encode requests, decode responses, and talk to the publisher.
// Dependencies: gateway-swap-core, quick-xml, reqwest, thiserror, tracing
// ============================================================================

//! ## Overview
//! [`AxlClient`] implements [`gateway_swap_core::AdminApi`] over AXL SOAP 1.1.
//! Request envelopes are written with `quick-xml`, replies are parsed into a
//! small element tree and decoded into the typed records the swap pipeline
//! consumes. Faults are recognized before the HTTP status is considered.
//!
//! Security posture: response bodies are untrusted and size-bounded; the
//! credentials never appear in logs or in `Debug` output.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod response;
pub mod schema;
pub mod xml;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client::AxlClient;
pub use config::AxlClientConfig;
pub use config::DEFAULT_AXL_PORT;
pub use config::DEFAULT_MAX_RESPONSE_BYTES;
pub use config::DEFAULT_TIMEOUT;
pub use config::endpoint_for_host;
pub use config::parse_endpoint;
pub use error::AxlError;
pub use schema::AxlVersion;
pub use schema::load_schema_version;
pub use xml::XmlElement;
pub use xml::XmlError;
