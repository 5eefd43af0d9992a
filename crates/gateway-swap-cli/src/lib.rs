// crates/gateway-swap-cli/src/lib.rs
// ============================================================================
// Module: Gateway Swap CLI Library
// Description: Shared helpers for the gateway-swap binary.
// Purpose: Expose i18n, configuration, and logging helpers for tests.
// Dependencies: gateway-swap-axl, gateway-swap-core, serde, toml, tracing-subscriber
// ============================================================================

//! ## Overview
//! The `gateway-swap` binary keeps its argument handling and rendering in
//! `main.rs`; the pieces that integration tests need to reach live here.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod i18n;
pub mod logging;
