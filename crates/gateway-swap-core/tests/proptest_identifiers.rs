// crates/gateway-swap-core/tests/proptest_identifiers.rs
// ============================================================================
// Module: Identifier Property Tests
// Description: Property coverage for UUID normalization.
// Purpose: Ensure normalization is stable and rejects unsafe query input.
// Dependencies: gateway-swap-core, proptest
// ============================================================================

//! ## Overview
//! Property tests over [`RawUuid`] normalization and the query it feeds.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use gateway_swap_core::AxlUuid;
use gateway_swap_core::RawUuid;
use gateway_swap_core::ports::member_query;
use proptest::prelude::*;

// ============================================================================
// SECTION: Unit Checks
// ============================================================================

#[test]
fn braced_upper_case_uuid_normalizes() {
    let raw = AxlUuid::new("{6F2A0C1E-9B3D-4E5F-A1B2-C3D4E5F60718}").to_raw().unwrap();
    assert_eq!(raw.as_str(), "6f2a0c1e-9b3d-4e5f-a1b2-c3d4e5f60718");
}

#[test]
fn bare_uuid_is_accepted() {
    let raw = RawUuid::parse("6f2a0c1e-9b3d-4e5f-a1b2-c3d4e5f60718").unwrap();
    assert_eq!(
        member_query(&raw),
        "SELECT * FROM mgcpdevicemember WHERE fkmgcp='6f2a0c1e-9b3d-4e5f-a1b2-c3d4e5f60718'"
    );
}

#[test]
fn simple_form_uuid_gains_hyphens() {
    let raw = RawUuid::parse("6F2A0C1E9B3D4E5FA1B2C3D4E5F60718").unwrap();
    assert_eq!(raw.as_str(), "6f2a0c1e-9b3d-4e5f-a1b2-c3d4e5f60718");
}

#[test]
fn malformed_uuids_are_rejected() {
    for value in [
        "",
        "{}",
        "{6F2A0C1E-9B3D-4E5F-A1B2}",
        "{6F2A0C1E-9B3D-4E5F-A1B2-C3D4E5F6071Z}",
        "{{6F2A0C1E-9B3D-4E5F-A1B2-C3D4E5F60718}}",
        "6f2a0c1e-9b3d-4e5f-a1b2-c3d4e5f6071' OR '1'='1",
    ] {
        assert!(RawUuid::parse(value).is_err(), "{value}");
    }
}

// ============================================================================
// SECTION: Properties
// ============================================================================

proptest! {
    #[test]
    fn normalization_is_idempotent_and_lower_case(bytes in proptest::array::uniform16(any::<u8>())) {
        let hex: String = bytes.iter().map(|b| format!("{b:02X}")).collect();
        let braced = format!(
            "{{{}-{}-{}-{}-{}}}",
            &hex[0..8], &hex[8..12], &hex[12..16], &hex[16..20], &hex[20..32]
        );
        let raw = RawUuid::parse(&braced).unwrap();
        prop_assert_eq!(raw.as_str().len(), 36);
        prop_assert!(!raw.as_str().contains(['{', '}']), "normalized UUID must not contain braces");
        prop_assert_eq!(raw.as_str(), raw.as_str().to_ascii_lowercase());
        prop_assert_eq!(RawUuid::parse(raw.as_str()).unwrap(), raw);
    }

    #[test]
    fn quotes_never_survive_normalization(value in ".*'.*") {
        prop_assert!(RawUuid::parse(&value).is_err());
    }

    #[test]
    fn normalized_query_only_carries_hex_and_hyphens(bytes in proptest::array::uniform16(any::<u8>())) {
        let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        let raw = RawUuid::parse(&hex).unwrap();
        let query = member_query(&raw);
        let literal = query
            .strip_prefix("SELECT * FROM mgcpdevicemember WHERE fkmgcp='")
            .and_then(|rest| rest.strip_suffix('\''))
            .unwrap();
        prop_assert!(literal.bytes().all(|b| b == b'-' || b.is_ascii_hexdigit()));
    }
}
