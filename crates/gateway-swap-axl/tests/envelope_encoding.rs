// crates/gateway-swap-axl/tests/envelope_encoding.rs
// ============================================================================
// Module: Envelope Encoding Tests
// Description: Structure and escaping of encoded AXL requests.
// Purpose: Ensure requests carry the fields and order the publisher expects.
// Dependencies: gateway-swap-axl, gateway-swap-core
// ============================================================================

//! ## Overview
//! Encodes each request, parses it back with [`XmlElement`], and checks the
//! namespace, element order, and field values.

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

use gateway_swap_axl::AxlVersion;
use gateway_swap_axl::XmlElement;
use gateway_swap_axl::envelope;
use gateway_swap_core::AnalogEndpointDescriptor;
use gateway_swap_core::AnalogEndpointRecord;
use gateway_swap_core::ApiOperation;
use gateway_swap_core::AxlUuid;
use gateway_swap_core::GatewayRecord;
use gateway_swap_core::LineRecord;
use gateway_swap_core::ModelMapping;
use gateway_swap_core::VendorConfig;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn version() -> AxlVersion {
    AxlVersion::parse("14.0").unwrap()
}

/// Returns the request element inside the SOAP body.
fn request(xml: &str, operation: ApiOperation) -> XmlElement {
    let root = XmlElement::parse(xml).unwrap();
    assert_eq!(root.name, "Envelope");
    let body = root.child("Body").unwrap();
    let request = body.child(operation.as_str()).unwrap();
    request.clone()
}

fn child_names(element: &XmlElement) -> Vec<&str> {
    element.children.iter().map(|child| child.name.as_str()).collect()
}

fn source_gateway() -> GatewayRecord {
    GatewayRecord {
        uuid: AxlUuid::new("{6F2A0C1E-9B3D-4E5F-A1B2-C3D4E5F60718}"),
        domain_name: "vg-lobby.example.com".to_string(),
        product: "VG320".to_string(),
        protocol: "MGCP".to_string(),
        description: Some("Lobby & <annex>".to_string()),
        call_manager_group: Some("CMG-East".to_string()),
        units: Vec::new(),
    }
}

fn source_endpoint() -> AnalogEndpointRecord {
    AnalogEndpointRecord {
        uuid: AxlUuid::new("{0A000000-0000-0000-0000-000000000005}"),
        domain_name: "vg-lobby.example.com".to_string(),
        unit: 0,
        subunit: 1,
        index: 5,
        name: "AALN/S0/SU1/5@vg-lobby.example.com".to_string(),
        description: Some("Fax room".to_string()),
        device_pool: Some("DP-East".to_string()),
        location: None,
        line: Some(LineRecord {
            pattern: "2125550177".to_string(),
            partition: Some("PT-Internal".to_string()),
            display: Some("Fax".to_string()),
            e164_mask: None,
        }),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn request_uses_versioned_namespace() {
    let xml = envelope::get_gateway(&version(), "vg-lobby.example.com").unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains(r#"xmlns:ns="http://www.cisco.com/AXL/API/14.0""#));
    assert!(xml.contains("<ns:getGateway><domainName>vg-lobby.example.com</domainName></ns:getGateway>"));
}

#[test]
fn sql_query_text_is_escaped() {
    let sql = "SELECT * FROM mgcpdevicemember WHERE fkmgcp='6f2a0c1e-9b3d-4e5f-a1b2-c3d4e5f60718'";
    let xml = envelope::execute_sql_query(&version(), sql).unwrap();
    let request = request(&xml, ApiOperation::ExecuteSqlQuery);
    assert_eq!(request.child_text("sql"), Some(sql));
}

#[test]
fn add_gateway_carries_layout_and_vendor_config() {
    let mapping = ModelMapping::for_source("VG320").unwrap();
    let descriptor = mapping.gateway_descriptor(
        &source_gateway(),
        "new-vg-lobby.example.com".to_string(),
        VendorConfig::swap_defaults(),
    );
    let xml = envelope::add_gateway(&version(), &descriptor).unwrap();
    assert!(xml.contains("Lobby &amp; &lt;annex&gt;"));
    let request = request(&xml, ApiOperation::AddGateway);
    let gateway = request.child("gateway").unwrap();
    assert_eq!(
        child_names(gateway),
        vec![
            "domainName",
            "description",
            "product",
            "protocol",
            "callManagerGroupName",
            "units",
            "vendorConfig"
        ]
    );
    assert_eq!(gateway.child_text("description"), Some("Lobby & <annex>"));
    assert_eq!(gateway.child_text("product"), Some("VG410"));
    let subunit = gateway.path(&["units", "unit", "subunits", "subunit"]).unwrap();
    assert_eq!(subunit.child_text("index"), Some("1"));
    assert_eq!(subunit.child_text("product"), Some("VG-48FXS"));
    assert_eq!(subunit.child_text("beginPort"), Some("0"));
    let vendor = gateway.child("vendorConfig").unwrap();
    assert_eq!(vendor.child_text("ModemPassthrough"), Some("Disable"));
    assert_eq!(vendor.child_text("T38FaxRelay"), Some("Enable"));
}

#[test]
fn add_gateway_omits_absent_fields() {
    let mapping = ModelMapping::for_source("VG204").unwrap();
    let mut source = source_gateway();
    source.description = None;
    source.call_manager_group = None;
    let descriptor = mapping.gateway_descriptor(
        &source,
        "new-vg-lobby.example.com".to_string(),
        VendorConfig::default(),
    );
    let xml = envelope::add_gateway(&version(), &descriptor).unwrap();
    let gateway = request(&xml, ApiOperation::AddGateway).child("gateway").unwrap().clone();
    assert_eq!(child_names(&gateway), vec!["domainName", "product", "protocol", "units"]);
}

#[test]
fn add_endpoint_renders_port_and_line() {
    let mapping = ModelMapping::for_source("VG320").unwrap();
    let descriptor = AnalogEndpointDescriptor::for_replacement(
        &source_endpoint(),
        mapping,
        "new-vg-lobby.example.com",
    )
    .unwrap();
    let xml = envelope::add_gateway_endpoint_analog_access(&version(), &descriptor).unwrap();
    assert!(xml.contains(r#"<sigDigits enable="false">10</sigDigits>"#));
    let request = request(&xml, ApiOperation::AddGatewayEndpointAnalogAccess);
    let access = request.child("gatewayEndpointAnalogAccess").unwrap();
    assert_eq!(access.child_text("unit"), Some("0"));
    assert_eq!(access.child_text("subunit"), Some("1"));
    let endpoint = access.child("endpoint").unwrap();
    assert_eq!(endpoint.child_text("index"), Some("29"));
    assert_eq!(endpoint.child_text("name"), Some("AALN/S0/SU1/29@new-vg-lobby.example.com"));
    assert_eq!(endpoint.child_text("devicePoolName"), Some("DP-East"));
    assert!(endpoint.child("locationName").is_none());
    assert_eq!(endpoint.child_text("trunkSelectionOrder"), Some("Top Down"));
    let port = endpoint.child("port").unwrap();
    assert_eq!(port.child_text("callerIdEnable"), Some("false"));
    assert_eq!(port.child_text("smdiPortNumber"), Some("2048"));
    assert_eq!(port.child_text("timer4"), Some("1000"));
    assert_eq!(port.child_text("timer6"), Some("0"));
    let line = port.path(&["lines", "line"]).unwrap();
    assert_eq!(line.child_text("index"), Some("1"));
    assert_eq!(line.child_text("display"), Some("Fax"));
    assert!(line.child("e164Mask").is_none());
    let dirn = line.child("dirn").unwrap();
    assert_eq!(dirn.child_text("pattern"), Some("2125550177"));
    assert_eq!(dirn.child_text("routePartitionName"), Some("PT-Internal"));
}

#[test]
fn get_endpoint_requests_by_uuid() {
    let uuid = AxlUuid::new("{0A000000-0000-0000-0000-000000000005}");
    let xml = envelope::get_gateway_endpoint_analog_access(&version(), &uuid).unwrap();
    let request = request(&xml, ApiOperation::GetGatewayEndpointAnalogAccess);
    assert_eq!(request.child_text("uuid"), Some("{0A000000-0000-0000-0000-000000000005}"));
}

#[test]
fn soap_action_names_version_and_operation() {
    assert_eq!(
        version().soap_action(ApiOperation::AddGatewayEndpointAnalogAccess),
        "\"CUCM:DB ver=14.0 addGatewayEndpointAnalogAccess\""
    );
}
