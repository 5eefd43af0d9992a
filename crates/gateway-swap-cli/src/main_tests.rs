// crates/gateway-swap-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for prompting, locale selection, and progress output.
// Purpose: Ensure operator-facing helpers behave without a live publisher.
// Dependencies: gateway-swap-core records, gateway-swap-cli main helpers
// ============================================================================

//! ## Overview
//! Drives the private helpers in `main.rs` with in-memory readers and writers:
//! the domain prompt, locale resolution, failure messages, and the progress
//! observer's rendering and step pauses.

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

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cell::RefCell;
use std::io::Cursor;
use std::io::Write;

use gateway_swap_cli::i18n::Locale;
use gateway_swap_core::AdminApi;
use gateway_swap_core::AnalogEndpointDescriptor;
use gateway_swap_core::AnalogEndpointRecord;
use gateway_swap_core::ApiError;
use gateway_swap_core::ApiOperation;
use gateway_swap_core::AxlUuid;
use gateway_swap_core::GatewayDescriptor;
use gateway_swap_core::GatewayRecord;
use gateway_swap_core::GatewaySwap;
use gateway_swap_core::LineRecord;
use gateway_swap_core::ModelMapping;
use gateway_swap_core::SqlRow;
use gateway_swap_core::SwapError;
use gateway_swap_core::SwapEvent;
use gateway_swap_core::SwapObserver;
use gateway_swap_core::SwapOptions;
use gateway_swap_core::VendorConfig;

use super::CliObserver;
use super::LangArg;
use super::ObserverMode;
use super::prompt_domain;
use super::resolve_locale;
use super::swap_failure;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn source_gateway() -> GatewayRecord {
    GatewayRecord {
        uuid: AxlUuid::new("{6F2A0C1E-9B3D-4E5F-A1B2-C3D4E5F60718}"),
        domain_name: "vg-lobby.example.com".to_string(),
        product: "VG310".to_string(),
        protocol: "MGCP".to_string(),
        description: None,
        call_manager_group: Some("CMG-East".to_string()),
        units: Vec::new(),
    }
}

fn source_endpoint() -> AnalogEndpointRecord {
    AnalogEndpointRecord {
        uuid: AxlUuid::new("{0A000000-0000-0000-0000-000000000004}"),
        domain_name: "vg-lobby.example.com".to_string(),
        unit: 0,
        subunit: 1,
        index: 4,
        name: "AALN/S0/SU1/4@vg-lobby.example.com".to_string(),
        description: None,
        device_pool: Some("DP-East".to_string()),
        location: None,
        line: Some(LineRecord {
            pattern: "2125550104".to_string(),
            partition: Some("PT-Internal".to_string()),
            display: Some("Lobby".to_string()),
            e164_mask: None,
        }),
    }
}

fn replacement(source: &AnalogEndpointRecord) -> AnalogEndpointDescriptor {
    let mapping = ModelMapping::for_source("VG310").unwrap();
    AnalogEndpointDescriptor::for_replacement(source, mapping, "new-vg-lobby.example.com").unwrap()
}

fn rendered(observer: CliObserver<Cursor<Vec<u8>>, Vec<u8>>) -> String {
    String::from_utf8(observer.output).unwrap()
}

/// In-memory publisher answering with one gateway and one port.
struct RecordingPublisher {
    gateway: GatewayRecord,
    calls: RefCell<Vec<ApiOperation>>,
}

impl RecordingPublisher {
    fn new(gateway: GatewayRecord) -> Self {
        Self {
            gateway,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl AdminApi for RecordingPublisher {
    fn get_gateway(&self, _domain_name: &str) -> Result<GatewayRecord, ApiError> {
        self.calls.borrow_mut().push(ApiOperation::GetGateway);
        Ok(self.gateway.clone())
    }

    fn execute_sql_query(&self, _sql: &str) -> Result<Vec<SqlRow>, ApiError> {
        self.calls.borrow_mut().push(ApiOperation::ExecuteSqlQuery);
        Ok(vec![SqlRow::from_pairs([(
            "fkdevice",
            Some("0a000000-0000-0000-0000-000000000004".to_string()),
        )])])
    }

    fn add_gateway(&self, _gateway: &GatewayDescriptor) -> Result<AxlUuid, ApiError> {
        self.calls.borrow_mut().push(ApiOperation::AddGateway);
        Ok(AxlUuid::new("{AAAAAAAA-0000-0000-0000-000000000000}"))
    }

    fn get_gateway_endpoint_analog_access(
        &self,
        _uuid: &AxlUuid,
    ) -> Result<AnalogEndpointRecord, ApiError> {
        self.calls.borrow_mut().push(ApiOperation::GetGatewayEndpointAnalogAccess);
        Ok(source_endpoint())
    }

    fn add_gateway_endpoint_analog_access(
        &self,
        _endpoint: &AnalogEndpointDescriptor,
    ) -> Result<AxlUuid, ApiError> {
        self.calls.borrow_mut().push(ApiOperation::AddGatewayEndpointAnalogAccess);
        Ok(AxlUuid::new("{AAAAAAAA-0000-0000-0000-000000000001}"))
    }
}

/// Writer that fails every write.
struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// ============================================================================
// SECTION: Prompt
// ============================================================================

#[test]
fn prompt_returns_trimmed_domain() {
    let mut input = Cursor::new(b"  vg-lobby.example.com \n".to_vec());
    let mut output = Vec::new();
    let domain = prompt_domain(&mut input, &mut output, "stdout").unwrap();
    assert_eq!(domain, "vg-lobby.example.com");
    let shown = String::from_utf8(output).unwrap();
    assert!(shown.contains("VG with domain / FQDN: "), "{shown}");
}

#[test]
fn prompt_rejects_blank_and_closed_input() {
    for raw in [&b"   \n"[..], &b""[..]] {
        let mut input = Cursor::new(raw.to_vec());
        let err = prompt_domain(&mut input, &mut Vec::<u8>::new(), "stdout").unwrap_err();
        assert_eq!(err.to_string(), "No gateway domain name was entered.");
    }
}

// ============================================================================
// SECTION: Locale
// ============================================================================

#[test]
fn locale_flag_wins_over_environment() {
    assert_eq!(resolve_locale(Some(LangArg::Ca), Some("en_US.UTF-8")).unwrap(), Locale::Ca);
    assert_eq!(resolve_locale(None, Some("ca_ES")).unwrap(), Locale::Ca);
    assert_eq!(resolve_locale(None, None).unwrap(), Locale::En);
}

#[test]
fn unknown_environment_locale_is_rejected() {
    let err = resolve_locale(None, Some("fr_FR")).unwrap_err();
    assert!(err.to_string().contains("GATEWAY_SWAP_LANG"), "{err}");
}

// ============================================================================
// SECTION: Failure Messages
// ============================================================================

#[test]
fn lookup_failure_points_at_the_gateway_name() {
    let err = SwapError::Api {
        operation: ApiOperation::GetGateway,
        source: ApiError::Fault {
            code: Some("5007".to_string()),
            message: "Item not valid: The specified Gateway was not found".to_string(),
        },
    };
    let message = swap_failure(&err).to_string();
    assert!(message.starts_with("Check your gateway name in CUCM."), "{message}");
    assert!(message.ends_with("getGateway: Item not valid: The specified Gateway was not found"));
}

#[test]
fn lookup_transport_failure_is_not_blamed_on_the_gateway_name() {
    let err = SwapError::Api {
        operation: ApiOperation::GetGateway,
        source: ApiError::Transport("connection refused".to_string()),
    };
    let message = swap_failure(&err).to_string();
    assert_eq!(
        message,
        "Gateway swap failed: getGateway failed: transport error: connection refused"
    );
}

#[test]
fn other_failures_keep_the_pipeline_message() {
    let message = swap_failure(&SwapError::EmptyDomain).to_string();
    assert_eq!(message, "Gateway swap failed: gateway domain name is empty");
}

// ============================================================================
// SECTION: Progress Observer
// ============================================================================

#[test]
fn progress_lines_cover_gateway_and_ports() {
    let gateway = source_gateway();
    let source = source_endpoint();
    let target = replacement(&source);
    let created = AxlUuid::new("{AAAAAAAA-0000-0000-0000-000000000001}");
    let mut observer =
        CliObserver::new(Cursor::new(Vec::new()), Vec::new(), "stdout", ObserverMode::default());
    observer
        .on_event(&SwapEvent::GatewayResolved {
            gateway: &gateway,
        })
        .unwrap();
    observer
        .on_event(&SwapEvent::PortsEnumerated {
            gateway: &gateway,
            count: 1,
        })
        .unwrap();
    observer
        .on_event(&SwapEvent::EndpointPlanned {
            source: &source,
            target: &target,
        })
        .unwrap();
    observer
        .on_event(&SwapEvent::EndpointCreated {
            target: &target,
            uuid: &created,
        })
        .unwrap();
    let text = rendered(observer);
    assert!(text.contains("Found gateway vg-lobby.example.com (VG310)"), "{text}");
    assert!(text.contains("Found 1 port(s) on vg-lobby.example.com"), "{text}");
    assert!(
        text.contains("Added AALN/S0/SU1/28@new-vg-lobby.example.com for DN 2125550104"),
        "{text}"
    );
    assert!(!text.contains("slotnum"), "{text}");
    assert!(!text.contains("Press Enter"), "{text}");
}

#[test]
fn details_mode_prints_port_fields() {
    let source = source_endpoint();
    let target = replacement(&source);
    let mode = ObserverMode {
        details: true,
        ..ObserverMode::default()
    };
    let mut observer = CliObserver::new(Cursor::new(Vec::new()), Vec::new(), "stdout", mode);
    observer
        .on_event(&SwapEvent::EndpointPlanned {
            source: &source,
            target: &target,
        })
        .unwrap();
    let text = rendered(observer);
    assert!(text.contains("slotnum: 1"), "{text}");
    assert!(text.contains("portnum: 4"), "{text}");
    assert!(text.contains("callerID: Lobby"), "{text}");
    assert!(text.contains("mask: (none)"), "{text}");
    assert!(text.contains("partition: PT-Internal"), "{text}");
}

#[test]
fn dry_run_announces_planned_ports() {
    let gateway = source_gateway();
    let source = source_endpoint();
    let target = replacement(&source);
    let mode = ObserverMode {
        dry_run: true,
        ..ObserverMode::default()
    };
    let mut observer = CliObserver::new(Cursor::new(Vec::new()), Vec::new(), "stdout", mode);
    observer
        .on_event(&SwapEvent::PortsEnumerated {
            gateway: &gateway,
            count: 0,
        })
        .unwrap();
    observer
        .on_event(&SwapEvent::EndpointPlanned {
            source: &source,
            target: &target,
        })
        .unwrap();
    let text = rendered(observer);
    assert!(text.contains("No ports found on vg-lobby.example.com"), "{text}");
    assert!(text.contains("Would add AALN/S0/SU1/28@new-vg-lobby.example.com"), "{text}");
}

#[test]
fn step_mode_waits_for_enter_before_each_creation() {
    let source = source_endpoint();
    let target = replacement(&source);
    let mode = ObserverMode {
        step: true,
        ..ObserverMode::default()
    };
    let mut observer = CliObserver::new(Cursor::new(b"\n".to_vec()), Vec::new(), "stdout", mode);
    observer
        .on_event(&SwapEvent::EndpointPlanned {
            source: &source,
            target: &target,
        })
        .unwrap();
    let consumed = observer.input.position();
    let text = rendered(observer);
    assert_eq!(consumed, 1);
    assert!(text.contains("Press Enter to continue..."), "{text}");
}

#[test]
fn step_mode_stops_when_input_closes_before_gateway_creation() {
    let source = source_gateway();
    let mapping = ModelMapping::for_source("VG310").unwrap();
    let planned = mapping.gateway_descriptor(
        &source,
        "new-vg-lobby.example.com".to_string(),
        VendorConfig::swap_defaults(),
    );
    let mode = ObserverMode {
        step: true,
        ..ObserverMode::default()
    };
    let mut observer = CliObserver::new(Cursor::new(Vec::<u8>::new()), Vec::new(), "stdout", mode);
    let err = observer
        .on_event(&SwapEvent::GatewayPlanned {
            gateway: &planned,
        })
        .unwrap_err();
    assert_eq!(err.reason, "Input closed before Enter was pressed; nothing more was created.");
    let text = rendered(observer);
    assert!(text.contains("Press Enter to continue..."), "{text}");
}

#[test]
fn step_mode_stops_the_swap_before_add_gateway() {
    let api = RecordingPublisher::new(source_gateway());
    let mode = ObserverMode {
        step: true,
        ..ObserverMode::default()
    };
    let mut observer = CliObserver::new(Cursor::new(Vec::<u8>::new()), Vec::new(), "stdout", mode);
    let err = GatewaySwap::new(&api, SwapOptions::default())
        .run("vg-lobby.example.com", &mut observer)
        .unwrap_err();
    assert!(matches!(err, SwapError::Interrupted(_)), "{err:?}");
    assert_eq!(
        swap_failure(&err).to_string(),
        "Input closed before Enter was pressed; nothing more was created."
    );
    assert_eq!(
        *api.calls.borrow(),
        vec![ApiOperation::GetGateway, ApiOperation::ExecuteSqlQuery]
    );
}

#[test]
fn write_failure_stops_the_swap() {
    let gateway = source_gateway();
    let mut observer =
        CliObserver::new(Cursor::new(Vec::<u8>::new()), BrokenPipe, "stdout", ObserverMode::default());
    let err = observer
        .on_event(&SwapEvent::GatewayResolved {
            gateway: &gateway,
        })
        .unwrap_err();
    assert!(err.reason.starts_with("Failed to write to stdout"), "{err}");
}
