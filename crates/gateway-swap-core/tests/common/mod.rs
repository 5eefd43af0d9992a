// crates/gateway-swap-core/tests/common/mod.rs
// ============================================================================
// Module: Core Test Fixtures
// Description: Recording in-memory AdminApi and sample records.
// Purpose: Drive the swap pipeline without a network.
// Dependencies: gateway-swap-core
// ============================================================================

//! ## Overview
//! [`RecordingApi`] answers each operation from canned data and records every
//! call in order so tests can assert which remote calls were (not) made.

#![allow(
    dead_code,
    reason = "Shared fixtures are used by a subset of test binaries."
)]

use std::cell::RefCell;
use std::collections::BTreeMap;

use gateway_swap_core::AdminApi;
use gateway_swap_core::AnalogEndpointDescriptor;
use gateway_swap_core::AnalogEndpointRecord;
use gateway_swap_core::ApiError;
use gateway_swap_core::ApiOperation;
use gateway_swap_core::AxlUuid;
use gateway_swap_core::GatewayDescriptor;
use gateway_swap_core::GatewayRecord;
use gateway_swap_core::GatewaySubunit;
use gateway_swap_core::GatewayUnit;
use gateway_swap_core::LineRecord;
use gateway_swap_core::SqlRow;

/// Source gateway identifier as AXL reports it.
pub const GATEWAY_UUID: &str = "{6F2A0C1E-9B3D-4E5F-A1B2-C3D4E5F60718}";
/// Same identifier in store form.
pub const GATEWAY_RAW_UUID: &str = "6f2a0c1e-9b3d-4e5f-a1b2-c3d4e5f60718";

/// In-memory API that records calls.
#[derive(Default)]
pub struct RecordingApi {
    /// Gateway returned by `get_gateway`; `None` answers with a fault.
    pub gateway: Option<GatewayRecord>,
    /// Rows returned by `execute_sql_query`.
    pub rows: Vec<SqlRow>,
    /// Endpoints keyed by identifier.
    pub endpoints: BTreeMap<String, AnalogEndpointRecord>,
    /// Fail `add_gateway_endpoint_analog_access` on this call number (1-based).
    pub fail_endpoint_add_at: Option<usize>,
    /// Operations in call order.
    pub calls: RefCell<Vec<ApiOperation>>,
    /// SQL statements received.
    pub queries: RefCell<Vec<String>>,
    /// Gateways submitted.
    pub added_gateways: RefCell<Vec<GatewayDescriptor>>,
    /// Endpoints submitted.
    pub added_endpoints: RefCell<Vec<AnalogEndpointDescriptor>>,
}

impl RecordingApi {
    /// Number of calls to `operation`.
    pub fn count(&self, operation: ApiOperation) -> usize {
        self.calls.borrow().iter().filter(|call| **call == operation).count()
    }
}

impl AdminApi for RecordingApi {
    fn get_gateway(&self, domain_name: &str) -> Result<GatewayRecord, ApiError> {
        self.calls.borrow_mut().push(ApiOperation::GetGateway);
        self.gateway.clone().ok_or_else(|| ApiError::Fault {
            code: Some("5007".to_string()),
            message: format!("Item not valid: The specified Gateway {domain_name} was not found"),
        })
    }

    fn execute_sql_query(&self, sql: &str) -> Result<Vec<SqlRow>, ApiError> {
        self.calls.borrow_mut().push(ApiOperation::ExecuteSqlQuery);
        self.queries.borrow_mut().push(sql.to_string());
        Ok(self.rows.clone())
    }

    fn add_gateway(&self, gateway: &GatewayDescriptor) -> Result<AxlUuid, ApiError> {
        self.calls.borrow_mut().push(ApiOperation::AddGateway);
        self.added_gateways.borrow_mut().push(gateway.clone());
        Ok(AxlUuid::new("{11111111-2222-3333-4444-555555555555}"))
    }

    fn get_gateway_endpoint_analog_access(
        &self,
        uuid: &AxlUuid,
    ) -> Result<AnalogEndpointRecord, ApiError> {
        self.calls.borrow_mut().push(ApiOperation::GetGatewayEndpointAnalogAccess);
        self.endpoints.get(uuid.as_str()).cloned().ok_or_else(|| ApiError::Fault {
            code: None,
            message: format!("endpoint {uuid} not found"),
        })
    }

    fn add_gateway_endpoint_analog_access(
        &self,
        endpoint: &AnalogEndpointDescriptor,
    ) -> Result<AxlUuid, ApiError> {
        self.calls.borrow_mut().push(ApiOperation::AddGatewayEndpointAnalogAccess);
        let mut added = self.added_endpoints.borrow_mut();
        added.push(endpoint.clone());
        if self.fail_endpoint_add_at == Some(added.len()) {
            return Err(ApiError::Fault {
                code: None,
                message: "Could not insert new row - duplicate value in a UNIQUE INDEX column"
                    .to_string(),
            });
        }
        Ok(AxlUuid::new(format!("{{AAAAAAAA-0000-0000-0000-{:012}}}", added.len())))
    }
}

/// A source gateway of the given model.
pub fn gateway(product: &str) -> GatewayRecord {
    GatewayRecord {
        uuid: AxlUuid::new(GATEWAY_UUID),
        domain_name: "vg-lobby.example.com".to_string(),
        product: product.to_string(),
        protocol: "MGCP".to_string(),
        description: Some("Lobby analog gateway".to_string()),
        call_manager_group: Some("CMG-East".to_string()),
        units: vec![GatewayUnit {
            index: 0,
            product: "VG-2VWIC-MBRD".to_string(),
            subunits: vec![GatewaySubunit {
                index: 0,
                product: "24FXS".to_string(),
                begin_port: 0,
            }],
        }],
    }
}

/// A membership row pointing at `device`.
pub fn member_row(device: &str) -> SqlRow {
    SqlRow::from_pairs([
        ("pkid", Some("0d1e2f30-0000-0000-0000-000000000001".to_string())),
        ("fkmgcp", Some(GATEWAY_RAW_UUID.to_string())),
        ("fkdevice", Some(device.to_string())),
        ("slot", Some("0".to_string())),
    ])
}

/// A source endpoint on `subunit` at `index` with DN `dn`.
pub fn endpoint(device: &str, subunit: u32, index: u32, dn: &str) -> AnalogEndpointRecord {
    AnalogEndpointRecord {
        uuid: AxlUuid::new(device),
        domain_name: "vg-lobby.example.com".to_string(),
        unit: 0,
        subunit,
        index,
        name: format!("AALN/S0/SU{subunit}/{index}@vg-lobby.example.com"),
        description: Some(format!("Lobby phone {dn}")),
        device_pool: Some("DP-East".to_string()),
        location: Some("Hub_None".to_string()),
        line: Some(LineRecord {
            pattern: dn.to_string(),
            partition: Some("PT-Internal".to_string()),
            display: Some("Lobby".to_string()),
            e164_mask: Some("212555XXXX".to_string()),
        }),
    }
}

/// An API with one gateway of `product` and the given endpoints attached.
pub fn api_with_ports(product: &str, endpoints: Vec<AnalogEndpointRecord>) -> RecordingApi {
    RecordingApi {
        gateway: Some(gateway(product)),
        rows: endpoints.iter().map(|endpoint| member_row(endpoint.uuid.as_str())).collect(),
        endpoints: endpoints
            .into_iter()
            .map(|endpoint| (endpoint.uuid.as_str().to_string(), endpoint))
            .collect(),
        ..RecordingApi::default()
    }
}
