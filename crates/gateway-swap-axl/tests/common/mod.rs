// crates/gateway-swap-axl/tests/common/mod.rs
// ============================================================================
// Module: AXL Test Fixtures
// Description: Canned SOAP replies and a scripted tiny_http publisher.
// Purpose: Exercise encoding, decoding, and transport without a real server.
// Dependencies: gateway-swap-axl, tiny_http
// ============================================================================

//! ## Overview
//! Reply builders mirror the shape of real AXL responses, including
//! namespace prefixes and `uuid` attributes. [`ScriptedServer`] answers a fixed
//! sequence of requests and hands back what it received.

#![allow(
    dead_code,
    reason = "Shared fixtures are used by a subset of test binaries."
)]

use std::thread;
use std::thread::JoinHandle;

use gateway_swap_axl::AxlClient;
use gateway_swap_axl::AxlClientConfig;
use gateway_swap_axl::AxlVersion;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;

/// Wraps `body` in a SOAP envelope.
pub fn envelope(body: &str) -> String {
    format!(
        r#"<?xml version='1.0' encoding='UTF-8'?><soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/"><soapenv:Body>{body}</soapenv:Body></soapenv:Envelope>"#
    )
}

/// A successful reply for `operation` with `inner` under `<return>`.
pub fn reply(operation: &str, inner: &str) -> String {
    envelope(&format!(
        r#"<ns:{operation}Response xmlns:ns="http://www.cisco.com/AXL/API/14.0"><return>{inner}</return></ns:{operation}Response>"#
    ))
}

/// A SOAP fault with an AXL error detail.
pub fn fault(message: &str, code: &str) -> String {
    envelope(&format!(
        "<soapenv:Fault><faultcode>soapenv:Client</faultcode><faultstring>{message}</faultstring><detail><axlError><axlcode>{code}</axlcode><axlmessage>{message}</axlmessage><request>getGateway</request></axlError></detail></soapenv:Fault>"
    ))
}

/// A `getGateway` reply for a VG310 with one unit.
pub fn gateway_reply() -> String {
    reply(
        "getGateway",
        r#"<gateway uuid="{6F2A0C1E-9B3D-4E5F-A1B2-C3D4E5F60718}">
             <domainName>vg-lobby.example.com</domainName>
             <description>Lobby &amp; annex</description>
             <product>VG310</product>
             <protocol>MGCP</protocol>
             <callManagerGroupName uuid="{AD243D17-98B4-4118-8FEB-5FF2E1B781AC}">CMG-East</callManagerGroupName>
             <units>
               <unit>
                 <index>0</index>
                 <product>VG-2VWIC-MBRD</product>
                 <subunits>
                   <subunit><index>0</index><product>24FXS</product><beginPort>0</beginPort></subunit>
                 </subunits>
               </unit>
             </units>
             <vendorConfig/>
           </gateway>"#,
    )
}

/// An `executeSQLQuery` reply with one row per device identifier.
pub fn member_rows_reply(devices: &[&str]) -> String {
    let rows: String = devices
        .iter()
        .map(|device| {
            format!(
                "<row><pkid>0d1e2f30-0000-0000-0000-000000000001</pkid><fkmgcp>6f2a0c1e-9b3d-4e5f-a1b2-c3d4e5f60718</fkmgcp><fkdevice>{device}</fkdevice><slot/></row>"
            )
        })
        .collect();
    reply("executeSQLQuery", &rows)
}

/// A `getGatewayEndpointAnalogAccess` reply.
pub fn endpoint_reply(device: &str, subunit: u32, index: u32, dn: &str) -> String {
    reply(
        "getGatewayEndpointAnalogAccess",
        &format!(
            r#"<gatewayEndpointAnalogAccess uuid="{device}">
                 <domainName>vg-lobby.example.com</domainName>
                 <unit>0</unit>
                 <subunit>{subunit}</subunit>
                 <endpoint uuid="{device}">
                   <index>{index}</index>
                   <name>AALN/S0/SU{subunit}/{index}@vg-lobby.example.com</name>
                   <description>Lobby phone {dn}</description>
                   <product>Cisco MGCP FXS Port</product>
                   <devicePoolName uuid="{{1B1B9EB6-7803-11D3-BDF0-00108302EAD1}}">DP-East</devicePoolName>
                   <locationName uuid="{{29C5C1C4-8871-4D1E-8394-0B9181E8C54D}}">Hub_None</locationName>
                   <port>
                     <portNumber>1</portNumber>
                     <lines>
                       <line>
                         <index>1</index>
                         <display>Lobby</display>
                         <dirn uuid="{{C3A1E2F4-0000-0000-0000-000000000001}}">
                           <pattern>{dn}</pattern>
                           <routePartitionName uuid="{{C3A1E2F4-0000-0000-0000-000000000002}}">PT-Internal</routePartitionName>
                         </dirn>
                         <e164Mask>212555XXXX</e164Mask>
                       </line>
                     </lines>
                   </port>
                 </endpoint>
               </gatewayEndpointAnalogAccess>"#
        ),
    )
}

/// An `add*` reply returning `uuid`.
pub fn created_reply(operation: &str, uuid: &str) -> String {
    reply(operation, uuid)
}

/// One request as received by [`ScriptedServer`].
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    /// HTTP method.
    pub method: String,
    /// Request path.
    pub path: String,
    /// `SOAPAction` header value.
    pub soap_action: Option<String>,
    /// `Content-Type` header value.
    pub content_type: Option<String>,
    /// `Authorization` header value.
    pub authorization: Option<String>,
    /// Request body.
    pub body: String,
}

/// Local server answering a fixed sequence of `(status, body)` replies.
pub struct ScriptedServer {
    /// Base URL of the server's `/axl/` path.
    pub url: String,
    /// Handle yielding the received requests once the script is exhausted.
    handle: JoinHandle<Vec<ReceivedRequest>>,
}

impl ScriptedServer {
    /// Starts a server that answers `replies` in order and then stops.
    pub fn start(replies: Vec<(u16, String)>) -> Self {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let handle = thread::spawn(move || {
            let mut received = Vec::new();
            for (status, body) in replies {
                let Ok(mut request) = server.recv() else {
                    break;
                };
                let header = |name: &'static str| {
                    request
                        .headers()
                        .iter()
                        .find(|header| header.field.equiv(name))
                        .map(|header| header.value.as_str().to_string())
                };
                let soap_action = header("SOAPAction");
                let content_type = header("Content-Type");
                let authorization = header("Authorization");
                let mut request_body = String::new();
                request.as_reader().read_to_string(&mut request_body).unwrap();
                received.push(ReceivedRequest {
                    method: request.method().to_string(),
                    path: request.url().to_string(),
                    soap_action,
                    content_type,
                    authorization,
                    body: request_body,
                });
                let content_type =
                    Header::from_bytes(&b"Content-Type"[..], &b"text/xml; charset=utf-8"[..])
                        .unwrap();
                let response =
                    Response::from_string(body).with_status_code(status).with_header(content_type);
                let _ = request.respond(response);
            }
            received
        });
        Self {
            url: format!("http://{addr}/axl/"),
            handle,
        }
    }

    /// Waits for the script to finish and returns the received requests.
    pub fn finish(self) -> Vec<ReceivedRequest> {
        self.handle.join().unwrap()
    }
}

/// A client for `url` with test credentials and version 14.0.
pub fn client(url: &str) -> AxlClient {
    let config =
        AxlClientConfig::new(url, "admin", "secret", AxlVersion::parse("14.0").unwrap());
    AxlClient::new(config).unwrap()
}
