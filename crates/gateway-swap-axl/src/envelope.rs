// crates/gateway-swap-axl/src/envelope.rs
// ============================================================================
// Module: AXL Request Envelopes
// Description: SOAP 1.1 request encoders for the gateway swap operations.
// Purpose: Render typed descriptors into AXL request bodies.
// Dependencies: gateway-swap-core, quick-xml, crate::schema
// ============================================================================

//! ## Overview
//! Each encoder writes a complete SOAP envelope whose body holds one
//! namespace-qualified AXL request element with unqualified children, in the
//! element order the AXL schema expects. Optional fields are omitted rather
//! than sent empty. Text is escaped by the writer.

// ============================================================================
// SECTION: Imports
// ============================================================================

use gateway_swap_core::AnalogEndpointDescriptor;
use gateway_swap_core::ApiOperation;
use gateway_swap_core::AxlUuid;
use gateway_swap_core::GatewayDescriptor;
use gateway_swap_core::LineDescriptor;
use gateway_swap_core::endpoint::AnalogPortSettings;
use quick_xml::Writer;
use quick_xml::events::BytesDecl;
use quick_xml::events::BytesEnd;
use quick_xml::events::BytesStart;
use quick_xml::events::BytesText;
use quick_xml::events::Event;

use crate::schema::AxlVersion;
use crate::xml::XmlError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// SOAP 1.1 envelope namespace.
pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

// ============================================================================
// SECTION: Encoders
// ============================================================================

/// Encodes `getGateway` by domain name.
///
/// # Errors
///
/// Returns [`XmlError::Write`] when the envelope cannot be written.
pub fn get_gateway(version: &AxlVersion, domain_name: &str) -> Result<String, XmlError> {
    let mut request = RequestWriter::open(version, ApiOperation::GetGateway)?;
    request.text("domainName", domain_name)?;
    request.finish()
}

/// Encodes `executeSQLQuery`.
///
/// # Errors
///
/// Returns [`XmlError::Write`] when the envelope cannot be written.
pub fn execute_sql_query(version: &AxlVersion, sql: &str) -> Result<String, XmlError> {
    let mut request = RequestWriter::open(version, ApiOperation::ExecuteSqlQuery)?;
    request.text("sql", sql)?;
    request.finish()
}

/// Encodes `addGateway`.
///
/// # Errors
///
/// Returns [`XmlError::Write`] when the envelope cannot be written.
pub fn add_gateway(version: &AxlVersion, gateway: &GatewayDescriptor) -> Result<String, XmlError> {
    let mut request = RequestWriter::open(version, ApiOperation::AddGateway)?;
    request.start("gateway")?;
    request.text("domainName", &gateway.domain_name)?;
    request.optional("description", gateway.description.as_deref())?;
    request.text("product", &gateway.product)?;
    request.text("protocol", &gateway.protocol)?;
    request.optional("callManagerGroupName", gateway.call_manager_group.as_deref())?;
    request.start("units")?;
    for unit in &gateway.units {
        request.start("unit")?;
        request.number("index", unit.index)?;
        request.text("product", &unit.product)?;
        request.start("subunits")?;
        for subunit in &unit.subunits {
            request.start("subunit")?;
            request.number("index", subunit.index)?;
            request.text("product", &subunit.product)?;
            request.number("beginPort", subunit.begin_port)?;
            request.end("subunit")?;
        }
        request.end("subunits")?;
        request.end("unit")?;
    }
    request.end("units")?;
    if !gateway.vendor_config.is_empty() {
        request.start("vendorConfig")?;
        for entry in &gateway.vendor_config.entries {
            request.text(&entry.name, &entry.value)?;
        }
        request.end("vendorConfig")?;
    }
    request.end("gateway")?;
    request.finish()
}

/// Encodes `getGatewayEndpointAnalogAccess` by identifier.
///
/// # Errors
///
/// Returns [`XmlError::Write`] when the envelope cannot be written.
pub fn get_gateway_endpoint_analog_access(
    version: &AxlVersion,
    uuid: &AxlUuid,
) -> Result<String, XmlError> {
    let mut request = RequestWriter::open(version, ApiOperation::GetGatewayEndpointAnalogAccess)?;
    request.text("uuid", uuid.as_str())?;
    request.finish()
}

/// Encodes `addGatewayEndpointAnalogAccess`.
///
/// # Errors
///
/// Returns [`XmlError::Write`] when the envelope cannot be written.
pub fn add_gateway_endpoint_analog_access(
    version: &AxlVersion,
    endpoint: &AnalogEndpointDescriptor,
) -> Result<String, XmlError> {
    let mut request = RequestWriter::open(version, ApiOperation::AddGatewayEndpointAnalogAccess)?;
    request.start("gatewayEndpointAnalogAccess")?;
    request.text("domainName", &endpoint.domain_name)?;
    request.number("unit", endpoint.unit)?;
    request.number("subunit", endpoint.subunit)?;
    request.start("endpoint")?;
    request.number("index", endpoint.index)?;
    request.text("name", &endpoint.name)?;
    request.optional("description", endpoint.description.as_deref())?;
    request.text("product", endpoint.product)?;
    request.text("class", endpoint.class)?;
    request.text("protocol", endpoint.protocol)?;
    request.text("protocolSide", endpoint.protocol_side)?;
    request.optional("devicePoolName", endpoint.device_pool.as_deref())?;
    request.optional("locationName", endpoint.location.as_deref())?;
    write_port(&mut request, &endpoint.port, &endpoint.line)?;
    request.text("trunkSelectionOrder", endpoint.trunk_selection_order)?;
    request.end("endpoint")?;
    request.end("gatewayEndpointAnalogAccess")?;
    request.finish()
}

/// Writes the `<port>` block with its single line.
fn write_port(
    request: &mut RequestWriter,
    port: &AnalogPortSettings,
    line: &LineDescriptor,
) -> Result<(), XmlError> {
    request.start("port")?;
    request.number("portNumber", port.port_number)?;
    request.boolean("callerIdEnable", port.caller_id_enable)?;
    request.text("callingPartySelection", port.calling_party_selection)?;
    request.number("expectedDigits", port.expected_digits)?;
    let mut sig_digits = BytesStart::new("sigDigits");
    sig_digits.push_attribute(("enable", bool_text(port.sig_digits_enable)));
    request.write(Event::Start(sig_digits))?;
    request.write(Event::Text(BytesText::new(&port.sig_digits.to_string())))?;
    request.end("sigDigits")?;
    request.start("lines")?;
    request.start("line")?;
    request.number("index", line.index)?;
    request.optional("display", line.display.as_deref())?;
    request.start("dirn")?;
    request.text("pattern", &line.pattern)?;
    request.optional("routePartitionName", line.partition.as_deref())?;
    request.end("dirn")?;
    request.optional("e164Mask", line.e164_mask.as_deref())?;
    request.end("line")?;
    request.end("lines")?;
    request.text("presentationBit", port.presentation_bit)?;
    request.text("silenceSuppressionThreshold", port.silence_suppression_threshold)?;
    request.number("smdiPortNumber", port.smdi_port_number)?;
    request.text("trunk", port.trunk)?;
    request.text("trunkDirection", port.trunk_direction)?;
    request.text("trunkLevel", port.trunk_level)?;
    request.text("trunkPadRx", port.trunk_pad_rx)?;
    request.text("trunkPadTx", port.trunk_pad_tx)?;
    for (position, timer) in port.timers.iter().enumerate() {
        request.number(&format!("timer{}", position + 1), *timer)?;
    }
    request.end("port")
}

/// AXL boolean literal.
const fn bool_text(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

// ============================================================================
// SECTION: Writer
// ============================================================================

/// Envelope writer positioned inside one request element.
struct RequestWriter {
    /// Underlying event writer.
    writer: Writer<Vec<u8>>,
    /// Qualified request element name, for example `ns:getGateway`.
    request: String,
}

impl RequestWriter {
    /// Writes the prolog, envelope, header, body, and request start tag.
    fn open(version: &AxlVersion, operation: ApiOperation) -> Result<Self, XmlError> {
        let mut request = Self {
            writer: Writer::new(Vec::new()),
            request: format!("ns:{}", operation.as_str()),
        };
        request.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        let namespace = version.namespace();
        let mut envelope = BytesStart::new("soapenv:Envelope");
        envelope.push_attribute(("xmlns:soapenv", SOAP_ENVELOPE_NS));
        envelope.push_attribute(("xmlns:ns", namespace.as_str()));
        request.write(Event::Start(envelope))?;
        request.write(Event::Empty(BytesStart::new("soapenv:Header")))?;
        request.start("soapenv:Body")?;
        let name = request.request.clone();
        request.start(&name)?;
        Ok(request)
    }

    /// Writes one event.
    fn write(&mut self, event: Event<'_>) -> Result<(), XmlError> {
        self.writer.write_event(event).map_err(|err| XmlError::Write(err.to_string()))
    }

    /// Opens `name`.
    fn start(&mut self, name: &str) -> Result<(), XmlError> {
        self.write(Event::Start(BytesStart::new(name)))
    }

    /// Closes `name`.
    fn end(&mut self, name: &str) -> Result<(), XmlError> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    /// Writes `<name>value</name>`.
    fn text(&mut self, name: &str, value: &str) -> Result<(), XmlError> {
        self.start(name)?;
        self.write(Event::Text(BytesText::new(value)))?;
        self.end(name)
    }

    /// Writes `<name>value</name>` when `value` is present.
    fn optional(&mut self, name: &str, value: Option<&str>) -> Result<(), XmlError> {
        value.map_or(Ok(()), |value| self.text(name, value))
    }

    /// Writes a numeric element.
    fn number(&mut self, name: &str, value: u32) -> Result<(), XmlError> {
        self.text(name, &value.to_string())
    }

    /// Writes a boolean element.
    fn boolean(&mut self, name: &str, value: bool) -> Result<(), XmlError> {
        self.text(name, bool_text(value))
    }

    /// Closes the request, body, and envelope and returns the document.
    fn finish(mut self) -> Result<String, XmlError> {
        let name = self.request.clone();
        self.end(&name)?;
        self.end("soapenv:Body")?;
        self.end("soapenv:Envelope")?;
        String::from_utf8(self.writer.into_inner()).map_err(|err| XmlError::Write(err.to_string()))
    }
}
