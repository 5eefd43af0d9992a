// crates/gateway-swap-axl/src/response.rs
// ============================================================================
// Module: AXL Response Decoding
// Description: Fault detection and typed decoders for AXL replies.
// Purpose: Turn SOAP reply bodies into core records at the client boundary.
// Dependencies: gateway-swap-core, crate::xml
// ============================================================================

//! ## Overview
//! [`response_element`] unwraps the SOAP envelope and either yields the
//! `<operation>Response` element or the decoded fault. The remaining
//! functions decode the `<return>` payload of one operation each. Required
//! fields that are missing or non-numeric are protocol errors; optional
//! fields that are absent or empty decode as `None`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use gateway_swap_core::AnalogEndpointRecord;
use gateway_swap_core::ApiOperation;
use gateway_swap_core::AxlUuid;
use gateway_swap_core::GatewayRecord;
use gateway_swap_core::GatewaySubunit;
use gateway_swap_core::GatewayUnit;
use gateway_swap_core::LineRecord;
use gateway_swap_core::SqlRow;

use crate::error::AxlError;
use crate::xml::XmlElement;

// ============================================================================
// SECTION: Envelope
// ============================================================================

/// Parses a reply body and returns the `<operation>Response` element.
///
/// # Errors
///
/// Returns [`AxlError::Fault`] for SOAP faults, [`AxlError::Xml`] for
/// malformed bodies, and [`AxlError::Protocol`] when the body lacks the
/// expected response element.
pub fn response_element(body: &str, operation: ApiOperation) -> Result<XmlElement, AxlError> {
    let envelope = XmlElement::parse(body)?;
    if let Some(fault) = fault(&envelope) {
        return Err(fault);
    }
    let expected = format!("{}Response", operation.as_str());
    let mut soap_body = envelope
        .children
        .into_iter()
        .find(|child| child.name == "Body")
        .ok_or_else(|| AxlError::Protocol("reply has no soap body".to_string()))?;
    let position = soap_body
        .children
        .iter()
        .position(|child| child.name == expected)
        .ok_or_else(|| AxlError::Protocol(format!("reply has no {expected} element")))?;
    Ok(soap_body.children.swap_remove(position))
}

/// Returns the decoded fault when `envelope` carries one.
#[must_use]
pub fn fault(envelope: &XmlElement) -> Option<AxlError> {
    let fault = envelope.child("Body")?.child("Fault")?;
    let axl_error = fault.path(&["detail", "axlError"]);
    let code = axl_error.and_then(|detail| trimmed_text(detail, "axlcode")).map(str::to_string);
    let message = trimmed_text(fault, "faultstring")
        .or_else(|| axl_error.and_then(|detail| trimmed_text(detail, "axlmessage")))
        .unwrap_or("unspecified soap fault")
        .to_string();
    Some(AxlError::Fault {
        code,
        message,
    })
}

/// Returns the `<return>` element of a response.
fn returned(response: &XmlElement) -> Result<&XmlElement, AxlError> {
    response
        .child("return")
        .ok_or_else(|| AxlError::Protocol(format!("{} has no return element", response.name)))
}

// ============================================================================
// SECTION: Operation Decoders
// ============================================================================

/// Decodes a `getGatewayResponse`.
///
/// # Errors
///
/// Returns [`AxlError::Protocol`] when required gateway fields are missing.
pub fn gateway(response: &XmlElement) -> Result<GatewayRecord, AxlError> {
    let gateway = returned(response)?
        .child("gateway")
        .ok_or_else(|| AxlError::Protocol("getGateway returned no gateway".to_string()))?;
    let uuid = gateway
        .attribute("uuid")
        .map(str::trim)
        .ok_or_else(|| AxlError::Protocol("gateway has no uuid".to_string()))?;
    let mut units = Vec::new();
    if let Some(list) = gateway.child("units") {
        for unit in list.children_named("unit") {
            let mut subunits = Vec::new();
            if let Some(list) = unit.child("subunits") {
                for subunit in list.children_named("subunit") {
                    subunits.push(GatewaySubunit {
                        index: required_number(subunit, "index")?,
                        product: text_or_empty(subunit, "product"),
                        begin_port: optional_number(subunit, "beginPort")?.unwrap_or(0),
                    });
                }
            }
            units.push(GatewayUnit {
                index: required_number(unit, "index")?,
                product: text_or_empty(unit, "product"),
                subunits,
            });
        }
    }
    Ok(GatewayRecord {
        uuid: AxlUuid::new(uuid),
        domain_name: text_or_empty(gateway, "domainName"),
        product: required_text(gateway, "product")?.to_string(),
        protocol: text_or_empty(gateway, "protocol"),
        description: optional_text(gateway, "description"),
        call_manager_group: optional_text(gateway, "callManagerGroupName"),
        units,
    })
}

/// Decodes an `executeSQLQueryResponse` into rows.
///
/// A reply with no `<row>` elements yields an empty list.
///
/// # Errors
///
/// Returns [`AxlError::Protocol`] when the response has no return element.
pub fn sql_rows(response: &XmlElement) -> Result<Vec<SqlRow>, AxlError> {
    Ok(returned(response)?
        .children_named("row")
        .map(|row| {
            SqlRow::from_pairs(row.children.iter().map(|column| {
                let text = column.text.trim();
                let value = (!text.is_empty()).then(|| text.to_string());
                (column.name.clone(), value)
            }))
        })
        .collect())
}

/// Decodes the identifier returned by an `add*` operation.
///
/// # Errors
///
/// Returns [`AxlError::Protocol`] when the return value is empty.
pub fn created_uuid(response: &XmlElement) -> Result<AxlUuid, AxlError> {
    let value = returned(response)?.text.trim();
    if value.is_empty() {
        return Err(AxlError::Protocol(format!("{} returned no identifier", response.name)));
    }
    Ok(AxlUuid::new(value))
}

/// Decodes a `getGatewayEndpointAnalogAccessResponse`.
///
/// `requested` is used when the reply omits the endpoint identifier.
///
/// # Errors
///
/// Returns [`AxlError::Protocol`] when required endpoint fields are missing.
pub fn analog_endpoint(
    response: &XmlElement,
    requested: &AxlUuid,
) -> Result<AnalogEndpointRecord, AxlError> {
    let access = returned(response)?.child("gatewayEndpointAnalogAccess").ok_or_else(|| {
        AxlError::Protocol("getGatewayEndpointAnalogAccess returned no endpoint".to_string())
    })?;
    let endpoint = access
        .child("endpoint")
        .ok_or_else(|| AxlError::Protocol("analog access has no endpoint element".to_string()))?;
    let uuid = access.attribute("uuid").map_or_else(|| requested.clone(), AxlUuid::new);
    let line = endpoint.path(&["port", "lines"]).and_then(|lines| lines.child("line"));
    let line = match line {
        Some(line) => Some(line_record(line)?),
        None => None,
    };
    Ok(AnalogEndpointRecord {
        uuid,
        domain_name: text_or_empty(access, "domainName"),
        unit: optional_number(access, "unit")?.unwrap_or(0),
        subunit: required_number(access, "subunit")?,
        index: required_number(endpoint, "index")?,
        name: required_text(endpoint, "name")?.to_string(),
        description: optional_text(endpoint, "description"),
        device_pool: optional_text(endpoint, "devicePoolName"),
        location: optional_text(endpoint, "locationName"),
        line,
    })
}

/// Decodes the first line of an analog port.
fn line_record(line: &XmlElement) -> Result<LineRecord, AxlError> {
    let dirn = line
        .child("dirn")
        .ok_or_else(|| AxlError::Protocol("endpoint line has no directory number".to_string()))?;
    Ok(LineRecord {
        pattern: required_text(dirn, "pattern")?.to_string(),
        partition: optional_text(dirn, "routePartitionName"),
        display: optional_text(line, "display"),
        e164_mask: optional_text(line, "e164Mask"),
    })
}

// ============================================================================
// SECTION: Field Helpers
// ============================================================================

/// Returns the trimmed text of `name` when it is not blank.
fn trimmed_text<'a>(element: &'a XmlElement, name: &str) -> Option<&'a str> {
    element.child_text(name).map(str::trim).filter(|text| !text.is_empty())
}

/// Returns the trimmed text of `name` or a protocol error.
fn required_text<'a>(element: &'a XmlElement, name: &str) -> Result<&'a str, AxlError> {
    trimmed_text(element, name)
        .ok_or_else(|| AxlError::Protocol(format!("{} is missing {name}", element.name)))
}

/// Returns the trimmed text of `name`, empty when absent.
fn text_or_empty(element: &XmlElement, name: &str) -> String {
    trimmed_text(element, name).unwrap_or_default().to_string()
}

/// Returns the text of `name` exactly as sent, if any.
fn optional_text(element: &XmlElement, name: &str) -> Option<String> {
    element.child_text(name).map(str::to_string)
}

/// Parses the required numeric field `name`.
fn required_number(element: &XmlElement, name: &str) -> Result<u32, AxlError> {
    optional_number(element, name)?
        .ok_or_else(|| AxlError::Protocol(format!("{} is missing {name}", element.name)))
}

/// Parses the optional numeric field `name`.
fn optional_number(element: &XmlElement, name: &str) -> Result<Option<u32>, AxlError> {
    trimmed_text(element, name)
        .map(|text| {
            text.parse::<u32>().map_err(|_| {
                AxlError::Protocol(format!("{}.{name} is not a number: {text}", element.name))
            })
        })
        .transpose()
}
