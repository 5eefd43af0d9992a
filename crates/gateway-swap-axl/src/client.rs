// crates/gateway-swap-axl/src/client.rs
// ============================================================================
// Module: AXL Client
// Description: Blocking SOAP transport and AdminApi implementation.
// Purpose: Execute AXL operations against a publisher with strict limits.
// Dependencies: gateway-swap-core, reqwest, tracing, url
// ============================================================================

//! ## Overview
//! [`AxlClient`] owns one HTTP client configured for a single publisher. Each
//! operation encodes its envelope, posts it with basic auth and the versioned
//! `SOAPAction`, reads a bounded reply, and decodes it. A SOAP fault is
//! reported as a fault whatever the HTTP status; any other non-success status
//! is a transport error. Redirects are not followed.
//!
//! Envelopes are logged at `trace` level. Credentials travel only in the
//! `Authorization` header, which is never logged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;

use gateway_swap_core::AdminApi;
use gateway_swap_core::AnalogEndpointDescriptor;
use gateway_swap_core::AnalogEndpointRecord;
use gateway_swap_core::ApiError;
use gateway_swap_core::ApiOperation;
use gateway_swap_core::AxlUuid;
use gateway_swap_core::GatewayDescriptor;
use gateway_swap_core::GatewayRecord;
use gateway_swap_core::SqlRow;
use reqwest::Certificate;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use reqwest::redirect::Policy;
use tracing::debug;
use tracing::trace;
use url::Url;

use crate::config::AxlClientConfig;
use crate::config::parse_endpoint;
use crate::envelope;
use crate::error::AxlError;
use crate::response;
use crate::xml::XmlElement;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Request content type for SOAP 1.1.
const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";
/// Maximum characters of a non-SOAP error body echoed into an error.
const ERROR_PREVIEW_CHARS: usize = 256;

// ============================================================================
// SECTION: Client
// ============================================================================

/// AXL client for one publisher.
///
/// # Invariants
/// - Built once per run and borrowed by every operation.
/// - Every reply body is bounded by `config.max_response_bytes`.
pub struct AxlClient {
    /// Connection settings.
    config: AxlClientConfig,
    /// Validated service URL.
    endpoint: Url,
    /// HTTP client.
    client: Client,
}

impl AxlClient {
    /// Builds a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`AxlError::Config`] when the endpoint or trust anchor is
    /// invalid and [`AxlError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(config: AxlClientConfig) -> Result<Self, AxlError> {
        let endpoint = parse_endpoint(&config.endpoint)?;
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .redirect(Policy::none())
            .danger_accept_invalid_certs(!config.verify_tls);
        if let Some(pem) = &config.ca_cert_pem {
            let cert = Certificate::from_pem(pem)
                .map_err(|err| AxlError::Config(format!("invalid ca cert: {err}")))?;
            builder = builder.add_root_certificate(cert);
        }
        let client = builder.build().map_err(|err| AxlError::Transport(err.to_string()))?;
        Ok(Self {
            config,
            endpoint,
            client,
        })
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &AxlClientConfig {
        &self.config
    }

    /// Posts `envelope` for `operation` and returns the decoded response element.
    ///
    /// # Errors
    ///
    /// Returns [`AxlError`] for transport failures, oversize or malformed
    /// replies, SOAP faults, and non-success statuses.
    pub fn call(&self, operation: ApiOperation, envelope: String) -> Result<XmlElement, AxlError> {
        debug!(%operation, endpoint = %self.endpoint, "axl request");
        trace!(%operation, %envelope, "axl request envelope");
        let mut response = self
            .client
            .post(self.endpoint.clone())
            .basic_auth(&self.config.username, Some(&self.config.password))
            .headers(self.headers(operation)?)
            .body(envelope)
            .send()
            .map_err(|err| AxlError::Transport(err.to_string()))?;
        let status = response.status();
        let body = read_response_limited(&mut response, self.config.max_response_bytes)?;
        let body = String::from_utf8(body)
            .map_err(|_| AxlError::Protocol("reply is not valid utf-8".to_string()))?;
        trace!(%operation, status = status.as_u16(), envelope = %body, "axl response envelope");
        match response::response_element(&body, operation) {
            Ok(element) if status.is_success() => {
                debug!(%operation, status = status.as_u16(), "axl request succeeded");
                Ok(element)
            }
            Err(err @ AxlError::Fault { .. }) => {
                debug!(%operation, status = status.as_u16(), error = %err, "axl fault");
                Err(err)
            }
            Err(err) if status.is_success() => Err(err),
            _ => {
                let preview: String = body.trim().chars().take(ERROR_PREVIEW_CHARS).collect();
                Err(AxlError::Transport(format!("http status {}: {preview}", status.as_u16())))
            }
        }
    }

    /// Builds request headers for `operation`.
    ///
    /// # Errors
    ///
    /// Returns [`AxlError::Config`] when the version yields an invalid header.
    fn headers(&self, operation: ApiOperation) -> Result<HeaderMap, AxlError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(SOAP_CONTENT_TYPE));
        let action = HeaderValue::from_str(&self.config.version.soap_action(operation))
            .map_err(|_| AxlError::Config("invalid soapaction header".to_string()))?;
        headers.insert("soapaction", action);
        Ok(headers)
    }

    /// Looks up a gateway by domain name.
    ///
    /// # Errors
    ///
    /// Returns [`AxlError`] when the call fails or the reply cannot be decoded.
    pub fn get_gateway(&self, domain_name: &str) -> Result<GatewayRecord, AxlError> {
        let envelope = envelope::get_gateway(&self.config.version, domain_name)?;
        let element = self.call(ApiOperation::GetGateway, envelope)?;
        response::gateway(&element)
    }

    /// Runs a direct query.
    ///
    /// # Errors
    ///
    /// Returns [`AxlError`] when the call fails or the reply cannot be decoded.
    pub fn execute_sql_query(&self, sql: &str) -> Result<Vec<SqlRow>, AxlError> {
        let envelope = envelope::execute_sql_query(&self.config.version, sql)?;
        let element = self.call(ApiOperation::ExecuteSqlQuery, envelope)?;
        response::sql_rows(&element)
    }

    /// Creates a gateway.
    ///
    /// # Errors
    ///
    /// Returns [`AxlError`] when the call fails or the reply cannot be decoded.
    pub fn add_gateway(&self, gateway: &GatewayDescriptor) -> Result<AxlUuid, AxlError> {
        let envelope = envelope::add_gateway(&self.config.version, gateway)?;
        let element = self.call(ApiOperation::AddGateway, envelope)?;
        response::created_uuid(&element)
    }

    /// Fetches an analog access endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AxlError`] when the call fails or the reply cannot be decoded.
    pub fn get_gateway_endpoint_analog_access(
        &self,
        uuid: &AxlUuid,
    ) -> Result<AnalogEndpointRecord, AxlError> {
        let envelope = envelope::get_gateway_endpoint_analog_access(&self.config.version, uuid)?;
        let element = self.call(ApiOperation::GetGatewayEndpointAnalogAccess, envelope)?;
        response::analog_endpoint(&element, uuid)
    }

    /// Creates an analog access endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AxlError`] when the call fails or the reply cannot be decoded.
    pub fn add_gateway_endpoint_analog_access(
        &self,
        endpoint: &AnalogEndpointDescriptor,
    ) -> Result<AxlUuid, AxlError> {
        let envelope =
            envelope::add_gateway_endpoint_analog_access(&self.config.version, endpoint)?;
        let element = self.call(ApiOperation::AddGatewayEndpointAnalogAccess, envelope)?;
        response::created_uuid(&element)
    }
}

// ============================================================================
// SECTION: AdminApi
// ============================================================================

impl AdminApi for AxlClient {
    fn get_gateway(&self, domain_name: &str) -> Result<GatewayRecord, ApiError> {
        Ok(Self::get_gateway(self, domain_name)?)
    }

    fn execute_sql_query(&self, sql: &str) -> Result<Vec<SqlRow>, ApiError> {
        Ok(Self::execute_sql_query(self, sql)?)
    }

    fn add_gateway(&self, gateway: &GatewayDescriptor) -> Result<AxlUuid, ApiError> {
        Ok(Self::add_gateway(self, gateway)?)
    }

    fn get_gateway_endpoint_analog_access(
        &self,
        uuid: &AxlUuid,
    ) -> Result<AnalogEndpointRecord, ApiError> {
        Ok(Self::get_gateway_endpoint_analog_access(self, uuid)?)
    }

    fn add_gateway_endpoint_analog_access(
        &self,
        endpoint: &AnalogEndpointDescriptor,
    ) -> Result<AxlUuid, ApiError> {
        Ok(Self::add_gateway_endpoint_analog_access(self, endpoint)?)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads the response body while enforcing a byte limit.
fn read_response_limited(response: &mut Response, max_bytes: usize) -> Result<Vec<u8>, AxlError> {
    let max_bytes_u64 = u64::try_from(max_bytes)
        .map_err(|_| AxlError::Config("response size limit exceeds u64".to_string()))?;
    let expected_len = response.content_length();
    if let Some(expected) = expected_len
        && expected > max_bytes_u64
    {
        return Err(AxlError::ResponseTooLarge {
            actual: usize::try_from(expected).unwrap_or(usize::MAX),
            limit: max_bytes,
        });
    }
    let mut buf = Vec::new();
    response
        .take(max_bytes_u64.saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(|err| AxlError::Transport(format!("failed to read response: {err}")))?;
    if buf.len() > max_bytes {
        return Err(AxlError::ResponseTooLarge {
            actual: buf.len(),
            limit: max_bytes,
        });
    }
    if let Some(expected) = expected_len
        && u64::try_from(buf.len()).unwrap_or(u64::MAX) < expected
    {
        return Err(AxlError::Transport("response truncated".to_string()));
    }
    Ok(buf)
}
