// crates/gateway-swap-axl/src/config.rs
// ============================================================================
// Module: AXL Client Configuration
// Description: Endpoint, credential, TLS, and limit settings for the client.
// Purpose: Describe one publisher connection, built once per run.
// Dependencies: url
// ============================================================================

//! Connection settings for [`crate::AxlClient`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

use url::Url;

use crate::error::AxlError;
use crate::schema::AxlVersion;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default AXL HTTPS port.
pub const DEFAULT_AXL_PORT: u16 = 8443;
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default maximum response body size (8 MiB).
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 8 * 1024 * 1024;
/// Service URL template; host and port are filled in per publisher.
const ENDPOINT_TEMPLATE: &str = "https://localhost/axl/";

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// AXL client configuration.
///
/// # Invariants
/// - `endpoint` is the full service URL, normally `https://<host>:8443/axl/`.
/// - `password` is never printed by the `Debug` implementation.
/// - `verify_tls = false` accepts any server certificate.
/// - `max_response_bytes` is a hard upper bound on reply bodies.
#[derive(Clone)]
pub struct AxlClientConfig {
    /// Service URL.
    pub endpoint: String,
    /// Basic auth user.
    pub username: String,
    /// Basic auth password.
    pub password: String,
    /// AXL schema version used for the namespace and `SOAPAction`.
    pub version: AxlVersion,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Verify the server certificate chain.
    pub verify_tls: bool,
    /// Extra PEM trust anchor (typically the publisher's Tomcat certificate).
    pub ca_cert_pem: Option<Vec<u8>>,
    /// Maximum response size, in bytes.
    pub max_response_bytes: usize,
}

impl AxlClientConfig {
    /// Builds a configuration with default timeout, limits, and TLS policy.
    #[must_use]
    pub fn new(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        version: AxlVersion,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            username: username.into(),
            password: password.into(),
            version,
            timeout: DEFAULT_TIMEOUT,
            verify_tls: false,
            ca_cert_pem: None,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

impl fmt::Debug for AxlClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxlClientConfig")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("version", &self.version)
            .field("timeout", &self.timeout)
            .field("verify_tls", &self.verify_tls)
            .field("ca_cert_pem", &self.ca_cert_pem.as_ref().map(Vec::len))
            .field("max_response_bytes", &self.max_response_bytes)
            .finish()
    }
}

/// Builds the AXL service URL for a publisher host and port.
///
/// IPv6 literals may be given bare or bracketed.
///
/// # Errors
///
/// Returns [`AxlError::Config`] when `host` is not a valid host name or
/// address.
pub fn endpoint_for_host(host: &str, port: u16) -> Result<String, AxlError> {
    let host = host.trim();
    let mut url = Url::parse(ENDPOINT_TEMPLATE)
        .map_err(|err| AxlError::Config(format!("invalid endpoint template: {err}")))?;
    let bare = host.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')).unwrap_or(host);
    match bare.parse::<IpAddr>() {
        Ok(ip) => url
            .set_ip_host(ip)
            .map_err(|()| AxlError::Config(format!("invalid publisher host {host:?}")))?,
        Err(_) => url
            .set_host(Some(host))
            .map_err(|err| AxlError::Config(format!("invalid publisher host {host:?}: {err}")))?,
    }
    url.set_port(Some(port))
        .map_err(|()| AxlError::Config(format!("invalid publisher port {port}")))?;
    Ok(url.into())
}

/// Parses and validates a full AXL service URL.
///
/// # Errors
///
/// Returns [`AxlError::Config`] when the URL does not parse, is not http or
/// https, has no host, or carries credentials.
pub fn parse_endpoint(raw: &str) -> Result<Url, AxlError> {
    let url = Url::parse(raw.trim())
        .map_err(|err| AxlError::Config(format!("invalid url {raw:?}: {err}")))?;
    match url.scheme() {
        "https" | "http" => {}
        other => return Err(AxlError::Config(format!("unsupported url scheme {other}"))),
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(AxlError::Config(format!("url {raw:?} has no host")));
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(AxlError::Config("url credentials are not allowed".to_string()));
    }
    Ok(url)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
