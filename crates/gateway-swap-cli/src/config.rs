// crates/gateway-swap-cli/src/config.rs
// ============================================================================
// Module: CLI Configuration
// Description: Layered settings from flags, environment, and a TOML file.
// Purpose: Resolve the AXL client configuration and swap options for a run.
// Dependencies: gateway-swap-axl, gateway-swap-core, serde, thiserror, toml, tracing
// ============================================================================

//! ## Overview
//! Settings are layered with command-line overrides first, then the process
//! environment (which already includes anything `.env` supplied), then the
//! optional TOML file, then built-in defaults.
//!
//! ## Invariants
//! - Credentials are only read from the environment, never from the file.
//! - The default config path may be absent; an explicit path must exist.
//! - Unknown keys in the TOML file are rejected.
//! - File reads are bounded by hard size limits.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs::File;
use std::io::ErrorKind;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use gateway_swap_axl::AxlClientConfig;
use gateway_swap_axl::AxlError;
use gateway_swap_axl::AxlVersion;
use gateway_swap_axl::DEFAULT_AXL_PORT;
use gateway_swap_axl::DEFAULT_MAX_RESPONSE_BYTES;
use gateway_swap_axl::DEFAULT_TIMEOUT;
use gateway_swap_axl::endpoint_for_host;
use gateway_swap_axl::load_schema_version;
use gateway_swap_axl::parse_endpoint;
use gateway_swap_core::VendorConfig;
use gateway_swap_core::pipeline::DEFAULT_DOMAIN_PREFIX;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "GATEWAY_SWAP_CONFIG";
/// Config file read when neither the flag nor the environment names one.
pub const DEFAULT_CONFIG_PATH: &str = "gateway-swap.toml";
/// Environment variable holding the publisher host.
pub const HOST_ENV: &str = "CUCM_HOSTNAME";
/// Environment variable holding the AXL user.
pub const USERNAME_ENV: &str = "CUCM_USERNAME";
/// Environment variable holding the AXL password.
pub const PASSWORD_ENV: &str = "CUCM_PASSWORD";
/// Schema file used for version discovery when no version is configured.
pub const DEFAULT_SCHEMA_PATH: &str = "schema/current/AXLAPI.wsdl";
/// Maximum config file size, in bytes.
pub const MAX_CONFIG_BYTES: usize = 1024 * 1024;
/// Maximum CA certificate size, in bytes.
pub const MAX_CA_CERT_BYTES: usize = 256 * 1024;

// ============================================================================
// SECTION: File Schema
// ============================================================================

/// Contents of the TOML config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Connection settings.
    #[serde(default)]
    pub axl: AxlSection,
    /// Swap behavior settings.
    #[serde(default)]
    pub swap: SwapSection,
}

/// `[axl]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AxlSection {
    /// Publisher host name or address.
    pub host: Option<String>,
    /// Publisher AXL port.
    pub port: Option<u16>,
    /// Full service URL; wins over `host` and `port`.
    pub url: Option<String>,
    /// WSDL used for version discovery.
    pub schema: Option<PathBuf>,
    /// Explicit AXL version (`major.minor`).
    pub api_version: Option<String>,
    /// Per-request timeout, in seconds.
    pub timeout_secs: Option<u64>,
    /// Verify the publisher certificate.
    pub verify_tls: Option<bool>,
    /// Extra PEM trust anchor.
    pub ca_cert: Option<PathBuf>,
    /// Maximum reply size, in bytes.
    pub max_response_bytes: Option<usize>,
}

/// `[swap]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SwapSection {
    /// Prefix for the replacement gateway domain.
    pub domain_prefix: Option<String>,
    /// Vendor configuration replacing the built-in fax/modem defaults.
    pub vendor_config: Option<BTreeMap<String, String>>,
}

// ============================================================================
// SECTION: Resolved Settings
// ============================================================================

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Config file path.
    pub config: Option<PathBuf>,
    /// Schema file path.
    pub schema: Option<PathBuf>,
    /// AXL version.
    pub api_version: Option<String>,
    /// Full service URL.
    pub axl_url: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug)]
pub struct Settings {
    /// AXL client configuration.
    pub client: AxlClientConfig,
    /// Prefix for the replacement gateway domain.
    pub domain_prefix: String,
    /// Vendor configuration for the replacement gateway.
    pub vendor_config: VendorConfig,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A file exceeds its size limit.
    #[error("refusing to read {path}: {size} bytes exceeds limit {limit}")]
    TooLarge {
        /// File path.
        path: String,
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
    /// The config file is not valid TOML for this schema.
    #[error("failed to parse {path}: {reason}")]
    Parse {
        /// File path.
        path: String,
        /// Parser message.
        reason: String,
    },
    /// A required setting has no value in any layer.
    #[error("missing required setting {setting}")]
    Missing {
        /// Setting name.
        setting: &'static str,
    },
    /// A setting has an unusable value.
    #[error("invalid {setting}: {reason}")]
    Invalid {
        /// Setting name.
        setting: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// AXL version discovery failed.
    #[error(transparent)]
    Schema(#[from] AxlError),
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Resolves settings from overrides, the environment lookup, and the config file.
///
/// # Errors
///
/// Returns [`ConfigError`] when a file cannot be read, a required setting is
/// missing, or a value is invalid.
pub fn load_settings<F>(overrides: &Overrides, env: F) -> Result<Settings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let (path, explicit) = match overrides.config.clone() {
        Some(path) => (path, true),
        None => match non_empty(&env, CONFIG_ENV) {
            Some(path) => (PathBuf::from(path), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        },
    };
    let file = load_file_config(&path, explicit)?;
    resolve_settings(overrides, file, &env)
}

/// Reads and parses the config file at `path`.
///
/// A missing file yields the empty config unless `explicit` is set.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file cannot be read or parsed.
pub fn load_file_config(path: &Path, explicit: bool) -> Result<FileConfig, ConfigError> {
    let bytes = match read_bytes_with_limit(path, MAX_CONFIG_BYTES) {
        Ok(bytes) => bytes,
        Err(ReadLimitError::Io(err)) if !explicit && err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file; using defaults");
            return Ok(FileConfig::default());
        }
        Err(err) => return Err(err.into_config_error(path)),
    };
    let text = std::str::from_utf8(&bytes).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;
    let config = toml::from_str(text).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;
    debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

/// Layers overrides and the environment over a parsed config file.
///
/// # Errors
///
/// Returns [`ConfigError`] when a required setting is missing or invalid.
pub fn resolve_settings<F>(
    overrides: &Overrides,
    file: FileConfig,
    env: &F,
) -> Result<Settings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let FileConfig {
        axl,
        swap,
    } = file;
    let username = non_empty(env, USERNAME_ENV).ok_or(ConfigError::Missing {
        setting: USERNAME_ENV,
    })?;
    let password = env(PASSWORD_ENV).filter(|value| !value.is_empty()).ok_or(
        ConfigError::Missing {
            setting: PASSWORD_ENV,
        },
    )?;
    let endpoint = resolve_endpoint(overrides, &axl, env)?;
    let version = resolve_version(overrides, &axl)?;

    let mut client = AxlClientConfig::new(endpoint, username.trim(), password, version);
    client.timeout = match axl.timeout_secs {
        None => DEFAULT_TIMEOUT,
        Some(0) => {
            return Err(ConfigError::Invalid {
                setting: "axl.timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        Some(secs) => Duration::from_secs(secs),
    };
    client.max_response_bytes = match axl.max_response_bytes {
        None => DEFAULT_MAX_RESPONSE_BYTES,
        Some(0) => {
            return Err(ConfigError::Invalid {
                setting: "axl.max_response_bytes",
                reason: "must be greater than zero".to_string(),
            });
        }
        Some(limit) => limit,
    };
    client.verify_tls = axl.verify_tls.unwrap_or(false);
    if let Some(path) = &axl.ca_cert {
        let pem = read_bytes_with_limit(path, MAX_CA_CERT_BYTES)
            .map_err(|err| err.into_config_error(path))?;
        client.ca_cert_pem = Some(pem);
    }

    let domain_prefix = swap.domain_prefix.unwrap_or_else(|| DEFAULT_DOMAIN_PREFIX.to_string());
    if domain_prefix.trim().is_empty() {
        return Err(ConfigError::Invalid {
            setting: "swap.domain_prefix",
            reason: "must not be empty".to_string(),
        });
    }
    let vendor_config =
        swap.vendor_config.map_or_else(VendorConfig::swap_defaults, VendorConfig::from_pairs);
    if let Some(entry) = vendor_config.invalid_entry() {
        return Err(ConfigError::Invalid {
            setting: "swap.vendor_config",
            reason: format!("{} is not a valid element name", entry.name),
        });
    }

    Ok(Settings {
        client,
        domain_prefix,
        vendor_config,
    })
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the trimmed environment value, treating blank values as unset.
fn non_empty<F>(env: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    env(name).map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

/// Picks the service URL: explicit URL first, then host and port.
fn resolve_endpoint<F>(
    overrides: &Overrides,
    axl: &AxlSection,
    env: &F,
) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = overrides.axl_url.as_deref().or(axl.url.as_deref()) {
        return validate_url(url);
    }
    let file_host = axl.host.as_deref().map(str::trim).filter(|host| !host.is_empty());
    let (host, host_setting) = non_empty(env, HOST_ENV)
        .map(|host| (host, HOST_ENV))
        .or_else(|| file_host.map(|host| (host.to_string(), "axl.host")))
        .ok_or(ConfigError::Missing {
            setting: HOST_ENV,
        })?;
    let port = match axl.port {
        Some(0) => {
            return Err(ConfigError::Invalid {
                setting: "axl.port",
                reason: "must be greater than zero".to_string(),
            });
        }
        Some(port) => port,
        None => DEFAULT_AXL_PORT,
    };
    endpoint_for_host(&host, port).map_err(|err| ConfigError::Invalid {
        setting: host_setting,
        reason: err.to_string(),
    })
}

/// Accepts http and https URLs that name a host and carry no credentials.
fn validate_url(url: &str) -> Result<String, ConfigError> {
    parse_endpoint(url).map(String::from).map_err(|err| ConfigError::Invalid {
        setting: "axl.url",
        reason: err.to_string(),
    })
}

/// Uses the configured version or discovers it from the schema file.
fn resolve_version(overrides: &Overrides, axl: &AxlSection) -> Result<AxlVersion, ConfigError> {
    if let Some(value) = overrides.api_version.as_deref().or(axl.api_version.as_deref()) {
        return AxlVersion::parse(value).map_err(|err| ConfigError::Invalid {
            setting: "api_version",
            reason: err.to_string(),
        });
    }
    let schema = overrides
        .schema
        .clone()
        .or_else(|| axl.schema.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SCHEMA_PATH));
    let version = load_schema_version(&schema)?;
    debug!(schema = %schema.display(), version = %version, "discovered axl version");
    Ok(version)
}

/// Errors returned by bounded file reads.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

impl ReadLimitError {
    /// Attaches the file path to a bounded read failure.
    fn into_config_error(self, path: &Path) -> ConfigError {
        match self {
            Self::Io(source) => ConfigError::Read {
                path: path.display().to_string(),
                source,
            },
            Self::TooLarge {
                size,
                limit,
            } => ConfigError::TooLarge {
                path: path.display().to_string(),
                size,
                limit,
            },
        }
    }
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let mut limited = file.take(limit.saturating_add(1));
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}
