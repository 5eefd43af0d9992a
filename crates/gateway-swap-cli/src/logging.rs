// crates/gateway-swap-cli/src/logging.rs
// ============================================================================
// Module: CLI Logging
// Description: Diagnostic log filter and subscriber setup.
// Purpose: Route tracing output to stderr with operator-selected verbosity.
// Dependencies: thiserror, tracing-subscriber
// ============================================================================

//! ## Overview
//! Diagnostics go through `tracing` to standard error and never mix with the
//! progress lines on standard output. The base filter comes from `RUST_LOG`
//! (default `warn`); `--debug` and `--verbose` raise the gateway-swap crates
//! to `debug` and `trace` on top of it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Filter used when `RUST_LOG` is unset or blank.
pub const DEFAULT_FILTER: &str = "warn";

/// Log targets raised by `--debug` and `--verbose`.
pub const CRATE_TARGETS: &[&str] =
    &["gateway_swap", "gateway_swap_axl", "gateway_swap_cli", "gateway_swap_core"];

// ============================================================================
// SECTION: Types
// ============================================================================

/// Requested diagnostic verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Only the `RUST_LOG` filter applies.
    Normal,
    /// Pipeline steps and request outcomes.
    Debug,
    /// Full request and response envelopes.
    Trace,
}

impl Verbosity {
    /// Picks the verbosity from the `--debug` and `--verbose` flags.
    #[must_use]
    pub const fn from_flags(debug: bool, verbose: bool) -> Self {
        if verbose {
            Self::Trace
        } else if debug {
            Self::Debug
        } else {
            Self::Normal
        }
    }

    /// Level applied to [`CRATE_TARGETS`], if raised.
    const fn level(self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::Debug => Some("debug"),
            Self::Trace => Some("trace"),
        }
    }
}

/// Logging setup errors.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The filter expression did not parse.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// A global subscriber was already installed.
    #[error("{0}")]
    Init(String),
}

// ============================================================================
// SECTION: Setup
// ============================================================================

/// Builds the log filter from `RUST_LOG` and the requested verbosity.
///
/// # Errors
///
/// Returns [`LoggingError::Filter`] when `rust_log` is not a valid filter.
pub fn build_filter(
    verbosity: Verbosity,
    rust_log: Option<&str>,
) -> Result<EnvFilter, LoggingError> {
    let base = rust_log.map(str::trim).filter(|value| !value.is_empty()).unwrap_or(DEFAULT_FILTER);
    let mut filter =
        EnvFilter::try_new(base).map_err(|err| LoggingError::Filter(err.to_string()))?;
    if let Some(level) = verbosity.level() {
        for target in CRATE_TARGETS {
            let directive = format!("{target}={level}")
                .parse::<Directive>()
                .map_err(|err| LoggingError::Filter(err.to_string()))?;
            filter = filter.add_directive(directive);
        }
    }
    Ok(filter)
}

/// Installs the global stderr subscriber.
///
/// # Errors
///
/// Returns [`LoggingError`] when the filter is invalid or a subscriber is
/// already installed.
pub fn init(verbosity: Verbosity, rust_log: Option<&str>) -> Result<(), LoggingError> {
    let filter = build_filter(verbosity, rust_log)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| LoggingError::Init(err.to_string()))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only assertions are permitted.")]

    use super::Verbosity;
    use super::build_filter;

    #[test]
    fn flags_pick_the_highest_verbosity() {
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(true, false), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Trace);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Trace);
    }

    #[test]
    fn debug_raises_every_crate_target() {
        let rendered = build_filter(Verbosity::Debug, None).unwrap().to_string();
        assert!(rendered.contains("gateway_swap_axl=debug"), "{rendered}");
        assert!(rendered.contains("gateway_swap_core=debug"), "{rendered}");
        assert!(!rendered.contains("trace"), "{rendered}");
    }

    #[test]
    fn rust_log_is_kept_under_the_raised_targets() {
        let rendered = build_filter(Verbosity::Trace, Some("hyper=info")).unwrap().to_string();
        assert!(rendered.contains("hyper=info"), "{rendered}");
        assert!(rendered.contains("gateway_swap_axl=trace"), "{rendered}");
    }
}
