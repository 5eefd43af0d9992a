// crates/gateway-swap-core/src/pipeline.rs
// ============================================================================
// Module: Swap Pipeline
// Description: Linear gateway swap driven through an AdminApi implementation.
// Purpose: Resolve, enumerate, map, create, and migrate endpoints in order.
// Dependencies: serde, thiserror, tracing, crate model types
// ============================================================================

//! ## Overview
//! [`GatewaySwap`] runs the swap as one fixed sequence:
//! resolve gateway, enumerate ports, map model, create gateway, then migrate
//! each port. The first error ends the run. Nothing already created is rolled
//! back, so a failure part-way leaves the new gateway and any migrated ports
//! next to the untouched source gateway.
//!
//! Progress is reported through [`SwapObserver`]; the pipeline itself never
//! writes to the terminal.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use tracing::info;

use crate::api::AdminApi;
use crate::api::ApiError;
use crate::api::ApiOperation;
use crate::endpoint::AnalogEndpointDescriptor;
use crate::endpoint::AnalogEndpointRecord;
use crate::endpoint::EndpointMappingError;
use crate::gateway::GatewayDescriptor;
use crate::gateway::GatewayRecord;
use crate::gateway::VendorConfig;
use crate::identifiers::AxlUuid;
use crate::identifiers::InvalidUuid;
use crate::models::MODEL_MAPPINGS;
use crate::models::ModelMapping;
use crate::ports::MissingColumn;
use crate::ports::PortMember;
use crate::ports::member_query;

// ============================================================================
// SECTION: Options
// ============================================================================

/// Prefix prepended to the source domain to name the replacement gateway.
pub const DEFAULT_DOMAIN_PREFIX: &str = "new-";

/// Swap behavior knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapOptions {
    /// Prefix for the replacement gateway domain.
    pub domain_prefix: String,
    /// Vendor configuration attached to the replacement gateway.
    pub vendor_config: VendorConfig,
    /// Perform every read and build every descriptor, but create nothing.
    pub dry_run: bool,
}

impl Default for SwapOptions {
    fn default() -> Self {
        Self {
            domain_prefix: DEFAULT_DOMAIN_PREFIX.to_string(),
            vendor_config: VendorConfig::swap_defaults(),
            dry_run: false,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Swap pipeline errors.
///
/// # Invariants
/// - Variants are stable for CLI error mapping and tests.
#[derive(Debug, Error)]
pub enum SwapError {
    /// No source domain name was supplied.
    #[error("gateway domain name is empty")]
    EmptyDomain,
    /// A remote call failed.
    #[error("{operation} failed: {source}")]
    Api {
        /// Operation that failed.
        operation: ApiOperation,
        /// Underlying API error.
        #[source]
        source: ApiError,
    },
    /// The source gateway model has no replacement mapping.
    #[error("unsupported gateway model {model} (supported: {supported})")]
    UnsupportedModel {
        /// Reported source model.
        model: String,
        /// Comma-separated supported models.
        supported: String,
    },
    /// A vendor configuration entry cannot be rendered as an element.
    #[error("vendor config entry {name} is not a valid element name")]
    InvalidVendorConfig {
        /// Offending entry name.
        name: String,
    },
    /// The gateway identifier cannot be used in a direct query.
    #[error(transparent)]
    InvalidUuid(#[from] InvalidUuid),
    /// A membership row lacked its endpoint identifier.
    #[error(transparent)]
    MissingColumn(#[from] MissingColumn),
    /// A source endpoint could not be mapped onto the replacement.
    #[error(transparent)]
    Endpoint(#[from] EndpointMappingError),
    /// The observer stopped the swap between steps.
    #[error("swap stopped: {0}")]
    Interrupted(#[from] SwapInterrupted),
}

impl SwapError {
    /// Returns the remote operation that failed, for API errors.
    #[must_use]
    pub const fn operation(&self) -> Option<ApiOperation> {
        match self {
            Self::Api {
                operation, ..
            } => Some(*operation),
            _ => None,
        }
    }
}

/// Tags an API result with the operation that produced it.
fn remote<T>(operation: ApiOperation, result: Result<T, ApiError>) -> Result<T, SwapError> {
    result.map_err(|source| SwapError::Api {
        operation,
        source,
    })
}

// ============================================================================
// SECTION: Observation
// ============================================================================

/// Progress events emitted while a swap runs.
#[derive(Debug, Clone, Copy)]
pub enum SwapEvent<'a> {
    /// The source gateway was found.
    GatewayResolved {
        /// Source gateway.
        gateway: &'a GatewayRecord,
    },
    /// The source gateway's ports were listed.
    PortsEnumerated {
        /// Source gateway.
        gateway: &'a GatewayRecord,
        /// Number of ports found.
        count: usize,
    },
    /// The replacement gateway descriptor was built.
    GatewayPlanned {
        /// Replacement descriptor.
        gateway: &'a GatewayDescriptor,
    },
    /// The replacement gateway was created.
    GatewayCreated {
        /// Replacement descriptor.
        gateway: &'a GatewayDescriptor,
        /// Identifier assigned by the server.
        uuid: &'a AxlUuid,
    },
    /// A source endpoint was read and mapped.
    EndpointPlanned {
        /// Source endpoint.
        source: &'a AnalogEndpointRecord,
        /// Replacement descriptor.
        target: &'a AnalogEndpointDescriptor,
    },
    /// A replacement endpoint was created.
    EndpointCreated {
        /// Replacement descriptor.
        target: &'a AnalogEndpointDescriptor,
        /// Identifier assigned by the server.
        uuid: &'a AxlUuid,
    },
}

/// Observer refusal that ends the swap before the next step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct SwapInterrupted {
    /// Human-readable reason, shown to the operator as is.
    pub reason: String,
}

impl SwapInterrupted {
    /// Creates an interruption with the given reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Receives swap progress events.
///
/// # Invariants
/// - An `Err` ends the run; no further remote call is issued.
pub trait SwapObserver {
    /// Handles one event.
    ///
    /// # Errors
    ///
    /// Returns [`SwapInterrupted`] to stop the swap.
    fn on_event(&mut self, event: &SwapEvent<'_>) -> Result<(), SwapInterrupted>;
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SwapObserver for NoopObserver {
    fn on_event(&mut self, _event: &SwapEvent<'_>) -> Result<(), SwapInterrupted> {
        Ok(())
    }
}

// ============================================================================
// SECTION: Report
// ============================================================================

/// One port carried to the replacement gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigratedEndpoint {
    /// Source endpoint identifier.
    pub source_uuid: AxlUuid,
    /// Source endpoint name.
    pub source_name: String,
    /// Replacement endpoint name.
    pub name: String,
    /// Replacement port index.
    pub index: u32,
    /// Directory number carried across.
    pub directory_number: String,
    /// Replacement endpoint identifier; `None` on a dry run.
    pub created_uuid: Option<AxlUuid>,
}

/// Outcome of a completed swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapReport {
    /// Source gateway domain.
    pub source_domain: String,
    /// Source gateway model.
    pub source_product: String,
    /// Replacement gateway domain.
    pub target_domain: String,
    /// Replacement gateway model.
    pub target_product: String,
    /// Replacement gateway identifier; `None` on a dry run.
    pub gateway_uuid: Option<AxlUuid>,
    /// Whether creation calls were skipped.
    pub dry_run: bool,
    /// Ports in migration order.
    pub endpoints: Vec<MigratedEndpoint>,
}

// ============================================================================
// SECTION: Pipeline
// ============================================================================

/// Gateway swap bound to an API client context.
///
/// # Invariants
/// - Steps run in order; any error ends the run without rollback.
pub struct GatewaySwap<'a, A: AdminApi + ?Sized> {
    /// Administrative API client.
    api: &'a A,
    /// Swap options.
    options: SwapOptions,
}

impl<'a, A: AdminApi + ?Sized> GatewaySwap<'a, A> {
    /// Binds a swap to `api`.
    #[must_use]
    pub const fn new(api: &'a A, options: SwapOptions) -> Self {
        Self {
            api,
            options,
        }
    }

    /// Runs the full swap for the gateway registered under `source_domain`.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError`] on the first failed step, including
    /// [`SwapError::Interrupted`] when the observer stops the run.
    pub fn run(
        &self,
        source_domain: &str,
        observer: &mut dyn SwapObserver,
    ) -> Result<SwapReport, SwapError> {
        if let Some(entry) = self.options.vendor_config.invalid_entry() {
            return Err(SwapError::InvalidVendorConfig {
                name: entry.name.clone(),
            });
        }

        let gateway = self.resolve_gateway(source_domain)?;
        observer.on_event(&SwapEvent::GatewayResolved {
            gateway: &gateway,
        })?;

        let members = self.enumerate_ports(&gateway)?;
        observer.on_event(&SwapEvent::PortsEnumerated {
            gateway: &gateway,
            count: members.len(),
        })?;

        let (mapping, descriptor) = self.plan_gateway(&gateway, source_domain)?;
        observer.on_event(&SwapEvent::GatewayPlanned {
            gateway: &descriptor,
        })?;

        let gateway_uuid = if self.options.dry_run {
            None
        } else {
            let uuid = self.create_gateway(&descriptor)?;
            observer.on_event(&SwapEvent::GatewayCreated {
                gateway: &descriptor,
                uuid: &uuid,
            })?;
            Some(uuid)
        };

        let mut endpoints = Vec::with_capacity(members.len());
        for member in &members {
            endpoints.push(self.migrate_endpoint(
                member,
                mapping,
                &descriptor.domain_name,
                observer,
            )?);
        }
        info!(
            source = %gateway.domain_name,
            target = %descriptor.domain_name,
            ports = endpoints.len(),
            dry_run = self.options.dry_run,
            "gateway swap complete"
        );

        Ok(SwapReport {
            source_domain: gateway.domain_name,
            source_product: gateway.product,
            target_domain: descriptor.domain_name,
            target_product: descriptor.product,
            gateway_uuid,
            dry_run: self.options.dry_run,
            endpoints,
        })
    }

    /// Looks up the source gateway.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::EmptyDomain`] for a blank domain and
    /// [`SwapError::Api`] when the lookup fails.
    pub fn resolve_gateway(&self, domain_name: &str) -> Result<GatewayRecord, SwapError> {
        let domain_name = domain_name.trim();
        if domain_name.is_empty() {
            return Err(SwapError::EmptyDomain);
        }
        let gateway = remote(ApiOperation::GetGateway, self.api.get_gateway(domain_name))?;
        debug!(
            uuid = %gateway.uuid,
            product = %gateway.product,
            group = gateway.call_manager_group.as_deref().unwrap_or(""),
            "resolved gateway"
        );
        Ok(gateway)
    }

    /// Lists the endpoints attached to `gateway`.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError`] when the identifier cannot be normalized, the
    /// query fails, or a row lacks its endpoint identifier.
    pub fn enumerate_ports(&self, gateway: &GatewayRecord) -> Result<Vec<PortMember>, SwapError> {
        let raw = gateway.uuid.to_raw()?;
        let sql = member_query(&raw);
        debug!(%sql, "enumerating gateway ports");
        let rows = remote(ApiOperation::ExecuteSqlQuery, self.api.execute_sql_query(&sql))?;
        let members = rows
            .iter()
            .enumerate()
            .map(|(position, row)| PortMember::from_row(position, row))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = members.len(), "enumerated gateway ports");
        Ok(members)
    }

    /// Maps the source gateway onto its replacement layout.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::UnsupportedModel`] when the model has no mapping.
    pub fn plan_gateway(
        &self,
        gateway: &GatewayRecord,
        source_domain: &str,
    ) -> Result<(&'static ModelMapping, GatewayDescriptor), SwapError> {
        let mapping = ModelMapping::for_source(&gateway.product).ok_or_else(|| {
            SwapError::UnsupportedModel {
                model: gateway.product.clone(),
                supported: MODEL_MAPPINGS
                    .iter()
                    .map(|mapping| mapping.source_product)
                    .collect::<Vec<_>>()
                    .join(", "),
            }
        })?;
        let base = if gateway.domain_name.trim().is_empty() {
            source_domain.trim()
        } else {
            gateway.domain_name.trim()
        };
        let domain_name = format!("{}{base}", self.options.domain_prefix);
        let descriptor =
            mapping.gateway_descriptor(gateway, domain_name, self.options.vendor_config.clone());
        Ok((mapping, descriptor))
    }

    /// Creates the replacement gateway.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Api`] when the gateway is rejected.
    pub fn create_gateway(&self, descriptor: &GatewayDescriptor) -> Result<AxlUuid, SwapError> {
        let uuid = remote(ApiOperation::AddGateway, self.api.add_gateway(descriptor))?;
        info!(domain = %descriptor.domain_name, %uuid, "created gateway");
        Ok(uuid)
    }

    /// Reads one source endpoint and re-creates it on the replacement.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError`] when the read fails, the endpoint cannot be
    /// mapped, the observer stops the run, or creation is rejected.
    pub fn migrate_endpoint(
        &self,
        member: &PortMember,
        mapping: &ModelMapping,
        domain_name: &str,
        observer: &mut dyn SwapObserver,
    ) -> Result<MigratedEndpoint, SwapError> {
        let source = remote(
            ApiOperation::GetGatewayEndpointAnalogAccess,
            self.api.get_gateway_endpoint_analog_access(&member.device),
        )?;
        let target = AnalogEndpointDescriptor::for_replacement(&source, mapping, domain_name)?;
        observer.on_event(&SwapEvent::EndpointPlanned {
            source: &source,
            target: &target,
        })?;

        let created_uuid = if self.options.dry_run {
            None
        } else {
            let uuid = remote(
                ApiOperation::AddGatewayEndpointAnalogAccess,
                self.api.add_gateway_endpoint_analog_access(&target),
            )?;
            debug!(name = %target.name, %uuid, "created endpoint");
            observer.on_event(&SwapEvent::EndpointCreated {
                target: &target,
                uuid: &uuid,
            })?;
            Some(uuid)
        };

        Ok(MigratedEndpoint {
            source_uuid: source.uuid,
            source_name: source.name,
            name: target.name,
            index: target.index,
            directory_number: target.line.pattern,
            created_uuid,
        })
    }
}
