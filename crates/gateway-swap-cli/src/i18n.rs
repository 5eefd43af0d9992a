// crates/gateway-swap-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Message catalog and translation utilities for gateway-swap.
// Purpose: Keep every operator-facing string in one localized catalog.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! Prompts, progress lines, and error messages printed by `gateway-swap` are
//! looked up in a small translation catalog. All runtime output should be
//! routed through the [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
///
/// # Invariants
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Catalan.
    Ca,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ca => "ca",
        }
    }

    /// Attempts to parse a locale value (case-insensitive, tolerant of region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_', '.']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "ca" => Some(Self::Ca),
            _ => None,
        }
    }
}

/// Ordered list of supported CLI locales.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Ca];

/// A formatted message argument captured by the [`macro@crate::t`] macro.
///
/// # Invariants
/// - `key` matches a placeholder name without braces (for example, `domain`).
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"domain"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// English catalog entries.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "gateway-swap {version}"),
    ("main.banner", "Gateway Swap"),
    ("prompt.intro", "Please enter the hostname for the VG"),
    ("prompt.domain", "VG with domain / FQDN: "),
    ("prompt.domain_empty", "No gateway domain name was entered."),
    ("prompt.read_failed", "Failed to read the gateway domain name: {error}"),
    ("step.continue", "Press Enter to continue..."),
    ("step.unconfirmed", "Input closed before Enter was pressed; nothing more was created."),
    ("step.read_failed", "Failed to read the step confirmation: {error}"),
    ("dotenv.load_failed", "Failed to load .env file: {error}"),
    ("logging.init_failed", "Failed to initialize logging: {error}"),
    ("config.load_failed", "Configuration error: {error}"),
    ("client.init_failed", "Failed to create the AXL client: {error}"),
    ("swap.gateway.resolved", "Found gateway {domain} ({product})"),
    ("swap.gateway.lookup_failed", "Check your gateway name in CUCM.\n\ngetGateway: {error}"),
    ("swap.gateway.details_header", "GATEWAY details"),
    ("swap.gateway.detail.type", "type: {value}"),
    ("swap.gateway.detail.group", "CMG: {value}"),
    ("swap.gateway.detail.description", "desc: {value}"),
    ("swap.gateway.detail.uuid", "uuid: {value}"),
    ("swap.ports.count", "Found {count} port(s) on {domain}"),
    ("swap.ports.none", "No ports found on {domain}; only the gateway will be created."),
    ("swap.gateway.planned", "Replacement gateway: {domain} ({product})"),
    ("swap.gateway.created", "Gateway Added Successfully"),
    ("swap.gateway.created_uuid", "==> Gateway uuid: {uuid}"),
    ("swap.endpoint.details_header", "Specific details on the port:"),
    ("swap.endpoint.detail.slot", "slotnum: {value}"),
    ("swap.endpoint.detail.port", "portnum: {value}"),
    ("swap.endpoint.detail.name", "devicename: {value}"),
    ("swap.endpoint.detail.dn", "dn: {value}"),
    ("swap.endpoint.detail.caller_id", "callerID: {value}"),
    ("swap.endpoint.detail.mask", "mask: {value}"),
    ("swap.endpoint.detail.pool", "pool: {value}"),
    ("swap.endpoint.detail.location", "location: {value}"),
    ("swap.endpoint.detail.partition", "partition: {value}"),
    ("swap.endpoint.detail.none", "(none)"),
    ("swap.endpoint.would_add", "Would add {name} for DN {dn}"),
    ("swap.endpoint.created", "Added {name} for DN {dn}"),
    ("swap.endpoint.created_uuid", "==> Endpoint uuid: {uuid}"),
    ("swap.failed", "Gateway swap failed: {error}"),
    ("summary.done", "Swap complete: {count} port(s) moved from {source} to {target} ({product})."),
    (
        "summary.dry_run",
        "Dry run complete: {count} port(s) would move from {source} to {target} ({product}). \
         Nothing was created.",
    ),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("output.json_failed", "Failed to render the JSON report: {error}"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
];

/// Catalan catalog entries.
const CATALOG_CA: &[(&str, &str)] = &[
    ("main.version", "gateway-swap {version}"),
    ("main.banner", "Canvi de passarel·la"),
    ("prompt.intro", "Introduïu el nom de host de la VG"),
    ("prompt.domain", "VG amb domini / FQDN: "),
    ("prompt.domain_empty", "No s'ha introduït cap nom de domini de passarel·la."),
    ("prompt.read_failed", "No s'ha pogut llegir el nom de domini de la passarel·la: {error}"),
    ("step.continue", "Premeu Retorn per continuar..."),
    ("step.unconfirmed", "L'entrada s'ha tancat abans de prémer Retorn; no s'ha creat res més."),
    ("step.read_failed", "No s'ha pogut llegir la confirmació del pas: {error}"),
    ("dotenv.load_failed", "No s'ha pogut carregar el fitxer .env: {error}"),
    ("logging.init_failed", "No s'ha pogut inicialitzar el registre: {error}"),
    ("config.load_failed", "Error de configuració: {error}"),
    ("client.init_failed", "No s'ha pogut crear el client AXL: {error}"),
    ("swap.gateway.resolved", "S'ha trobat la passarel·la {domain} ({product})"),
    (
        "swap.gateway.lookup_failed",
        "Comproveu el nom de la passarel·la a CUCM.\n\ngetGateway: {error}",
    ),
    ("swap.gateway.details_header", "Detalls de la PASSAREL·LA"),
    ("swap.gateway.detail.type", "tipus: {value}"),
    ("swap.gateway.detail.group", "CMG: {value}"),
    ("swap.gateway.detail.description", "descripció: {value}"),
    ("swap.gateway.detail.uuid", "uuid: {value}"),
    ("swap.ports.count", "S'han trobat {count} port(s) a {domain}"),
    ("swap.ports.none", "No s'ha trobat cap port a {domain}; només es crearà la passarel·la."),
    ("swap.gateway.planned", "Passarel·la de substitució: {domain} ({product})"),
    ("swap.gateway.created", "Passarel·la afegida correctament"),
    ("swap.gateway.created_uuid", "==> uuid de la passarel·la: {uuid}"),
    ("swap.endpoint.details_header", "Detalls específics del port:"),
    ("swap.endpoint.detail.slot", "ranura: {value}"),
    ("swap.endpoint.detail.port", "port: {value}"),
    ("swap.endpoint.detail.name", "dispositiu: {value}"),
    ("swap.endpoint.detail.dn", "dn: {value}"),
    ("swap.endpoint.detail.caller_id", "identificador de trucada: {value}"),
    ("swap.endpoint.detail.mask", "màscara: {value}"),
    ("swap.endpoint.detail.pool", "grup: {value}"),
    ("swap.endpoint.detail.location", "ubicació: {value}"),
    ("swap.endpoint.detail.partition", "partició: {value}"),
    ("swap.endpoint.detail.none", "(cap)"),
    ("swap.endpoint.would_add", "S'afegiria {name} per al DN {dn}"),
    ("swap.endpoint.created", "S'ha afegit {name} per al DN {dn}"),
    ("swap.endpoint.created_uuid", "==> uuid del punt final: {uuid}"),
    ("swap.failed", "El canvi de passarel·la ha fallat: {error}"),
    (
        "summary.done",
        "Canvi completat: {count} port(s) traslladats de {source} a {target} ({product}).",
    ),
    (
        "summary.dry_run",
        "Simulació completada: {count} port(s) es traslladarien de {source} a {target} \
         ({product}). No s'ha creat res.",
    ),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "sortida"),
    ("output.write_failed", "No s'ha pogut escriure a {stream}: {error}"),
    ("output.json_failed", "No s'ha pogut generar l'informe JSON: {error}"),
    ("i18n.lang.invalid_env", "Valor no vàlid per a {env}: {value}. S'esperava 'en' o 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Nota: la sortida que no és en anglès està traduïda automàticament i pot ser inexacta.",
    ),
];

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_CA_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Locale::Ca => CATALOG_CA_MAP.get_or_init(|| CATALOG_CA.iter().copied().collect()),
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let locale = current_locale();
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}

// ============================================================================
// SECTION: Tests
// ============================================================================
