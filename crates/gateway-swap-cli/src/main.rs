// crates/gateway-swap-cli/src/main.rs
// ============================================================================
// Module: Gateway Swap CLI Entry Point
// Description: Command-line driver for like-for-like voice gateway swaps.
// Purpose: Resolve settings, prompt for the source gateway, and run the swap.
// Dependencies: clap, dotenvy, gateway-swap-axl, gateway-swap-core, serde_json, tracing
// ============================================================================

//! ## Overview
//! `gateway-swap` reads an existing analog voice gateway from the call-control
//! publisher over AXL, creates the replacement gateway model, and recreates
//! every port on it with the same directory number. Progress is printed as
//! localized text; `--output json` prints the final report as JSON instead.
//!
//! Exit codes: `0` on success (including a gateway with no ports), `1` on any
//! failure. Nothing is rolled back when a step fails part way.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::BufRead;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Parser;
use clap::ValueEnum;
use gateway_swap_axl::AxlClient;
use gateway_swap_cli::config::Overrides;
use gateway_swap_cli::config::load_settings;
use gateway_swap_cli::i18n::Locale;
use gateway_swap_cli::i18n::set_locale;
use gateway_swap_cli::logging;
use gateway_swap_cli::logging::Verbosity;
use gateway_swap_cli::t;
use gateway_swap_core::ApiError;
use gateway_swap_core::ApiOperation;
use gateway_swap_core::GatewaySwap;
use gateway_swap_core::SwapError;
use gateway_swap_core::SwapEvent;
use gateway_swap_core::SwapInterrupted;
use gateway_swap_core::SwapObserver;
use gateway_swap_core::SwapOptions;
use gateway_swap_core::SwapReport;
use thiserror::Error;
use tracing::debug;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable selecting the output language.
const LANG_ENV: &str = "GATEWAY_SWAP_LANG";

/// Environment variable holding the base log filter.
const RUST_LOG_ENV: &str = "RUST_LOG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "gateway-swap", disable_help_subcommand = true, disable_version_flag = true)]
#[allow(clippy::struct_excessive_bools, reason = "Each flag maps to one CLI switch.")]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue)]
    show_version: bool,
    /// Preferred output language (overrides `GATEWAY_SWAP_LANG`).
    #[arg(long, value_enum, value_name = "LANG")]
    lang: Option<LangArg>,
    /// Source gateway domain name; prompted for when absent.
    #[arg(long, value_name = "FQDN")]
    domain: Option<String>,
    /// Config file path (overrides `GATEWAY_SWAP_CONFIG`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// AXL WSDL used to discover the API version.
    #[arg(long, value_name = "PATH")]
    schema: Option<PathBuf>,
    /// AXL API version (`major.minor`); skips schema discovery.
    #[arg(long, value_name = "VERSION")]
    api_version: Option<String>,
    /// Full AXL service URL; overrides the host and port settings.
    #[arg(long, value_name = "URL")]
    axl_url: Option<String>,
    /// Read and map everything, but create nothing.
    #[arg(long, action = ArgAction::SetTrue)]
    dry_run: bool,
    /// Print gateway and port details, and debug diagnostics.
    #[arg(long, action = ArgAction::SetTrue)]
    debug: bool,
    /// Like `--debug`, and also log full SOAP envelopes.
    #[arg(long, action = ArgAction::SetTrue)]
    verbose: bool,
    /// Pause for Enter before each creation call.
    #[arg(long, action = ArgAction::SetTrue)]
    step: bool,
    /// Final report format.
    #[arg(long, value_enum, value_name = "FORMAT", default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

impl Cli {
    /// Returns the settings supplied as flags.
    fn overrides(&self) -> Overrides {
        Overrides {
            config: self.config.clone(),
            schema: self.schema.clone(),
            api_version: self.api_version.clone(),
            axl_url: self.axl_url.clone(),
        }
    }
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

/// Final report formats.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Localized progress and summary lines.
    Text,
    /// Pretty-printed JSON report on stdout; progress moves to stderr.
    Json,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing failures.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Parses arguments, prepares the environment, and runs the swap.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    load_dotenv()?;

    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let rust_log = std::env::var(RUST_LOG_ENV).ok();
    logging::init(Verbosity::from_flags(cli.debug, cli.verbose), rust_log.as_deref())
        .map_err(|err| CliError::new(t!("logging.init_failed", error = err)))?;

    command_swap(cli)
}

/// Loads `.env` from the working directory; existing variables win.
fn load_dotenv() -> CliResult<()> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(CliError::new(t!("dotenv.load_failed", error = err))),
    }
}

// ============================================================================
// SECTION: Swap Command
// ============================================================================

/// Resolves settings and the source domain, then runs the swap.
fn command_swap(cli: Cli) -> CliResult<ExitCode> {
    let (mut output, stream): (Box<dyn Write>, &'static str) = match cli.output {
        OutputFormat::Text => (Box::new(std::io::stdout()), "stdout"),
        OutputFormat::Json => (Box::new(std::io::stderr()), "stderr"),
    };
    if cli.output == OutputFormat::Text {
        writeln!(output, "{}", t!("main.banner"))
            .map_err(|err| CliError::new(output_error(stream, &err)))?;
    }

    let settings = load_settings(&cli.overrides(), |name| std::env::var(name).ok())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    debug!(
        endpoint = %settings.client.endpoint,
        version = %settings.client.version,
        verify_tls = settings.client.verify_tls,
        "resolved settings"
    );

    let mut input = std::io::stdin().lock();
    let domain = match cli.domain {
        Some(domain) => domain,
        None => prompt_domain(&mut input, &mut output, stream)?,
    };

    let client = AxlClient::new(settings.client)
        .map_err(|err| CliError::new(t!("client.init_failed", error = err)))?;
    let options = SwapOptions {
        domain_prefix: settings.domain_prefix,
        vendor_config: settings.vendor_config,
        dry_run: cli.dry_run,
    };
    let mode = ObserverMode {
        details: cli.debug || cli.verbose,
        step: cli.step,
        dry_run: cli.dry_run,
    };
    let mut observer = CliObserver::new(input, output, stream, mode);
    let report = GatewaySwap::new(&client, options)
        .run(&domain, &mut observer)
        .map_err(|err| swap_failure(&err))?;
    observer.finish()?;
    render_report(&report, cli.output)?;
    Ok(ExitCode::SUCCESS)
}

/// Asks once for the source gateway domain name.
fn prompt_domain<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    stream: &str,
) -> CliResult<String> {
    writeln!(output, "{}", t!("prompt.intro"))
        .and_then(|()| write!(output, "{}", t!("prompt.domain")))
        .and_then(|()| output.flush())
        .map_err(|err| CliError::new(output_error(stream, &err)))?;
    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|err| CliError::new(t!("prompt.read_failed", error = err)))?;
    let domain = line.trim();
    if domain.is_empty() {
        return Err(CliError::new(t!("prompt.domain_empty")));
    }
    Ok(domain.to_string())
}

/// Maps a pipeline failure to its operator message.
fn swap_failure(err: &SwapError) -> CliError {
    match err {
        SwapError::Api {
            operation: ApiOperation::GetGateway,
            source: source @ ApiError::Fault {
                ..
            },
        } => CliError::new(t!("swap.gateway.lookup_failed", error = source)),
        SwapError::Interrupted(stop) => CliError::new(stop.reason.clone()),
        _ => CliError::new(t!("swap.failed", error = err)),
    }
}

/// Prints the final report in the selected format.
fn render_report(report: &SwapReport, format: OutputFormat) -> CliResult<()> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|err| CliError::new(t!("output.json_failed", error = err)))?,
        OutputFormat::Text if report.dry_run => t!(
            "summary.dry_run",
            count = report.endpoints.len(),
            source = report.source_domain,
            target = report.target_domain,
            product = report.target_product
        ),
        OutputFormat::Text => t!(
            "summary.done",
            count = report.endpoints.len(),
            source = report.source_domain,
            target = report.target_domain,
            product = report.target_product
        ),
    };
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))
}

// ============================================================================
// SECTION: Progress Rendering
// ============================================================================

/// What the progress observer prints beyond the basic progress lines.
#[derive(Debug, Clone, Copy, Default)]
struct ObserverMode {
    /// Print gateway and port details.
    details: bool,
    /// Pause for Enter before each creation call.
    step: bool,
    /// Announce planned ports instead of created ones.
    dry_run: bool,
}

/// Reasons the progress observer stops a swap.
#[derive(Debug)]
enum ObserverStop {
    /// Writing progress failed.
    Write(std::io::Error),
    /// Reading the step confirmation failed.
    Read(std::io::Error),
    /// Input closed before the operator pressed Enter.
    Unconfirmed,
}

impl From<std::io::Error> for ObserverStop {
    fn from(err: std::io::Error) -> Self {
        Self::Write(err)
    }
}

/// Renders swap events as localized progress lines.
///
/// # Invariants
/// - Any write failure, and any step pause that does not read a line,
///   stops the swap before the next remote call.
struct CliObserver<R, W> {
    /// Source of step confirmations.
    input: R,
    /// Progress destination.
    output: W,
    /// Stream label used in write errors.
    stream: &'static str,
    /// Rendering options.
    mode: ObserverMode,
}

impl<R: BufRead, W: Write> CliObserver<R, W> {
    /// Creates an observer writing to `output`.
    const fn new(input: R, output: W, stream: &'static str, mode: ObserverMode) -> Self {
        Self {
            input,
            output,
            stream,
            mode,
        }
    }

    /// Flushes progress output after a successful swap.
    fn finish(mut self) -> CliResult<()> {
        self.output.flush().map_err(|err| CliError::new(output_error(self.stream, &err)))
    }

    /// Writes one line.
    fn line(&mut self, message: &str) -> std::io::Result<()> {
        writeln!(self.output, "{message}")
    }

    /// Waits for Enter when stepping; closed input stops the swap.
    fn pause(&mut self) -> Result<(), ObserverStop> {
        if !self.mode.step {
            return Ok(());
        }
        write!(self.output, "{}", t!("step.continue"))?;
        self.output.flush()?;
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => Err(ObserverStop::Unconfirmed),
            Ok(_) => Ok(()),
            Err(err) => Err(ObserverStop::Read(err)),
        }
    }

    /// Returns the operator message for a stop reason.
    fn stop_message(&self, stop: &ObserverStop) -> String {
        match stop {
            ObserverStop::Write(err) => output_error(self.stream, err),
            ObserverStop::Read(err) => t!("step.read_failed", error = err),
            ObserverStop::Unconfirmed => t!("step.unconfirmed"),
        }
    }

    /// Renders one event.
    fn render(&mut self, event: &SwapEvent<'_>) -> Result<(), ObserverStop> {
        match event {
            SwapEvent::GatewayResolved {
                gateway,
            } => {
                self.line(&t!(
                    "swap.gateway.resolved",
                    domain = gateway.domain_name,
                    product = gateway.product
                ))?;
                if self.mode.details {
                    self.line(&t!("swap.gateway.details_header"))?;
                    self.line(&t!("swap.gateway.detail.type", value = gateway.product))?;
                    self.line(&t!(
                        "swap.gateway.detail.group",
                        value = or_none(gateway.call_manager_group.as_deref())
                    ))?;
                    self.line(&t!(
                        "swap.gateway.detail.description",
                        value = or_none(gateway.description.as_deref())
                    ))?;
                    self.line(&t!("swap.gateway.detail.uuid", value = gateway.uuid))?;
                }
            }
            SwapEvent::PortsEnumerated {
                gateway,
                count,
            } => {
                if *count == 0 {
                    self.line(&t!("swap.ports.none", domain = gateway.domain_name))?;
                } else {
                    self.line(&t!(
                        "swap.ports.count",
                        count = count,
                        domain = gateway.domain_name
                    ))?;
                }
            }
            SwapEvent::GatewayPlanned {
                gateway,
            } => {
                self.line(&t!(
                    "swap.gateway.planned",
                    domain = gateway.domain_name,
                    product = gateway.product
                ))?;
                if !self.mode.dry_run {
                    self.pause()?;
                }
            }
            SwapEvent::GatewayCreated {
                uuid, ..
            } => {
                self.line(&t!("swap.gateway.created"))?;
                if self.mode.details {
                    self.line(&t!("swap.gateway.created_uuid", uuid = uuid))?;
                }
            }
            SwapEvent::EndpointPlanned {
                source,
                target,
            } => {
                if self.mode.details {
                    let line = &target.line;
                    self.line(&t!("swap.endpoint.details_header"))?;
                    self.line(&t!("swap.endpoint.detail.slot", value = source.subunit))?;
                    self.line(&t!("swap.endpoint.detail.port", value = source.index))?;
                    self.line(&t!("swap.endpoint.detail.name", value = source.name))?;
                    self.line(&t!("swap.endpoint.detail.dn", value = line.pattern))?;
                    self.line(&t!(
                        "swap.endpoint.detail.caller_id",
                        value = or_none(line.display.as_deref())
                    ))?;
                    self.line(&t!(
                        "swap.endpoint.detail.mask",
                        value = or_none(line.e164_mask.as_deref())
                    ))?;
                    self.line(&t!(
                        "swap.endpoint.detail.pool",
                        value = or_none(target.device_pool.as_deref())
                    ))?;
                    self.line(&t!(
                        "swap.endpoint.detail.location",
                        value = or_none(target.location.as_deref())
                    ))?;
                    self.line(&t!(
                        "swap.endpoint.detail.partition",
                        value = or_none(line.partition.as_deref())
                    ))?;
                }
                if self.mode.dry_run {
                    self.line(&t!(
                        "swap.endpoint.would_add",
                        name = target.name,
                        dn = target.line.pattern
                    ))?;
                } else {
                    self.pause()?;
                }
            }
            SwapEvent::EndpointCreated {
                target,
                uuid,
            } => {
                self.line(&t!(
                    "swap.endpoint.created",
                    name = target.name,
                    dn = target.line.pattern
                ))?;
                if self.mode.details {
                    self.line(&t!("swap.endpoint.created_uuid", uuid = uuid))?;
                }
            }
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> SwapObserver for CliObserver<R, W> {
    fn on_event(&mut self, event: &SwapEvent<'_>) -> Result<(), SwapInterrupted> {
        self.render(event).map_err(|stop| SwapInterrupted::new(self.stop_message(&stop)))
    }
}

/// Returns the value or the localized placeholder for an absent value.
fn or_none(value: Option<&str>) -> String {
    value.map_or_else(|| t!("swap.endpoint.detail.none"), str::to_string)
}

// ============================================================================
// SECTION: Locale
// ============================================================================

/// Converts CLI language selections into locales.
impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

/// Picks the locale from the flag, then the environment, then English.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
