//! cssel CLI binary entry point.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use cssel::cli::{run_explain, ExplainSettings};
use cssel::config::{Config, OutputFormat};
use cssel::error::{CsselError, OutputErrorCode};
use cssel::output::{emit_response, ErrorResponse};

// ============================================================================
// CLI Definition
// ============================================================================

/// Explain CSS selector trees.
///
/// Reads a selector tree as JSON and prints an annotated explanation.
/// Errors are reported as JSON on stdout with a non-zero exit code.
#[derive(Parser, Debug)]
#[command(name = "cssel", version, about = "Explain CSS selector trees")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

/// Global arguments shared by all subcommands.
#[derive(Parser, Debug)]
struct GlobalArgs {
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level for tracing output.
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a selector tree as an explanation document.
    Explain {
        /// JSON selector tree file; reads stdin when omitted or `-`.
        input: Option<PathBuf>,

        /// Output format (default from config, else xml).
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Indent XML output by this many spaces.
        #[arg(long)]
        indent: Option<usize>,

        /// Omit the XML declaration.
        #[arg(long)]
        no_declaration: bool,
    },
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.global.log_level);

    match execute(cli) {
        Ok(output) => {
            let mut stdout = io::stdout();
            if stdout.write_all(output.as_bytes()).is_err() || stdout.flush().is_err() {
                return ExitCode::from(OutputErrorCode::InternalError.code());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!(error = %err, "command failed");
            let error_code = OutputErrorCode::from(&err);
            let response = ErrorResponse::from_error(&err);

            // Errors go to stdout as JSON so callers parse one stream.
            let _ = emit_response(&response, &mut io::stdout());
            let _ = io::stdout().flush();

            ExitCode::from(error_code.code())
        }
    }
}

/// Initialize tracing subscriber.
fn init_tracing(level: LogLevel) {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Execute the CLI command.
fn execute(cli: Cli) -> Result<String, CsselError> {
    let config = Config::load_or_default(cli.global.config.as_deref())?;
    match cli.command {
        Command::Explain {
            input,
            format,
            indent,
            no_declaration,
        } => {
            let settings =
                ExplainSettings::resolve(&config.explain, format, indent, no_declaration);
            run_explain(input.as_deref(), &settings)
        }
    }
}
