//! ACMG Gauge CLI
//!
//! Entry point for the `gauge` binary:
//! - `classify`: worst-case gauge for one list of labels
//! - `batch`: per-group gauges plus the overall worst case
//! - `table`, `schema`, `config show`, `version`: introspection
//!
//! The exit code of `classify` and `batch` carries the gauge color
//! (0 green, 1 yellow, 2 red); see `exit_codes`.

use clap::{Args, Parser, Subcommand};
use gauge_common::error::format_error_human;
use gauge_common::{Error, OutputFormat, Result, StructuredError, SCHEMA_VERSION};
use gauge_core::config::{load_config, ConfigOptions, ResolvedConfig};
use gauge_core::exit_codes::ExitCode;
use gauge_core::input::{decode_labels, groups_from_json, parse_json, read_source, InputKind};
use gauge_core::logging::{
    event_names, generate_run_id, init_logging, LogConfig, LogFormat, LogLevel,
};
use gauge_core::output::{render_gauge, render_grouped, render_table};
use gauge_core::schema::{available_schemas, schema_for_type};
use gauge_core::{aggregate, aggregate_groups};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Worst-case ACMG/AMP pathogenicity gauge
#[derive(Parser)]
#[command(name = "gauge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Config file (overrides GAUGE_CONFIG and the XDG config file)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format (defaults to the config file value, then json)
    #[arg(long, short = 'f', global = true, env = "GAUGE_FORMAT")]
    format: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Log format on stderr
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate labels into one worst-case gauge
    Classify(ClassifyArgs),
    /// Aggregate named groups of labels from a JSON document
    Batch(BatchArgs),
    /// Print the label severity table
    Table,
    /// Print JSON Schema for output types
    Schema(SchemaArgs),
    /// Inspect configuration
    Config(ConfigArgs),
    /// Print version information
    Version,
}

#[derive(Args, Debug)]
struct ClassifyArgs {
    /// Labels to aggregate (e.g. "benign" "likely pathogenic")
    labels: Vec<String>,

    /// Read labels from a file instead ("-" for stdin)
    #[arg(long, short = 'i', conflicts_with = "labels")]
    input: Option<PathBuf>,

    /// Encoding of --input
    #[arg(long, value_enum, default_value_t = InputKind::Json)]
    input_kind: InputKind,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// JSON document with named groups ("-" for stdin)
    #[arg(long, short = 'i')]
    input: PathBuf,
}

#[derive(Args, Debug)]
struct SchemaArgs {
    /// Type name (see --list)
    name: Option<String>,

    /// List available schema types
    #[arg(long, conflicts_with = "name")]
    list: bool,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the resolved configuration and where it came from
    Show,
}

fn main() -> std::process::ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            let code = if err.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Clean
            };
            return code.into();
        }
    };

    let cli_level = if cli.global.quiet {
        Some(LogLevel::Error)
    } else {
        match cli.global.verbose {
            0 => None,
            1 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    };

    let resolved = match load_config(&ConfigOptions::from_env(cli.global.config.clone())) {
        Ok(resolved) => resolved,
        Err(err) => {
            init_logging(&LogConfig::from_env(cli_level, cli.global.log_format));
            let err = Error::from(err);
            return report_error(&err, cli.global.format.unwrap_or_default()).into();
        }
    };

    let log_config = resolved
        .config
        .log
        .clone()
        .with_overrides(cli_level, cli.global.log_format);
    init_logging(&log_config);

    let run_id = generate_run_id();
    let config_path = resolved.path.as_ref().map(|p| p.display().to_string());
    tracing::debug!(
        event = event_names::CONFIG_RESOLVED,
        %run_id,
        source = %resolved.source,
        path = config_path.as_deref(),
        "configuration resolved"
    );

    let format = cli.global.format.unwrap_or(resolved.config.output.format);

    let outcome = match &cli.command {
        Commands::Classify(args) => run_classify(format, args, &run_id),
        Commands::Batch(args) => run_batch(format, args, &run_id),
        Commands::Table => run_table(format),
        Commands::Schema(args) => run_schema(format, args),
        Commands::Config(args) => match args.command {
            ConfigCommands::Show => run_config_show(format, &resolved),
        },
        Commands::Version => run_version(format),
    };

    match outcome {
        Ok(code) => code.into(),
        Err(err) => {
            tracing::error!(
                event = event_names::COMMAND_FAILED,
                %run_id,
                code = err.code(),
                category = %err.category(),
                "command failed"
            );
            report_error(&err, format).into()
        }
    }
}

/// Print an error on stderr in the shape the output format implies.
fn report_error(err: &Error, format: OutputFormat) -> ExitCode {
    let code = ExitCode::from_error(err);
    if format.is_machine() {
        let structured = StructuredError::from(err)
            .with_context("exit_code", code.as_i32())
            .with_context("exit_code_name", code.code_name());
        eprintln!("{}", structured.to_json());
    } else {
        eprintln!("{}", format_error_human(err, std::io::stderr().is_terminal()));
    }
    code
}

fn run_classify(format: OutputFormat, args: &ClassifyArgs, run_id: &str) -> Result<ExitCode> {
    let labels: Vec<Option<String>> = match &args.input {
        Some(path) => {
            let text = read_source(path)?;
            let labels = decode_labels(&text, args.input_kind)?;
            tracing::debug!(
                event = event_names::INPUT_LOADED,
                %run_id,
                path = %path.display(),
                labels = labels.len(),
                "input loaded"
            );
            labels
        }
        None => args.labels.iter().cloned().map(Some).collect(),
    };

    tracing::debug!(
        event = event_names::CLASSIFY_STARTED,
        %run_id,
        labels = labels.len(),
        "classifying labels"
    );

    let gauge = aggregate(labels.iter().map(Option::as_deref));

    tracing::info!(
        event = event_names::CLASSIFY_COMPLETED,
        %run_id,
        color = %gauge.color,
        max_severity = gauge.max_severity,
        unknown = gauge.unknown_labels.len(),
        "classification complete"
    );

    println!("{}", render_gauge(&gauge, labels.len(), format)?);
    Ok(ExitCode::from_color(gauge.color))
}

fn run_batch(format: OutputFormat, args: &BatchArgs, run_id: &str) -> Result<ExitCode> {
    let text = read_source(&args.input)?;
    let groups = groups_from_json(&parse_json(&text)?)?;
    let grouped = aggregate_groups(&groups);

    tracing::info!(
        event = event_names::BATCH_COMPLETED,
        %run_id,
        groups = grouped.groups.len(),
        color = %grouped.overall.color,
        "batch complete"
    );

    println!("{}", render_grouped(&grouped, format)?);
    Ok(ExitCode::from_color(grouped.overall.color))
}

fn run_table(format: OutputFormat) -> Result<ExitCode> {
    println!("{}", render_table(format)?);
    Ok(ExitCode::Clean)
}

fn run_schema(format: OutputFormat, args: &SchemaArgs) -> Result<ExitCode> {
    if let Some(name) = args.name.as_deref() {
        let schema = schema_for_type(name)?;
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(ExitCode::Clean);
    }

    let entries: Vec<serde_json::Value> = available_schemas()
        .into_iter()
        .map(|(name, description)| serde_json::json!({ "name": name, "description": description }))
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Jsonl => {
            for entry in &entries {
                println!("{}", serde_json::to_string(entry)?);
            }
        }
        _ => {
            for (name, description) in available_schemas() {
                println!("{:<14} {}", name, description);
            }
        }
    }
    Ok(ExitCode::Clean)
}

fn run_config_show(format: OutputFormat, resolved: &ResolvedConfig) -> Result<ExitCode> {
    if format.is_machine() {
        println!("{}", serde_json::to_string_pretty(resolved)?);
    } else {
        let body = toml::to_string_pretty(&resolved.config)
            .map_err(|e| Error::Config(e.to_string()))?;
        let path = resolved
            .path
            .as_ref()
            .map_or_else(|| "(none)".to_string(), |p| p.display().to_string());
        println!("# source: {}\n# path: {}\n{}", resolved.source, path, body);
    }
    Ok(ExitCode::Clean)
}

fn run_version(format: OutputFormat) -> Result<ExitCode> {
    let version = env!("CARGO_PKG_VERSION");
    if format.is_machine() {
        println!(
            "{}",
            serde_json::to_string(&serde_json::json!({
                "name": "gauge",
                "version": version,
                "schema_version": SCHEMA_VERSION,
            }))?
        );
    } else {
        println!("gauge {}", version);
    }
    Ok(ExitCode::Clean)
}
