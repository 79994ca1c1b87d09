//! # Zenith Scan CLI
//!
//! Checks files of Zenith scan-criteria tuples: `check` parses and reports the
//! resulting tree, `roundtrip` additionally serializes it back and verifies the
//! output re-parses to the same tree.

use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use zenith_scan::config::runtime::{self, env_vars, RuntimeConfig};
use zenith_scan::logging::{self, codes, InputContext, LogLevel};
use zenith_scan::{from_boolean_node, parse_boolean, BooleanNode};
use zenith_scan::{log_error, log_info, log_success};

/// Check Zenith scan-criteria tuples
#[derive(Parser, Debug)]
#[command(name = "zenith-scan", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Print one JSON report per input instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse each tuple and print the node with its parse trail
    Check(InputArgs),
    /// Parse, serialize and re-parse each tuple
    Roundtrip(InputArgs),
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// JSON file holding one boolean tuple
    pub file: PathBuf,

    /// Treat the file as an array of boolean tuples
    #[arg(long)]
    pub batch: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} is not valid JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{} is not a JSON array of tuples", path.display())]
    NotABatch { path: PathBuf },

    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

impl CliError {
    pub fn code(&self) -> logging::Code {
        match self {
            Self::Read { .. } => codes::consumer::INPUT_READ_ERROR,
            Self::Json { .. } | Self::NotABatch { .. } => codes::consumer::INPUT_JSON_ERROR,
            Self::Output(_) => codes::consumer::OUTPUT_WRITE_ERROR,
        }
    }
}

impl Cli {
    /// Level for the crate's logging service
    pub fn log_level(&self) -> LogLevel {
        match self.verbose {
            0 => LogLevel::Warning,
            1 => LogLevel::Info,
            _ => LogLevel::Debug,
        }
    }

    /// Runtime preferences from `ZENITH_*` variables with the command line applied
    pub fn runtime_config(&self) -> RuntimeConfig {
        self.apply_to(RuntimeConfig::default(), |name| std::env::var_os(name).is_some())
    }

    /// Unless the environment says otherwise, events go to the `log` facade at the
    /// `-v` level; an explicit `ZENITH_LOGGING_MIN_LEVEL` is only ever raised by `-v`.
    pub fn apply_to(
        &self,
        mut config: RuntimeConfig,
        is_set: impl Fn(&str) -> bool,
    ) -> RuntimeConfig {
        let requested = runtime::LogLevel::from_events_log_level(self.log_level());
        let logging = &mut config.logging;

        if !is_set(env_vars::LOGGING_USE_FACADE) {
            logging.use_log_facade = true;
        }
        logging.min_log_level = if is_set(env_vars::LOGGING_MIN_LEVEL) {
            logging.min_log_level.max(requested)
        } else {
            requested
        };
        config
    }

    pub fn input(&self) -> &InputArgs {
        match &self.command {
            Command::Check(input) | Command::Roundtrip(input) => input,
        }
    }
}

/// Outcome of one input tuple
#[derive(Debug, Clone, Serialize)]
pub struct InputReport {
    pub index: usize,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<BooleanNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wire: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_trip: Option<bool>,
    pub trail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn exit_code(&self) -> i32 {
        if self.failed == 0 {
            0
        } else {
            1
        }
    }
}

/// Read the input file; a batch file must be a JSON array
pub fn load_inputs(path: &Path, batch: bool) -> Result<Vec<Value>, CliError> {
    let source = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&source).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if !batch {
        return Ok(vec![value]);
    }
    match value {
        Value::Array(tuples) => Ok(tuples),
        _ => Err(CliError::NotABatch {
            path: path.to_path_buf(),
        }),
    }
}

pub fn check(index: usize, value: &Value) -> InputReport {
    match parse_boolean(value) {
        Ok(parsed) => InputReport {
            index,
            ok: true,
            trail: parsed.progress.render_trail(),
            node: Some(parsed.node),
            wire: None,
            round_trip: None,
            error: None,
        },
        Err(failure) => InputReport {
            index,
            ok: false,
            trail: failure.progress.render_trail(),
            node: None,
            wire: None,
            round_trip: None,
            error: Some(failure.enhanced_message()),
        },
    }
}

/// Check, then serialize and compare the re-parsed tree
pub fn roundtrip(index: usize, value: &Value) -> InputReport {
    let mut report = check(index, value);
    let Some(node) = report.node.clone() else {
        return report;
    };

    let wire = from_boolean_node(&node);
    let same = match parse_boolean(&wire) {
        Ok(reparsed) => reparsed.node == node,
        Err(failure) => {
            report.error = Some(failure.enhanced_message());
            false
        }
    };

    if same {
        log_success!(codes::success::ROUND_TRIP_VERIFIED, "Round trip verified", "index" => index);
    } else {
        log_error!(codes::consumer::ROUND_TRIP_MISMATCH, "Round trip changed the tree", "index" => index);
    }

    report.ok = same;
    report.round_trip = Some(same);
    report.wire = Some(wire);
    report
}

/// Run the selected command, writing one report per input to `out`
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<RunSummary, CliError> {
    let input = cli.input();
    let source = input.file.display().to_string();
    log_info!("Loading criteria", "file" => source, "batch" => input.batch);

    let values = load_inputs(&input.file, input.batch).map_err(|error| {
        log_error!(error.code(), &error.to_string());
        error
    })?;

    let mut summary = RunSummary::default();
    for (index, value) in values.iter().enumerate() {
        let context = InputContext::new(source.clone(), input.batch.then_some(index));
        let report = logging::with_input_context(context, || match &cli.command {
            Command::Check(_) => check(index, value),
            Command::Roundtrip(_) => roundtrip(index, value),
        });

        summary.total += 1;
        if !report.ok {
            summary.failed += 1;
        }
        write_report(out, &report, cli.json)?;
    }

    if !cli.json {
        writeln!(out, "{} of {} inputs passed", summary.total - summary.failed, summary.total)?;
    }
    Ok(summary)
}

fn write_report(out: &mut impl Write, report: &InputReport, json: bool) -> Result<(), CliError> {
    if json {
        let line = serde_json::to_string(report).map_err(|source| CliError::Json {
            path: PathBuf::from("<report>"),
            source,
        })?;
        writeln!(out, "{}", line)?;
        return Ok(());
    }

    let status = if report.ok { "OK" } else { "FAILED" };
    writeln!(out, "[{}] input {}", status, report.index)?;
    if let Some(node) = &report.node {
        writeln!(out, "  node: {:?}", node.type_id())?;
    }
    if let Some(wire) = &report.wire {
        writeln!(out, "  wire: {}", wire)?;
    }
    if let Some(error) = &report.error {
        for line in error.lines() {
            writeln!(out, "  {}", line)?;
        }
    } else if !report.trail.is_empty() {
        writeln!(out, "  trail:")?;
        for line in report.trail.lines() {
            writeln!(out, "    {}", line)?;
        }
    }
    Ok(())
}
