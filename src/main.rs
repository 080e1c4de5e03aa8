//! junit-gate CLI
//!
//! Entry point for the `junit-gate` command-line tool.

use clap::{Parser, Subcommand};
use junit_gate::config::env::parse_threshold;
use junit_gate::export::human_summary;
use junit_gate::{logging, CountMode, EffectiveConfig, EnvVars, ExitCode, GatePipeline};
use serde_json::{json, Map, Value};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "junit-gate")]
#[command(about = "Fail a CI stage when the JUnit test failure rate exceeds a threshold", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to a TOML config file (default: $PLUGIN_CONFIG)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Glob pattern for report files (default: **/*.xml)
    #[arg(long, short = 'p', global = true)]
    pattern: Option<String>,

    /// Counting mode: aggregate or individual
    #[arg(long, global = true)]
    count_mode: Option<CountMode>,

    /// Maximum tolerated failure rate in percent
    #[arg(long, short = 't', global = true)]
    threshold: Option<String>,

    /// Path of the KEY=VALUE result artifact
    #[arg(long, short = 'o', global = true)]
    output: Option<PathBuf>,

    /// Also write a JSON run summary to this path
    #[arg(long, global = true)]
    summary_json: Option<PathBuf>,

    /// Enable verbose diagnostic logging
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    /// Do not set result variables in the process environment
    #[arg(long, global = true)]
    no_process_env: bool,

    /// Exit non-zero when results cannot be exported
    #[arg(long, global = true)]
    fail_on_export_error: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the gate over discovered reports (default)
    Check,

    /// Print the effective configuration as JSON
    Config,
}

fn main() {
    let cli = Cli::parse();

    let overrides = match cli_overrides(&cli) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(ExitCode::Config.as_i32());
        }
    };

    let env = EnvVars::from_process();
    let effective = match EffectiveConfig::build(cli.config.as_deref(), &env, Some(overrides)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(ExitCode::Config.as_i32());
        }
    };

    logging::init(effective.config.debug);

    match cli.command.unwrap_or(Commands::Check) {
        Commands::Check => run_check(effective),
        Commands::Config => run_config(&effective),
    }
}

fn run_check(effective: EffectiveConfig) {
    tracing::debug!(sources = effective.sources.len(), "configuration resolved");
    let fail_on_export_error = effective.config.export.fail_on_error;

    let outcome = match GatePipeline::new(effective.config).run() {
        Ok(o) => o,
        Err(e) => {
            tracing::error!(error = %e, "gate could not run");
            process::exit(ExitCode::Config.as_i32());
        }
    };

    println!("{}", human_summary(&outcome.stats, &outcome.gate));
    process::exit(outcome.exit_code(fail_on_export_error).as_i32());
}

fn run_config(effective: &EffectiveConfig) {
    match effective.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(ExitCode::Config.as_i32());
        }
    }
}

/// Build the CLI layer from flags that were actually given
fn cli_overrides(cli: &Cli) -> Result<Value, junit_gate::ConfigError> {
    let mut root = Map::new();
    let mut export = Map::new();

    if let Some(ref pattern) = cli.pattern {
        root.insert("pattern".to_string(), json!(pattern));
    }
    if let Some(mode) = cli.count_mode {
        root.insert("count_mode".to_string(), json!(mode));
    }
    if let Some(ref raw) = cli.threshold {
        root.insert("threshold".to_string(), parse_threshold("--threshold", raw)?);
    }
    if cli.debug {
        root.insert("debug".to_string(), json!(true));
    }
    if let Some(ref path) = cli.output {
        export.insert("output_path".to_string(), json!(path.to_string_lossy()));
    }
    if let Some(ref path) = cli.summary_json {
        export.insert("summary_path".to_string(), json!(path.to_string_lossy()));
    }
    if cli.no_process_env {
        export.insert("process_env".to_string(), json!(false));
    }
    if cli.fail_on_export_error {
        export.insert("fail_on_error".to_string(), json!(true));
    }

    if !export.is_empty() {
        root.insert("export".to_string(), Value::Object(export));
    }
    Ok(Value::Object(root))
}
