// orgmatch CLI - config-driven business-entity deduplication

mod exit_codes;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use orgmatch_resolve::{load_csv_records, write_csv_records, ResolveConfig};

use exit_codes::{EXIT_INVALID_CONFIG, EXIT_RUNTIME, EXIT_SUCCESS};

#[derive(Parser)]
#[command(name = "orgmatch")]
#[command(about = "Deduplicate business-entity records into groups")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run deduplication from a TOML config file
    #[command(after_help = "\
Examples:
  orgmatch run dedup.toml
  orgmatch run dedup.toml --json
  orgmatch run dedup.toml --report report.json")]
    Run {
        /// Path to the .toml config file
        config: PathBuf,

        /// Print the JSON run report to stdout instead of only the human summary
        #[arg(long)]
        json: bool,

        /// Write the JSON run report to a file
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Validate a config without running
    #[command(after_help = "\
Examples:
  orgmatch validate dedup.toml")]
    Validate {
        /// Path to the .toml config file
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { config, json, report } => cmd_run(config, json, report),
        Commands::Validate { config } => cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {message}");
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {hint}");
            }
            ExitCode::from(code)
        }
    }
}

fn cmd_run(config_path: PathBuf, json_output: bool, report_file: Option<PathBuf>) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| CliError::runtime(format!("cannot read config: {e}")))?;
    let config = ResolveConfig::from_toml(&config_str)
        .map_err(|e| CliError::invalid_config(e.to_string()))?;

    // Data file paths are relative to the config file's directory
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let input_path = base_dir.join(&config.input.file);
    let csv_data = std::fs::read_to_string(&input_path).map_err(|e| {
        CliError::runtime(format!("cannot read {}: {e}", input_path.display()))
            .with_hint("input paths are resolved relative to the config file")
    })?;

    let records = load_csv_records(&csv_data, &config.input)
        .map_err(|e| CliError::runtime(e.to_string()))?;

    let result = orgmatch_resolve::run(&config, records);

    let output_csv = write_csv_records(&result.records)
        .map_err(|e| CliError::runtime(e.to_string()))?;
    let output_path = base_dir.join(&config.output.file);
    std::fs::write(&output_path, output_csv).map_err(|e| {
        CliError::runtime(format!("cannot write {}: {e}", output_path.display()))
    })?;
    eprintln!("wrote {}", output_path.display());

    let report_json = serde_json::to_string_pretty(&result)
        .map_err(|e| CliError::runtime(format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = report_file {
        std::fs::write(path, &report_json)
            .map_err(|e| CliError::runtime(format!("cannot write report: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{report_json}");
    }

    // Human summary to stderr
    let s = &result.summary;
    eprintln!(
        "{} records in {} country block(s): {} groups ({} singletons), merged {} by name, {} by domain, {} by contact",
        s.total_records,
        s.blocks,
        s.groups,
        s.singleton_groups,
        s.merged_strong_name,
        s.merged_name_domain,
        s.merged_name_contact,
    );

    Ok(())
}

fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| CliError::runtime(format!("cannot read config: {e}")))?;

    match ResolveConfig::from_toml(&config_str) {
        Ok(config) => {
            eprintln!(
                "valid: '{}', input '{}' -> output '{}'",
                config.name, config.input.file, config.output.file,
            );
            Ok(())
        }
        Err(e) => Err(CliError::invalid_config(e.to_string())),
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    fn invalid_config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_INVALID_CONFIG, message: msg.into(), hint: None }
    }

    fn runtime(msg: impl Into<String>) -> Self {
        Self { code: EXIT_RUNTIME, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
