use clap::{Parser, ValueEnum};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use token_scanner::config::{LogLevel, RuntimeConfig, ScanMode};
use token_scanner::{logging, pipeline, PipelineError, PipelineOutput, PipelineResult};

const STDIN_NAME: &str = "<stdin>";

/// Scan source files into NUMBER, WORD, STRING, OPERATOR and DELIMITER tokens
#[derive(Parser, Debug)]
#[command(name = "tokscan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Single-pass token scanner", long_about = None)]
struct Cli {
    /// Files to scan
    #[arg(required_unless_present = "stdin")]
    files: Vec<PathBuf>,

    /// Read source text from standard input
    #[arg(long)]
    stdin: bool,

    /// Fail on the first unterminated string or unrecognized character
    #[arg(long)]
    strict: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Runtime configuration TOML
    #[arg(short, long, env = "TOKSCAN_CONFIG")]
    config: Option<PathBuf>,

    /// Log to stderr at this level (error, warn, info, debug)
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// Print per-kind token counts after each input
    #[arg(long)]
    summary: bool,

    /// Include lexical metrics in JSON output
    #[arg(long)]
    metrics: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init_global_logging(config.logging.clone()) {
        eprintln!("error: failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    if let Err(e) = pipeline::validate_pipeline() {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }

    let (results, failures) = run_inputs(&cli, &config);

    if let Err(e) = emit(&cli, &results) {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }

    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// File (or default) configuration with command-line overrides applied
fn load_config(cli: &Cli) -> Result<RuntimeConfig, PipelineError> {
    let mut config = match &cli.config {
        Some(path) => RuntimeConfig::from_file(path)?,
        None => RuntimeConfig::default(),
    };

    if cli.strict {
        config.lexical.mode = ScanMode::Strict;
    }

    if let Some(level) = cli.log_level {
        config.logging.min_log_level = level;
        config.logging.enable_console_logging = true;
    }

    Ok(config)
}

/// Scan every input; failures are reported to stderr and counted
fn run_inputs(cli: &Cli, config: &RuntimeConfig) -> (Vec<PipelineResult>, usize) {
    let mut results = Vec::new();
    let mut failures = 0;

    if cli.stdin {
        let outcome = read_stdin()
            .and_then(|source| pipeline::process_source_with_config(STDIN_NAME, &source, config));
        record(STDIN_NAME, outcome, &mut results, &mut failures);
    }

    for path in &cli.files {
        let name = path.display().to_string();
        let outcome = pipeline::process_file_with_config(&name, config);
        record(&name, outcome, &mut results, &mut failures);
    }

    (results, failures)
}

fn record(
    name: &str,
    outcome: Result<PipelineResult, PipelineError>,
    results: &mut Vec<PipelineResult>,
    failures: &mut usize,
) {
    match outcome {
        Ok(result) => results.push(result),
        Err(e) => {
            eprintln!("error[{}]: {}: {}", e.error_code(), name, e);
            *failures += 1;
        }
    }
}

fn read_stdin() -> Result<String, PipelineError> {
    let mut source = String::new();
    std::io::stdin()
        .read_to_string(&mut source)
        .map_err(|e| PipelineError::pipeline_error(&format!("failed to read stdin: {}", e)))?;
    Ok(source)
}

fn emit(cli: &Cli, results: &[PipelineResult]) -> Result<(), PipelineError> {
    let outputs: Vec<PipelineOutput> = results
        .iter()
        .map(|r| PipelineOutput::from_result(r, cli.metrics))
        .collect();

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outputs)?);
        }
        OutputFormat::Text => {
            let headers = outputs.len() > 1;
            for output in &outputs {
                if headers {
                    println!("==> {} <==", output.source);
                }
                print!("{}", output.render_text(cli.summary));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_files_and_flags() {
        let cli = Cli::try_parse_from([
            "tokscan", "a.src", "b.src", "--strict", "--format", "json", "--summary",
        ])
        .unwrap();

        assert_eq!(cli.files, vec![PathBuf::from("a.src"), PathBuf::from("b.src")]);
        assert!(cli.strict);
        assert!(cli.summary);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(!cli.stdin);
    }

    #[test]
    fn test_input_required() {
        assert!(Cli::try_parse_from(["tokscan"]).is_err());
        assert!(Cli::try_parse_from(["tokscan", "--stdin"]).is_ok());
    }

    #[test]
    fn test_log_level_and_strict_override() {
        let cli =
            Cli::try_parse_from(["tokscan", "--stdin", "--strict", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Debug));

        let config = load_config(&cli).unwrap();
        assert_eq!(config.lexical.mode, ScanMode::Strict);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
        assert!(config.logging.enable_console_logging);
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        assert!(Cli::try_parse_from(["tokscan", "--stdin", "--log-level", "loud"]).is_err());
    }
}
