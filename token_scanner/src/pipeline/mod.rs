//! File (or in-memory source) -> scan -> result, with logging at each stage

mod error;
pub mod output;
mod result;

pub use error::PipelineError;
pub use output::{PipelineOutput, TokenRecord};
pub use result::PipelineResult;

use crate::config::runtime::RuntimeConfig;
use crate::file_processor::FileProcessor;
use crate::lexical::Scanner;
use crate::logging;
use std::time::Instant;

/// Process a file with configuration from the environment
pub fn process_file(file_path: &str) -> Result<PipelineResult, PipelineError> {
    process_file_with_config(file_path, &RuntimeConfig::default())
}

/// Load, scan and apply the configured scan mode to one file
pub fn process_file_with_config(
    file_path: &str,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    logging::with_source_context(file_path, || -> Result<PipelineResult, PipelineError> {
        crate::log_info!("Starting token scanning pipeline",
            "file" => file_path,
            "mode" => config.lexical.mode.as_str()
        );

        let file_result =
            FileProcessor::from_preferences(&config.file_processor).process_file(file_path)?;
        let scan = crate::lexical::tokenize_file_result(&file_result, config.lexical.clone())?;

        let result = PipelineResult::new(
            file_path.to_string(),
            config.lexical.mode,
            scan,
            Some(file_result.metadata),
            file_result.source.len(),
            start_time.elapsed(),
        );

        if config.file_processor.enable_performance_logging {
            result.log_success();
        }

        Ok(result)
    })
}

/// Process in-memory source with configuration from the environment
pub fn process_source(source_name: &str, source: &str) -> Result<PipelineResult, PipelineError> {
    process_source_with_config(source_name, source, &RuntimeConfig::default())
}

/// Scan in-memory source (stdin, tests) under `source_name`
pub fn process_source_with_config(
    source_name: &str,
    source: &str,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    logging::with_source_context(source_name, || -> Result<PipelineResult, PipelineError> {
        let mode = config.lexical.mode;
        let scan = Scanner::with_preferences(source, config.lexical.clone())
            .scan()
            .enforce(mode)?;

        let result = PipelineResult::new(
            source_name.to_string(),
            mode,
            scan,
            None,
            source.len(),
            start_time.elapsed(),
        );

        if config.file_processor.enable_performance_logging {
            result.log_success();
        }

        Ok(result)
    })
}

/// Check that every module's codes are registered
pub fn validate_pipeline() -> Result<(), PipelineError> {
    crate::file_processor::init_file_processor_logging()
        .and_then(|_| crate::lexical::init_lexical_analysis_logging())
        .map_err(|message| PipelineError::pipeline_error(&message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::runtime::ScanMode;
    use crate::lexical::LexerError;
    use crate::tokens::{Token, TokenKind};
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    fn config(mode: ScanMode) -> RuntimeConfig {
        let mut config = RuntimeConfig::default();
        config.lexical.mode = mode;
        config.file_processor.required_extension = None;
        config
    }

    #[test]
    fn test_validate_pipeline() {
        assert!(validate_pipeline().is_ok());
    }

    #[test]
    fn test_process_source() {
        let result =
            process_source_with_config("inline", "if (x != 0) { y = \"ok\"; }", &config(ScanMode::Lenient))
                .unwrap();

        assert_eq!(result.source_name, "inline");
        assert_eq!(result.token_count(), 12);
        assert_eq!(result.token_counts.get(TokenKind::Delimiter), 5);
        assert_eq!(result.plain_tokens()[3], Token::operator("!="));
        assert!(result.is_clean());
        assert!(result.file_metadata.is_none());
        assert_eq!(result.source_bytes, 25);
    }

    #[test]
    fn test_process_source_strict_failure() {
        let result = process_source_with_config("inline", "say \"unfinished", &config(ScanMode::Strict));
        assert_matches!(
            result,
            Err(PipelineError::LexicalAnalysis(LexerError::UnterminatedString { offset: 4 }))
        );
    }

    #[test]
    fn test_process_source_lenient_keeps_diagnostics() {
        let result =
            process_source_with_config("inline", "a $ b \"open", &config(ScanMode::Lenient)).unwrap();

        assert_eq!(result.plain_tokens(), vec![Token::word("a"), Token::word("b")]);
        assert_eq!(result.diagnostic_count(), 2);
        assert!(!result.is_clean());
    }

    #[test]
    fn test_process_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("calc.src");
        fs::write(&path, "sum = a + b;\n").unwrap();

        let result =
            process_file_with_config(path.to_str().unwrap(), &config(ScanMode::Strict)).unwrap();

        assert_eq!(result.token_count(), 6);
        assert_eq!(result.mode, ScanMode::Strict);
        assert_eq!(result.file_metadata.as_ref().map(|m| m.line_count), Some(1));
    }

    #[test]
    fn test_process_missing_file() {
        let result = process_file_with_config("no/such/input.src", &config(ScanMode::Lenient));
        assert_matches!(result, Err(PipelineError::FileProcessing(_)));
    }

    #[test]
    fn test_process_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.src");
        fs::write(&path, "").unwrap();

        let result =
            process_file_with_config(path.to_str().unwrap(), &config(ScanMode::Strict)).unwrap();
        assert_eq!(result.token_count(), 0);
        assert!(!result.token_counts.has_content());
    }
}
