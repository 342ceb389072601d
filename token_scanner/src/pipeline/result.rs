use crate::config::runtime::ScanMode;
use crate::file_processor::FileMetadata;
use crate::lexical::{LexicalMetrics, ScanDiagnostic, ScanOutput, TokenCounts};
use crate::tokens::{SpannedToken, Token};
use std::time::Duration;

/// Everything the pipeline learned about one input
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// File path, or the name given to in-memory input
    pub source_name: String,
    pub mode: ScanMode,
    pub tokens: Vec<SpannedToken>,
    pub diagnostics: Vec<ScanDiagnostic>,
    pub suppressed_diagnostics: usize,
    pub lexical_metrics: LexicalMetrics,
    pub token_counts: TokenCounts,
    /// Present when the input came from disk
    pub file_metadata: Option<FileMetadata>,
    pub source_bytes: usize,
    pub processing_duration: Duration,
}

impl PipelineResult {
    pub fn new(
        source_name: String,
        mode: ScanMode,
        scan: ScanOutput,
        file_metadata: Option<FileMetadata>,
        source_bytes: usize,
        processing_duration: Duration,
    ) -> Self {
        let plain: Vec<Token> = scan.tokens.iter().map(|t| t.value.clone()).collect();
        let token_counts = crate::lexical::get_token_counts(&plain);

        Self {
            source_name,
            mode,
            tokens: scan.tokens,
            diagnostics: scan.diagnostics,
            suppressed_diagnostics: scan.suppressed_diagnostics,
            lexical_metrics: scan.metrics,
            token_counts,
            file_metadata,
            source_bytes,
            processing_duration,
        }
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Tokens without spans
    pub fn plain_tokens(&self) -> Vec<Token> {
        self.tokens.iter().map(|t| t.value.clone()).collect()
    }

    /// Stored plus suppressed diagnostics
    pub fn diagnostic_count(&self) -> usize {
        self.diagnostics.len() + self.suppressed_diagnostics
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostic_count() == 0
    }

    pub fn log_success(&self) {
        let seconds = self.processing_duration.as_secs_f64();
        let per_second = |n: usize| {
            if seconds > 0.0 {
                format!("{:.0}", n as f64 / seconds)
            } else {
                "n/a".to_string()
            }
        };

        crate::log_performance!(
            crate::logging::codes::success::PIPELINE_COMPLETE,
            "Token scanning pipeline completed",
            duration = self.processing_duration,
            "source" => self.source_name,
            "mode" => self.mode.as_str(),
            "tokens" => self.token_count(),
            "diagnostics" => self.diagnostic_count(),
            "bytes_per_sec" => per_second(self.source_bytes),
            "tokens_per_sec" => per_second(self.token_count())
        );
    }
}
