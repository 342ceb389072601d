use super::{PipelineError, PipelineResult};
use crate::lexical::{LexicalMetrics, ScanDiagnostic, TokenCounts};
use crate::tokens::TokenKind;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// One token as written to JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub kind: TokenKind,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Serializable projection of a [`PipelineResult`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub source: String,
    pub mode: String,
    pub tokens: Vec<TokenRecord>,
    pub diagnostics: Vec<ScanDiagnostic>,
    pub suppressed_diagnostics: usize,
    pub counts: TokenCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<LexicalMetrics>,
    pub duration_ms: f64,
}

impl PipelineOutput {
    /// Build from a result; metrics are only carried when `include_metrics` is set
    pub fn from_result(result: &PipelineResult, include_metrics: bool) -> Self {
        Self {
            source: result.source_name.clone(),
            mode: result.mode.as_str().to_string(),
            tokens: result
                .tokens
                .iter()
                .map(|t| TokenRecord {
                    kind: t.value.kind,
                    text: t.value.text.clone(),
                    start: t.span.start,
                    end: t.span.end,
                })
                .collect(),
            diagnostics: result.diagnostics.clone(),
            suppressed_diagnostics: result.suppressed_diagnostics,
            counts: result.token_counts,
            metrics: include_metrics.then(|| result.lexical_metrics.clone()),
            duration_ms: result.processing_duration.as_secs_f64() * 1000.0,
        }
    }

    pub fn to_json(&self) -> Result<String, PipelineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// One `KIND(text)` line per token, then diagnostics and an optional summary
    pub fn render_text(&self, summary: bool) -> String {
        let mut out = String::new();

        for token in &self.tokens {
            let _ = writeln!(out, "{}({})", token.kind, token.text);
        }

        for diagnostic in &self.diagnostics {
            let _ = writeln!(out, "# {}", diagnostic);
        }
        if self.suppressed_diagnostics > 0 {
            let _ = writeln!(
                out,
                "# {} further diagnostics suppressed",
                self.suppressed_diagnostics
            );
        }

        if summary {
            let _ = writeln!(
                out,
                "# {}: {} tokens (numbers {}, words {}, strings {}, operators {}, delimiters {}) in {:.3} ms",
                self.source,
                self.counts.total,
                self.counts.numbers,
                self.counts.words,
                self.counts.strings,
                self.counts.operators,
                self.counts.delimiters,
                self.duration_ms
            );
        }

        out
    }
}
