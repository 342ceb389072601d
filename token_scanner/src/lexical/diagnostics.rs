//! Records of the input the scanner absorbed without emitting a token

use super::analyzer::LexerError;
use crate::config::compile_time::lexical::{MAX_DIAGNOSTICS, MAX_DIAGNOSTIC_FRAGMENT_LENGTH};
use crate::logging::{codes, Code};
use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A `"` with no closing quote; the rest of the input was consumed
    UnterminatedString,
    /// A character outside every token class
    UnrecognizedCharacter,
}

impl DiagnosticKind {
    pub fn code(&self) -> Code {
        match self {
            DiagnosticKind::UnterminatedString => codes::lexical::UNTERMINATED_STRING,
            DiagnosticKind::UnrecognizedCharacter => codes::lexical::UNRECOGNIZED_CHARACTER,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::UnterminatedString => "unterminated string",
            DiagnosticKind::UnrecognizedCharacter => "unrecognized character",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanDiagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
    /// Source text under `span`, cut to the compiled fragment length
    pub fragment: String,
}

impl ScanDiagnostic {
    pub fn new(kind: DiagnosticKind, span: Span, source_text: &str) -> Self {
        Self {
            kind,
            span,
            fragment: source_text
                .chars()
                .take(MAX_DIAGNOSTIC_FRAGMENT_LENGTH)
                .collect(),
        }
    }

    pub fn to_error(&self) -> LexerError {
        match self.kind {
            DiagnosticKind::UnterminatedString => LexerError::UnterminatedString {
                offset: self.span.start,
            },
            DiagnosticKind::UnrecognizedCharacter => LexerError::UnrecognizedCharacter {
                character: self.fragment.chars().next().unwrap_or(char::REPLACEMENT_CHARACTER),
                offset: self.span.start,
            },
        }
    }
}

impl fmt::Display for ScanDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at bytes {}: {:?}",
            self.kind.as_str(),
            self.span,
            self.fragment
        )
    }
}

/// Diagnostics retained up to the compiled limit; the rest are only counted
#[derive(Debug, Clone, Default)]
pub struct DiagnosticBuffer {
    stored: Vec<ScanDiagnostic>,
    suppressed: usize,
}

impl DiagnosticBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the diagnostic was counted but not stored
    pub fn push(&mut self, diagnostic: ScanDiagnostic) -> bool {
        if self.stored.len() < MAX_DIAGNOSTICS {
            self.stored.push(diagnostic);
            true
        } else {
            self.suppressed += 1;
            false
        }
    }

    pub fn first(&self) -> Option<&ScanDiagnostic> {
        self.stored.first()
    }

    pub fn stored(&self) -> &[ScanDiagnostic] {
        &self.stored
    }

    pub fn suppressed(&self) -> usize {
        self.suppressed
    }

    pub fn total(&self) -> usize {
        self.stored.len() + self.suppressed
    }

    pub fn is_empty(&self) -> bool {
        self.stored.is_empty()
    }

    pub fn into_parts(self) -> (Vec<ScanDiagnostic>, usize) {
        (self.stored, self.suppressed)
    }
}
