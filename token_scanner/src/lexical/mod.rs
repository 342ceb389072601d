//! Lexical analysis: turns source text into classified tokens
//!
//! The scanner is a single forward pass. Unterminated strings and characters
//! outside every class never produce tokens; they are recorded as
//! diagnostics and, in strict mode, surfaced as a [`LexerError`].

pub mod analyzer;
pub mod classify;
pub mod diagnostics;
pub mod scanners;

use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::file_processor::FileProcessingResult;
use crate::tokens::{Token, TokenKind};
use serde::{Deserialize, Serialize};

pub use analyzer::{LexerError, LexicalMetrics, ScanOutput, Scanner};
pub use classify::{classify, is_decimal_digit, is_letter, is_word_continue, CharClass};
pub use diagnostics::{DiagnosticBuffer, DiagnosticKind, ScanDiagnostic};
pub use scanners::{scan_delimiter, scan_number, scan_operator, scan_string, scan_word};

/// Tokenize `source` leniently
pub fn tokenize(source: &str) -> Vec<Token> {
    Scanner::new(source).analyze()
}

/// Tokenize `source` honoring the mode in `preferences`
pub fn tokenize_with_preferences(
    source: &str,
    preferences: LexicalPreferences,
) -> Result<Vec<Token>, LexerError> {
    Scanner::with_preferences(source, preferences).try_analyze()
}

/// Scan a loaded file with its path attached to every logged event
pub fn tokenize_file_result(
    file_result: &FileProcessingResult,
    preferences: LexicalPreferences,
) -> Result<ScanOutput, LexerError> {
    let source_name = file_result.metadata.path.display().to_string();
    crate::logging::with_source_context(&source_name, || {
        let mode = preferences.mode;
        Scanner::with_preferences(file_result.source.as_str(), preferences)
            .scan()
            .enforce(mode)
    })
}

/// Per-kind token totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCounts {
    pub total: usize,
    pub numbers: usize,
    pub words: usize,
    pub strings: usize,
    pub operators: usize,
    pub delimiters: usize,
}

impl TokenCounts {
    pub fn get(&self, kind: TokenKind) -> usize {
        match kind {
            TokenKind::Number => self.numbers,
            TokenKind::Word => self.words,
            TokenKind::String => self.strings,
            TokenKind::Operator => self.operators,
            TokenKind::Delimiter => self.delimiters,
        }
    }

    pub fn has_content(&self) -> bool {
        self.total > 0
    }
}

pub fn get_token_counts(tokens: &[Token]) -> TokenCounts {
    tokens.iter().fold(TokenCounts::default(), |mut counts, token| {
        counts.total += 1;
        match token.kind {
            TokenKind::Number => counts.numbers += 1,
            TokenKind::Word => counts.words += 1,
            TokenKind::String => counts.strings += 1,
            TokenKind::Operator => counts.operators += 1,
            TokenKind::Delimiter => counts.delimiters += 1,
        }
        counts
    })
}

/// Check that every lexical code is registered and log the compiled limits
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    let lexical_codes = [
        crate::logging::codes::lexical::UNRECOGNIZED_CHARACTER,
        crate::logging::codes::lexical::UNTERMINATED_STRING,
        crate::logging::codes::lexical::DIAGNOSTIC_LIMIT_REACHED,
    ];

    for code in &lexical_codes {
        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    for kind in [
        DiagnosticKind::UnterminatedString,
        DiagnosticKind::UnrecognizedCharacter,
    ] {
        if crate::logging::codes::get_error_metadata(kind.code().as_str()).is_none() {
            return Err(format!("Diagnostic kind {} has no registered code", kind.as_str()));
        }
    }

    crate::log_debug!("Lexical limits initialized",
        "max_diagnostics" => MAX_DIAGNOSTICS,
        "max_diagnostic_fragment_length" => MAX_DIAGNOSTIC_FRAGMENT_LENGTH,
        "max_tracked_operators" => MAX_TRACKED_OPERATORS
    );

    Ok(())
}
