//! Single-pass scanner
//!
//! The scanner owns the source and a byte cursor. Each step classifies the
//! character under the cursor, hands the token classes to the pure
//! sub-scanners in [`super::scanners`], and skips whitespace and unrecognized
//! characters. Scanning consumes the scanner.

use super::classify::CharClass;
use super::diagnostics::{DiagnosticBuffer, DiagnosticKind, ScanDiagnostic};
use super::scanners::{scan_delimiter, scan_number, scan_operator, scan_string, scan_word};
use crate::config::compile_time::lexical::*;
use crate::config::runtime::{LexicalPreferences, ScanMode};
use crate::logging::codes;
use crate::tokens::{SpannedToken, Token, TokenKind};
use crate::utils::{Span, Spanned};
use crate::{log_debug, log_error, log_success, log_warning};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Conditions a strict scan rejects
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("Unterminated string literal starting at byte {offset}")]
    UnterminatedString { offset: usize },

    #[error("Unrecognized character {character:?} at byte {offset}")]
    UnrecognizedCharacter { character: char, offset: usize },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::UnterminatedString { .. } => codes::lexical::UNTERMINATED_STRING,
            LexerError::UnrecognizedCharacter { .. } => codes::lexical::UNRECOGNIZED_CHARACTER,
        }
    }

    pub fn offset(&self) -> usize {
        match self {
            LexerError::UnterminatedString { offset }
            | LexerError::UnrecognizedCharacter { offset, .. } => *offset,
        }
    }
}

/// Counters gathered during one scan
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub number_tokens: usize,
    pub word_tokens: usize,
    pub string_tokens: usize,
    pub operator_tokens: usize,
    pub delimiter_tokens: usize,
    pub two_char_operators: usize,
    pub max_string_length: usize,
    pub max_word_length: usize,

    pub whitespace_skipped: usize,
    pub characters_dropped: usize,
    pub unterminated_strings: usize,
    /// Bytes consumed without producing a token
    pub skipped_bytes: usize,

    /// Operator text to occurrence count; only when operator tracking is on
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub operator_usage_patterns: BTreeMap<String, usize>,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        self.total_tokens += 1;

        if preferences.collect_detailed_metrics {
            match token.kind {
                TokenKind::Number => self.number_tokens += 1,
                TokenKind::Word => {
                    self.word_tokens += 1;
                    self.max_word_length = self.max_word_length.max(token.text.chars().count());
                }
                TokenKind::String => {
                    self.string_tokens += 1;
                    self.max_string_length =
                        self.max_string_length.max(token.text.chars().count());
                }
                TokenKind::Operator => {
                    self.operator_tokens += 1;
                    if token.is_two_char_operator() {
                        self.two_char_operators += 1;
                    }
                }
                TokenKind::Delimiter => self.delimiter_tokens += 1,
            }
        }

        if preferences.track_operator_patterns && token.kind == TokenKind::Operator {
            self.record_operator_pattern(&token.text);
        }
    }

    fn record_operator_pattern(&mut self, text: &str) {
        if let Some(count) = self.operator_usage_patterns.get_mut(text) {
            *count += 1;
        } else if self.operator_usage_patterns.len() < MAX_TRACKED_OPERATORS {
            self.operator_usage_patterns.insert(text.to_string(), 1);
        }
    }

    pub(crate) fn record_whitespace(&mut self, byte_len: usize) {
        self.whitespace_skipped += 1;
        self.skipped_bytes += byte_len;
    }

    pub(crate) fn record_dropped_char(&mut self, byte_len: usize) {
        self.characters_dropped += 1;
        self.skipped_bytes += byte_len;
    }

    pub(crate) fn record_unterminated_string(&mut self, byte_len: usize) {
        self.unterminated_strings += 1;
        self.skipped_bytes += byte_len;
    }
}

/// Everything a scan produced
#[derive(Debug, Clone)]
pub struct ScanOutput {
    pub tokens: Vec<SpannedToken>,
    pub diagnostics: Vec<ScanDiagnostic>,
    /// Diagnostics past the compiled limit, counted but not stored
    pub suppressed_diagnostics: usize,
    pub metrics: LexicalMetrics,
}

impl ScanOutput {
    /// Tokens without spans
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens.into_iter().map(Spanned::into_inner).collect()
    }

    /// Apply `mode`: lenient passes everything through, strict turns the
    /// first diagnostic into an error
    pub fn enforce(self, mode: ScanMode) -> Result<Self, LexerError> {
        if !mode.is_strict() {
            return Ok(self);
        }

        match self.diagnostics.first() {
            Some(diagnostic) => {
                let error = diagnostic.to_error();
                log_error!(error.error_code(), "Strict scan rejected input",
                    span = diagnostic.span,
                    "kind" => diagnostic.kind.as_str(),
                    "fragment" => format!("{:?}", diagnostic.fragment),
                    "total_diagnostics" => self.diagnostics.len() + self.suppressed_diagnostics
                );
                Err(error)
            }
            None => {
                log_success!(codes::success::LEXICAL_VALIDATION_PASSED, "Strict scan passed",
                    "tokens" => self.tokens.len()
                );
                Ok(self)
            }
        }
    }
}

/// Single-use scanner over an owned source string
#[derive(Debug)]
pub struct Scanner {
    source: String,
    cursor: usize,
    preferences: LexicalPreferences,
    tokens: Vec<SpannedToken>,
    diagnostics: DiagnosticBuffer,
    metrics: LexicalMetrics,
}

impl Scanner {
    /// Scanner with preferences from the environment
    pub fn new(source: impl Into<String>) -> Self {
        Self::with_preferences(source, LexicalPreferences::default())
    }

    pub fn with_preferences(source: impl Into<String>, preferences: LexicalPreferences) -> Self {
        Self {
            source: source.into(),
            cursor: 0,
            preferences,
            tokens: Vec::new(),
            diagnostics: DiagnosticBuffer::new(),
            metrics: LexicalMetrics::default(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    /// Tokenize the whole source. Never fails: unterminated strings and
    /// unrecognized characters produce no tokens.
    pub fn analyze(self) -> Vec<Token> {
        self.scan().into_tokens()
    }

    /// Tokenize honoring the configured [`ScanMode`]
    pub fn try_analyze(self) -> Result<Vec<Token>, LexerError> {
        let mode = self.preferences.mode;
        self.scan().enforce(mode).map(ScanOutput::into_tokens)
    }

    /// Tokenize with spans, diagnostics and metrics
    pub fn scan(mut self) -> ScanOutput {
        log_debug!("Starting lexical analysis",
            "bytes" => self.source.len(),
            "mode" => self.preferences.mode.as_str(),
            "max_diagnostics" => MAX_DIAGNOSTICS
        );

        while self.cursor < self.source.len() {
            let before = self.cursor;
            self.step();
            debug_assert!(self.cursor > before, "scanner failed to advance");
        }

        if self.diagnostics.suppressed() > 0 {
            log_warning!(code = codes::lexical::DIAGNOSTIC_LIMIT_REACHED, "Diagnostic limit reached",
                "stored" => self.diagnostics.stored().len(),
                "suppressed" => self.diagnostics.suppressed()
            );
        }

        log_success!(codes::success::TOKENIZATION_COMPLETE, "Lexical analysis completed",
            "tokens" => self.metrics.total_tokens,
            "whitespace_skipped" => self.metrics.whitespace_skipped,
            "characters_dropped" => self.metrics.characters_dropped,
            "unterminated_strings" => self.metrics.unterminated_strings
        );

        let (diagnostics, suppressed_diagnostics) = self.diagnostics.into_parts();
        ScanOutput {
            tokens: self.tokens,
            diagnostics,
            suppressed_diagnostics,
            metrics: self.metrics,
        }
    }

    /// Consume one token, one skipped character, or an unterminated string
    fn step(&mut self) {
        let start = self.cursor;
        let Some(c) = self.source.get(start..).and_then(|rest| rest.chars().next()) else {
            self.cursor = self.source.len();
            return;
        };

        match CharClass::of(c) {
            CharClass::Digit => {
                let (token, end) = scan_number(&self.source, start);
                self.emit(token, start, end);
            }
            CharClass::Letter => {
                let (token, end) = scan_word(&self.source, start);
                self.emit(token, start, end);
            }
            CharClass::Quote => match scan_string(&self.source, start) {
                Some((token, end)) => self.emit(token, start, end),
                None => self.absorb_unterminated_string(start),
            },
            CharClass::Operator => {
                let (token, end) = scan_operator(&self.source, start);
                self.emit(token, start, end);
            }
            CharClass::Delimiter => {
                let (token, end) = scan_delimiter(&self.source, start);
                self.emit(token, start, end);
            }
            CharClass::Whitespace => {
                self.metrics.record_whitespace(c.len_utf8());
                self.cursor = start + c.len_utf8();
            }
            CharClass::Other => {
                let end = start + c.len_utf8();
                self.metrics.record_dropped_char(c.len_utf8());
                self.report(DiagnosticKind::UnrecognizedCharacter, Span::new(start, end));
                self.cursor = end;
            }
        }
    }

    fn emit(&mut self, token: Token, start: usize, end: usize) {
        self.metrics.record_token(&token, &self.preferences);
        self.tokens.push(Spanned::new(token, Span::new(start, end)));
        self.cursor = end;
    }

    fn absorb_unterminated_string(&mut self, start: usize) {
        let end = self.source.len();
        self.metrics.record_unterminated_string(end - start);
        self.report(DiagnosticKind::UnterminatedString, Span::new(start, end));
        self.cursor = end;
    }

    fn report(&mut self, kind: DiagnosticKind, span: Span) {
        let text = span.slice(&self.source).unwrap_or_default();
        let diagnostic = ScanDiagnostic::new(kind, span, text);

        if self.preferences.mode == ScanMode::Lenient && self.preferences.log_dropped_characters {
            log_warning!(code = kind.code(), "Input absorbed without a token",
                span = span,
                "kind" => kind.as_str(),
                "fragment" => format!("{:?}", diagnostic.fragment)
            );
        }

        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::runtime::LexicalPreferences;
    use assert_matches::assert_matches;

    fn preferences(mode: ScanMode) -> LexicalPreferences {
        LexicalPreferences {
            mode,
            collect_detailed_metrics: true,
            track_operator_patterns: true,
            log_dropped_characters: false,
        }
    }

    fn lenient(source: &str) -> Vec<Token> {
        Scanner::with_preferences(source, preferences(ScanMode::Lenient)).analyze()
    }

    fn kinds_and_texts(tokens: &[Token]) -> Vec<(TokenKind, &str)> {
        tokens.iter().map(|t| (t.kind, t.text.as_str())).collect()
    }

    #[test]
    fn test_assignment_statement() {
        let tokens = lenient("x = 10;");
        assert_eq!(
            kinds_and_texts(&tokens),
            vec![
                (TokenKind::Word, "x"),
                (TokenKind::Operator, "="),
                (TokenKind::Number, "10"),
                (TokenKind::Delimiter, ";"),
            ]
        );
    }

    #[test]
    fn test_comparison_without_spaces() {
        assert_eq!(
            lenient("a==b"),
            vec![Token::word("a"), Token::operator("=="), Token::word("b")]
        );
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(lenient("\"hello\""), vec![Token::string("hello")]);
    }

    #[test]
    fn test_decimal_point_is_dropped() {
        assert_eq!(lenient("3.14"), vec![Token::number("3"), Token::number("14")]);
    }

    #[test]
    fn test_unterminated_string_yields_nothing() {
        assert!(lenient("\"unterminated").is_empty());
    }

    #[test]
    fn test_adjacent_two_char_operators() {
        assert_eq!(
            lenient("!=<=&&"),
            vec![
                Token::operator("!="),
                Token::operator("<="),
                Token::operator("&&")
            ]
        );
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(lenient("").is_empty());
        assert!(lenient(" \t\r\n ").is_empty());
    }

    #[test]
    fn test_triple_equals_splits() {
        assert_eq!(lenient("==="), vec![Token::operator("=="), Token::operator("=")]);
    }

    #[test]
    fn test_non_table_pairs_split() {
        assert_eq!(
            lenient("=<+=|&"),
            vec![
                Token::operator("="),
                Token::operator("<"),
                Token::operator("+"),
                Token::operator("="),
                Token::operator("|"),
                Token::operator("&"),
            ]
        );
    }

    #[test]
    fn test_empty_string_and_backslash() {
        assert_eq!(
            lenient(r#"""  "a\" b"#),
            vec![Token::string(""), Token::string("a\\"), Token::word("b")]
        );
    }

    #[test]
    fn test_unterminated_string_keeps_earlier_tokens() {
        assert_eq!(
            lenient("print(\"oops"),
            vec![Token::word("print"), Token::delimiter("(")]
        );
    }

    #[test]
    fn test_identifier_rules() {
        assert_eq!(
            lenient("_x x_1 9lives"),
            vec![
                Token::word("x"),
                Token::word("x_1"),
                Token::number("9"),
                Token::word("lives"),
            ]
        );
    }

    #[test]
    fn test_unicode_words_and_dropped_symbols() {
        assert_eq!(
            lenient("café € naïve"),
            vec![Token::word("café"), Token::word("naïve")]
        );
    }

    #[test]
    fn test_decimal_digits_from_other_scripts() {
        assert_eq!(lenient("12\u{0663}4"), vec![Token::number("12\u{0663}4")]);
        assert_eq!(lenient("\u{0663}"), vec![Token::number("\u{0663}")]);
        assert_eq!(
            lenient("x\u{0663} \u{0966}0"),
            vec![Token::word("x\u{0663}"), Token::number("\u{0966}0")]
        );
    }

    #[test]
    fn test_non_decimal_numerics_are_dropped() {
        assert_eq!(lenient("x\u{00B2}"), vec![Token::word("x")]);
        assert!(lenient("\u{216B}").is_empty());

        let output = Scanner::with_preferences("\u{216B}", preferences(ScanMode::Lenient)).scan();
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.diagnostics[0].kind, DiagnosticKind::UnrecognizedCharacter);
        assert_eq!(output.diagnostics[0].span, Span::new(0, 3));
    }

    #[test]
    fn test_no_break_space_is_not_a_separator() {
        assert_eq!(lenient("a\u{00A0}b"), vec![Token::word("a"), Token::word("b")]);
        assert_eq!(lenient("a\u{2003}b"), vec![Token::word("a"), Token::word("b")]);

        let result =
            Scanner::with_preferences("a\u{00A0}b", preferences(ScanMode::Strict)).try_analyze();
        assert_matches!(
            result,
            Err(LexerError::UnrecognizedCharacter { character: '\u{a0}', offset: 1 })
        );

        let result =
            Scanner::with_preferences("a\u{2003}b", preferences(ScanMode::Strict)).try_analyze();
        assert!(result.is_ok());
    }

    #[test]
    fn test_spans_are_byte_offsets() {
        let output = Scanner::with_preferences("é = \"ü\";", preferences(ScanMode::Lenient)).scan();
        let spans: Vec<Span> = output.tokens.iter().map(|t| t.span).collect();
        assert_eq!(
            spans,
            vec![
                Span::new(0, 2),
                Span::new(3, 4),
                Span::new(5, 9),
                Span::new(9, 10)
            ]
        );
    }

    #[test]
    fn test_spanned_tokens_slice_back_to_source() {
        let source = "n1 <= 42";
        let output = Scanner::with_preferences(source, preferences(ScanMode::Lenient)).scan();
        let texts: Vec<&str> = output
            .tokens
            .iter()
            .filter_map(|t| t.span.slice(source))
            .collect();
        assert_eq!(texts, vec!["n1", "<=", "42"]);
        assert_eq!(
            output.into_tokens(),
            vec![Token::word("n1"), Token::operator("<="), Token::number("42")]
        );
    }

    #[test]
    fn test_scan_records_diagnostics_in_lenient_mode() {
        let output =
            Scanner::with_preferences("a @ b \"open", preferences(ScanMode::Lenient)).scan();

        assert_eq!(output.tokens.len(), 2);
        assert_eq!(output.diagnostics.len(), 2);
        assert_eq!(output.diagnostics[0].kind, DiagnosticKind::UnrecognizedCharacter);
        assert_eq!(output.diagnostics[0].span, Span::new(2, 3));
        assert_eq!(output.diagnostics[0].fragment, "@");
        assert_eq!(output.diagnostics[1].kind, DiagnosticKind::UnterminatedString);
        assert_eq!(output.diagnostics[1].span, Span::new(6, 11));
        assert_eq!(output.diagnostics[1].fragment, "\"open");
        assert_eq!(output.suppressed_diagnostics, 0);
    }

    #[test]
    fn test_lenient_try_analyze_never_fails() {
        let result = Scanner::with_preferences("# \"x", preferences(ScanMode::Lenient)).try_analyze();
        assert_eq!(result, Ok(vec![]));
    }

    #[test]
    fn test_strict_rejects_first_condition() {
        let result =
            Scanner::with_preferences("ok # \"never", preferences(ScanMode::Strict)).try_analyze();
        assert_matches!(
            result,
            Err(LexerError::UnrecognizedCharacter { character: '#', offset: 3 })
        );

        let result = Scanner::with_preferences("s = \"open", preferences(ScanMode::Strict)).try_analyze();
        assert_matches!(result, Err(LexerError::UnterminatedString { offset: 4 }));
    }

    #[test]
    fn test_strict_accepts_clean_input() {
        let result =
            Scanner::with_preferences("if (a >= 1) { b = \"c\"; }", preferences(ScanMode::Strict))
                .try_analyze()
                .unwrap();
        assert_eq!(result.len(), 12);
    }

    #[test]
    fn test_strict_and_lenient_agree_on_tokens_when_clean() {
        let source = "total = total + 42 || done;";
        let strict = Scanner::with_preferences(source, preferences(ScanMode::Strict))
            .try_analyze()
            .unwrap();
        assert_eq!(strict, lenient(source));
    }

    #[test]
    fn test_error_codes_and_offsets() {
        let error = LexerError::UnterminatedString { offset: 7 };
        assert_eq!(error.error_code(), codes::lexical::UNTERMINATED_STRING);
        assert_eq!(error.offset(), 7);
        assert!(error.to_string().contains("byte 7"));

        let error = LexerError::UnrecognizedCharacter {
            character: '$',
            offset: 1,
        };
        assert_eq!(error.error_code(), codes::lexical::UNRECOGNIZED_CHARACTER);
        assert!(error.to_string().contains("'$'"));
    }

    #[test]
    fn test_metrics() {
        let output = Scanner::with_preferences(
            "n = n + 1; ok = n >= 2 && \"yes\" # \"",
            preferences(ScanMode::Lenient),
        )
        .scan();
        let m = &output.metrics;

        assert_eq!(m.total_tokens, 13);
        assert_eq!(m.word_tokens, 4);
        assert_eq!(m.number_tokens, 2);
        assert_eq!(m.string_tokens, 1);
        assert_eq!(m.operator_tokens, 5);
        assert_eq!(m.delimiter_tokens, 1);
        assert_eq!(m.two_char_operators, 2);
        assert_eq!(m.max_string_length, 3);
        assert_eq!(m.characters_dropped, 1);
        assert_eq!(m.unterminated_strings, 1);
        assert_eq!(m.operator_usage_patterns.get("="), Some(&2));
        assert_eq!(m.operator_usage_patterns.get("&&"), Some(&1));
    }

    #[test]
    fn test_detailed_metrics_can_be_disabled() {
        let prefs = LexicalPreferences {
            collect_detailed_metrics: false,
            track_operator_patterns: false,
            ..preferences(ScanMode::Lenient)
        };
        let output = Scanner::with_preferences("a + b", prefs).scan();
        assert_eq!(output.metrics.total_tokens, 3);
        assert_eq!(output.metrics.word_tokens, 0);
        assert!(output.metrics.operator_usage_patterns.is_empty());
    }

    #[test]
    fn test_tracked_operators_are_bounded() {
        let mut metrics = LexicalMetrics::default();
        for i in 0..(MAX_TRACKED_OPERATORS + 4) {
            metrics.record_operator_pattern(&format!("op{}", i));
        }
        metrics.record_operator_pattern("op0");
        assert_eq!(metrics.operator_usage_patterns.len(), MAX_TRACKED_OPERATORS);
        assert_eq!(metrics.operator_usage_patterns.get("op0"), Some(&2));
    }

    #[test]
    fn test_scanner_starts_at_zero() {
        let scanner = Scanner::new("abc");
        assert_eq!(scanner.cursor(), 0);
        assert_eq!(scanner.source(), "abc");
    }

    #[test]
    fn test_property_totality_and_coverage() {
        use proptest::prelude::*;

        proptest!(|(input in any::<String>())| {
            let len = input.len();
            let output = Scanner::with_preferences(input.as_str(), preferences(ScanMode::Lenient)).scan();

            let mut previous_end = 0;
            let mut covered = 0;
            for token in &output.tokens {
                prop_assert!(token.span.start >= previous_end);
                prop_assert!(token.span.end <= len);
                previous_end = token.span.end;
                covered += token.span.len();
                if token.value.kind != TokenKind::String {
                    prop_assert!(!token.value.text.is_empty());
                    prop_assert_eq!(token.span.slice(&input), Some(token.value.text.as_str()));
                }
            }
            prop_assert_eq!(covered + output.metrics.skipped_bytes, len);
        });
    }

    #[test]
    fn test_property_whitespace_between_tokens_is_irrelevant() {
        use proptest::prelude::*;

        proptest!(|(parts in prop::collection::vec("[a-z][a-z0-9_]{0,6}|[0-9]{1,5}|[;,(){}]|==|!=|<=|>=|&&|\\|\\||[+*/-]", 1..20),
                    gap in "[ \t\n]{1,3}")| {
            let spaced = parts.join(gap.as_str());
            let tokens = lenient(&spaced);
            let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
            prop_assert_eq!(texts, parts.iter().map(String::as_str).collect::<Vec<_>>());
        });
    }

    #[test]
    fn test_property_retokenizing_joined_text() {
        use proptest::prelude::*;

        proptest!(|(input in "[a-zA-Z0-9_ ;,(){}+*/=<>!&|.@-]{0,80}")| {
            let first = lenient(&input);
            let rejoined = first.iter().map(|t| t.text.as_str()).collect::<Vec<_>>().join(" ");
            let second = lenient(&rejoined);
            prop_assert_eq!(
                first.iter().map(|t| t.kind).collect::<Vec<_>>(),
                second.iter().map(|t| t.kind).collect::<Vec<_>>()
            );
        });
    }
}
