//! Token values and the character tables the scanner classifies against

use crate::utils::Spanned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Characters that start an operator token
pub const OPERATOR_CHARS: [char; 10] = ['+', '-', '*', '/', '=', '<', '>', '!', '&', '|'];

/// Characters emitted as single-character delimiter tokens
pub const DELIMITER_CHARS: [char; 6] = [';', ',', '(', ')', '{', '}'];

/// The only two-character operators; anything else is scanned one character at a time
pub const TWO_CHAR_OPERATORS: [&str; 6] = ["==", "!=", "<=", ">=", "&&", "||"];

/// Closed set of token categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Number,
    Word,
    String,
    Operator,
    Delimiter,
}

impl TokenKind {
    pub const ALL: [TokenKind; 5] = [
        TokenKind::Number,
        TokenKind::Word,
        TokenKind::String,
        TokenKind::Operator,
        TokenKind::Delimiter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Number => "NUMBER",
            TokenKind::Word => "WORD",
            TokenKind::String => "STRING",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Delimiter => "DELIMITER",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified lexeme.
///
/// `text` is the exact source slice for every kind except `String`, whose
/// text excludes the surrounding quotes and may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

/// A token with its byte span in the scanned source
pub type SpannedToken = Spanned<Token>;

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn number(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Number, text)
    }

    pub fn word(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Word, text)
    }

    pub fn string(text: impl Into<String>) -> Self {
        Self::new(TokenKind::String, text)
    }

    pub fn operator(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Operator, text)
    }

    pub fn delimiter(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Delimiter, text)
    }

    pub fn is_two_char_operator(&self) -> bool {
        self.kind == TokenKind::Operator && is_two_char_operator(&self.text)
    }

    /// Source form of the token: string literals get their quotes back
    pub fn source_text(&self) -> String {
        match self.kind {
            TokenKind::String => format!("\"{}\"", self.text),
            _ => self.text.clone(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.text)
    }
}

pub fn is_operator_char(c: char) -> bool {
    OPERATOR_CHARS.contains(&c)
}

pub fn is_delimiter_char(c: char) -> bool {
    DELIMITER_CHARS.contains(&c)
}

/// Exact membership in the two-character operator table
pub fn is_two_char_operator(candidate: &str) -> bool {
    TWO_CHAR_OPERATORS.contains(&candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        let names: Vec<&str> = TokenKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names, ["NUMBER", "WORD", "STRING", "OPERATOR", "DELIMITER"]);
        assert_eq!(TokenKind::Delimiter.to_string(), "DELIMITER");
    }

    #[test]
    fn test_two_char_table_is_exact() {
        for op in TWO_CHAR_OPERATORS {
            assert!(is_two_char_operator(op));
        }
        // Substrings and longer runs of the table text are not operators
        assert!(!is_two_char_operator("="));
        assert!(!is_two_char_operator("=!"));
        assert!(!is_two_char_operator("==="));
        assert!(!is_two_char_operator("+="));
        assert!(!is_two_char_operator("=<"));
        assert!(!is_two_char_operator(""));
    }

    #[test]
    fn test_character_tables() {
        assert!("+-*/=<>!&|".chars().all(is_operator_char));
        assert!(";,(){}".chars().all(is_delimiter_char));
        assert!(!is_operator_char('%'));
        assert!(!is_delimiter_char('['));
        assert!(!is_delimiter_char('.'));
    }

    #[test]
    fn test_token_display_and_source_text() {
        let token = Token::string("hi there");
        assert_eq!(token.to_string(), "STRING(hi there)");
        assert_eq!(token.source_text(), "\"hi there\"");
        assert_eq!(Token::operator("&&").source_text(), "&&");
        assert!(Token::operator("<=").is_two_char_operator());
        assert!(!Token::operator("<").is_two_char_operator());
    }

    #[test]
    fn test_token_serializes_with_kind_name() {
        let json = serde_json::to_string(&Token::number("10")).unwrap();
        assert_eq!(json, r#"{"kind":"NUMBER","text":"10"}"#);

        let back: Token = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Token::number("10"));
    }
}
