//! Token model for the scanner
//!
//! - [`Token`] and [`TokenKind`]: the five token categories and their text
//! - character tables for operators, delimiters and the two-character operators

pub mod token;

pub use token::{
    is_delimiter_char, is_operator_char, is_two_char_operator, SpannedToken, Token, TokenKind,
    DELIMITER_CHARS, OPERATOR_CHARS, TWO_CHAR_OPERATORS,
};

pub use crate::utils::{Span, Spanned};
