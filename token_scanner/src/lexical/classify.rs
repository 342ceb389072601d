//! First-character classification driving the scanner's dispatch
//!
//! Digits are Unicode decimal digits (category Nd) and letters are the five
//! letter categories, so letter-numbers such as `Ⅻ` and other numerics such
//! as `²` belong to no token class. Whitespace excludes the no-break spaces.

use crate::tokens::{is_delimiter_char, is_operator_char};
use unicode_general_category::{get_general_category, GeneralCategory};

/// Character classes in dispatch priority order.
///
/// Earlier variants win: a character is tested against each class from top to
/// bottom and belongs to the first one it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// Decimal digit in any script
    Digit,
    /// Upper, lower, title, modifier or other letter
    Letter,
    /// `"`
    Quote,
    /// One of `+ - * / = < > ! & |`
    Operator,
    /// One of `; , ( ) { }`
    Delimiter,
    Whitespace,
    /// Anything else; dropped by the scanner
    Other,
}

impl CharClass {
    pub fn of(c: char) -> Self {
        if is_decimal_digit(c) {
            CharClass::Digit
        } else if is_letter(c) {
            CharClass::Letter
        } else if c == '"' {
            CharClass::Quote
        } else if is_operator_char(c) {
            CharClass::Operator
        } else if is_delimiter_char(c) {
            CharClass::Delimiter
        } else if is_whitespace(c) {
            CharClass::Whitespace
        } else {
            CharClass::Other
        }
    }

    /// Whether a token can start with this class
    pub fn starts_token(&self) -> bool {
        !matches!(self, CharClass::Whitespace | CharClass::Other)
    }
}

pub fn classify(c: char) -> CharClass {
    CharClass::of(c)
}

/// Category Nd
pub fn is_decimal_digit(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_digit();
    }
    matches!(get_general_category(c), GeneralCategory::DecimalNumber)
}

/// Categories Lu, Ll, Lt, Lm and Lo
pub fn is_letter(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_alphabetic();
    }
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// Space, line and paragraph separators other than the no-break spaces,
/// plus the ASCII control whitespace and the four information separators
pub fn is_whitespace(c: char) -> bool {
    match c {
        '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | '\u{1C}'..='\u{1F}' => true,
        '\u{A0}' | '\u{2007}' | '\u{202F}' => false,
        _ => matches!(
            get_general_category(c),
            GeneralCategory::SpaceSeparator
                | GeneralCategory::LineSeparator
                | GeneralCategory::ParagraphSeparator
        ),
    }
}

/// Characters that continue a word once it has started on a letter
pub fn is_word_continue(c: char) -> bool {
    c == '_' || is_letter(c) || is_decimal_digit(c)
}
