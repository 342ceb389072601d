//! Sub-scanners for each token class
//!
//! Each function takes the full source and the byte offset of the token's
//! first character, and returns the token together with the offset just past
//! it. The caller guarantees `start` is a character boundary whose character
//! belongs to the scanner's class.

use super::classify::{is_decimal_digit, is_word_continue};
use crate::tokens::{is_two_char_operator, Token};

/// Offset of the first character at or after `start` that fails `keep`
fn take_while<F>(source: &str, start: usize, keep: F) -> usize
where
    F: Fn(char) -> bool,
{
    source[start..]
        .char_indices()
        .find(|&(_, c)| !keep(c))
        .map(|(i, _)| start + i)
        .unwrap_or(source.len())
}

/// Maximal run of decimal digits, in any script
pub fn scan_number(source: &str, start: usize) -> (Token, usize) {
    let end = take_while(source, start, is_decimal_digit);
    (Token::number(&source[start..end]), end)
}

/// Letter followed by letters, digits or underscores
pub fn scan_word(source: &str, start: usize) -> (Token, usize) {
    let first_len = source[start..].chars().next().map_or(0, char::len_utf8);
    let end = take_while(source, start + first_len, is_word_continue);
    (Token::word(&source[start..end]), end)
}

/// Double-quoted literal without escapes.
///
/// Returns `None` when no closing quote follows; the literal then runs to the
/// end of the source.
pub fn scan_string(source: &str, start: usize) -> Option<(Token, usize)> {
    let body_start = start + '"'.len_utf8();
    let close = source[body_start..].find('"')?;
    let body_end = body_start + close;
    Some((
        Token::string(&source[body_start..body_end]),
        body_end + '"'.len_utf8(),
    ))
}

/// One- or two-character operator, two only on exact table membership
pub fn scan_operator(source: &str, start: usize) -> (Token, usize) {
    let mut chars = source[start..].chars();
    let first_len = chars.next().map_or(0, char::len_utf8);

    if let Some(second) = chars.next() {
        let pair_end = start + first_len + second.len_utf8();
        if is_two_char_operator(&source[start..pair_end]) {
            return (Token::operator(&source[start..pair_end]), pair_end);
        }
    }

    let end = start + first_len;
    (Token::operator(&source[start..end]), end)
}

/// Single delimiter character
pub fn scan_delimiter(source: &str, start: usize) -> (Token, usize) {
    let end = start + source[start..].chars().next().map_or(0, char::len_utf8);
    (Token::delimiter(&source[start..end]), end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_number_stops_at_non_digit() {
        assert_eq!(scan_number("123abc", 0), (Token::number("123"), 3));
        assert_eq!(scan_number("x=42;", 2), (Token::number("42"), 4));
        assert_eq!(scan_number("3.14", 0), (Token::number("3"), 1));
        assert_eq!(scan_number("007", 0), (Token::number("007"), 3));
    }

    #[test]
    fn test_scan_number_mixes_scripts() {
        assert_eq!(scan_number("12\u{0663}4 x", 0), (Token::number("12\u{0663}4"), 5));
        assert_eq!(scan_number("9\u{00B2}", 0), (Token::number("9"), 1));
    }

    #[test]
    fn test_scan_word_stops_at_other_numerics() {
        assert_eq!(scan_word("x\u{00B2}", 0), (Token::word("x"), 1));
        assert_eq!(scan_word("v\u{0663}_2", 0), (Token::word("v\u{0663}_2"), 5));
    }

    #[test]
    fn test_scan_word_takes_digits_and_underscores() {
        assert_eq!(scan_word("foo_bar9 baz", 0), (Token::word("foo_bar9"), 8));
        assert_eq!(scan_word("a==b", 3), (Token::word("b"), 4));
        assert_eq!(scan_word("día-1", 0), (Token::word("día"), 4));
        assert_eq!(scan_word("x.y", 0), (Token::word("x"), 1));
    }

    #[test]
    fn test_scan_string_closed_and_empty() {
        assert_eq!(scan_string("\"hello\" rest", 0), Some((Token::string("hello"), 7)));
        assert_eq!(scan_string("\"\"", 0), Some((Token::string(""), 2)));
        assert_eq!(
            scan_string("\"a b\\\" c", 0),
            Some((Token::string("a b\\"), 6))
        );
    }

    #[test]
    fn test_scan_string_unterminated() {
        assert_eq!(scan_string("\"unterminated", 0), None);
        assert_eq!(scan_string("\"", 0), None);
    }

    #[test]
    fn test_scan_operator_exact_pairs() {
        assert_eq!(scan_operator("==", 0), (Token::operator("=="), 2));
        assert_eq!(scan_operator("===", 0), (Token::operator("=="), 2));
        assert_eq!(scan_operator("===", 2), (Token::operator("="), 3));
        assert_eq!(scan_operator("=!", 0), (Token::operator("="), 1));
        assert_eq!(scan_operator("+=", 0), (Token::operator("+"), 1));
        assert_eq!(scan_operator("||x", 0), (Token::operator("||"), 2));
        assert_eq!(scan_operator("-", 0), (Token::operator("-"), 1));
        assert_eq!(scan_operator("<é", 0), (Token::operator("<"), 1));
    }

    #[test]
    fn test_scan_delimiter() {
        assert_eq!(scan_delimiter("(x)", 0), (Token::delimiter("("), 1));
        assert_eq!(scan_delimiter("x;", 1), (Token::delimiter(";"), 2));
    }
}
