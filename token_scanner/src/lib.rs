//! Single-pass lexical scanner producing classified token sequences
//!
//! Source text becomes a flat list of NUMBER, WORD, STRING, OPERATOR and
//! DELIMITER tokens. Whitespace is skipped; unterminated strings and
//! unrecognized characters are dropped and reported as diagnostics.
//!
//! ```
//! use token_scanner::{Scanner, Token};
//!
//! let tokens = Scanner::new("x >= 10").analyze();
//! assert_eq!(tokens[1], Token::operator(">="));
//! ```

// Internal modules
pub mod config;
pub mod file_processor;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use config::{RuntimeConfig, ScanMode};
pub use lexical::{LexerError, ScanOutput, Scanner};
pub use pipeline::{PipelineError, PipelineResult};
pub use tokens::{Token, TokenKind};

pub use pipeline::output::PipelineOutput;
