//! Consolidated error codes and classification system
//!
//! Single source of truth for every code the scanner emits and the metadata
//! attached to it.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    const fn new(
        code: Code,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code: code.0,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const CONFIGURATION_ERROR: Code = Code::new("ERR004");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

/// Lexical analysis codes
pub mod lexical {
    use super::Code;

    pub const UNRECOGNIZED_CHARACTER: Code = Code::new("E020");
    pub const UNTERMINATED_STRING: Code = Code::new("E021");
    pub const DIAGNOSTIC_LIMIT_REACHED: Code = Code::new("W020");
}

/// Output rendering codes
pub mod output {
    use super::Code;

    pub const SERIALIZATION_ERROR: Code = Code::new("E060");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    // File processing
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");

    // Lexical
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const LEXICAL_VALIDATION_PASSED: Code = Code::new("I021");

    // Pipeline
    pub const PIPELINE_COMPLETE: Code = Code::new("I030");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

static METADATA: &[ErrorMetadata] = &[
    ErrorMetadata::new(
        system::INTERNAL_ERROR,
        "System",
        Severity::Critical,
        false,
        true,
        "Critical internal system error",
        "File a bug report with the input that triggered it",
    ),
    ErrorMetadata::new(
        system::CONFIGURATION_ERROR,
        "System",
        Severity::High,
        false,
        true,
        "Runtime configuration could not be loaded",
        "Check the configuration file path and TOML syntax",
    ),
    ErrorMetadata::new(
        file_processing::FILE_NOT_FOUND,
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "File not found at specified path",
        "Check file path and ensure file exists",
    ),
    ErrorMetadata::new(
        file_processing::INVALID_EXTENSION,
        "FileProcessing",
        Severity::Low,
        true,
        false,
        "File does not have the required extension",
        "Rename the file or relax the required extension setting",
    ),
    ErrorMetadata::new(
        file_processing::FILE_TOO_LARGE,
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "File exceeds the compiled maximum size",
        "Split the input or rebuild with a larger max_file_size",
    ),
    ErrorMetadata::new(
        file_processing::PERMISSION_DENIED,
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "Insufficient permissions to read file",
        "Check file permissions",
    ),
    ErrorMetadata::new(
        file_processing::INVALID_ENCODING,
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "File content is not valid UTF-8",
        "Re-encode the file as UTF-8",
    ),
    ErrorMetadata::new(
        file_processing::IO_ERROR,
        "FileProcessing",
        Severity::High,
        false,
        true,
        "I/O error while reading file",
        "Check disk health and retry",
    ),
    ErrorMetadata::new(
        file_processing::INVALID_PATH,
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "Path is empty or is not a regular file",
        "Provide the path of a regular file",
    ),
    ErrorMetadata::new(
        lexical::UNRECOGNIZED_CHARACTER,
        "Lexical",
        Severity::Low,
        true,
        false,
        "Character is not part of any token class",
        "Remove the character or scan in lenient mode",
    ),
    ErrorMetadata::new(
        lexical::UNTERMINATED_STRING,
        "Lexical",
        Severity::Medium,
        true,
        false,
        "String literal is missing its closing quote",
        "Add the closing double quote",
    ),
    ErrorMetadata::new(
        lexical::DIAGNOSTIC_LIMIT_REACHED,
        "Lexical",
        Severity::Low,
        true,
        false,
        "Further diagnostics were counted but not stored",
        "Fix the reported problems and rescan",
    ),
    ErrorMetadata::new(
        output::SERIALIZATION_ERROR,
        "Output",
        Severity::High,
        false,
        true,
        "Scan result could not be serialized",
        "Report the input that triggered the failure",
    ),
    ErrorMetadata::new(
        success::SYSTEM_INITIALIZATION_COMPLETED,
        "Success",
        Severity::Low,
        true,
        false,
        "Logging system initialized",
        "No action required",
    ),
    ErrorMetadata::new(
        success::FILE_PROCESSING_SUCCESS,
        "Success",
        Severity::Low,
        true,
        false,
        "File loaded successfully",
        "Continue to lexical analysis",
    ),
    ErrorMetadata::new(
        success::TOKENIZATION_COMPLETE,
        "Success",
        Severity::Low,
        true,
        false,
        "Tokenization completed",
        "No action required",
    ),
    ErrorMetadata::new(
        success::LEXICAL_VALIDATION_PASSED,
        "Success",
        Severity::Low,
        true,
        false,
        "Strict scan found no diagnostics",
        "No action required",
    ),
    ErrorMetadata::new(
        success::PIPELINE_COMPLETE,
        "Success",
        Severity::Low,
        true,
        false,
        "Pipeline finished for one input",
        "No action required",
    ),
];

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, &'static ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, &'static ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| METADATA.iter().map(|m| (m.code, m)).collect())
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code).copied()
}

/// Get severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for code
pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
