use crate::config::runtime::ConfigError;
use crate::file_processor::FileProcessorError;
use crate::lexical::LexerError;
use crate::logging::{codes, Code};

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Lexical analysis failed: {0}")]
    LexicalAnalysis(#[from] LexerError),

    #[error("Configuration failed: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Output serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            PipelineError::FileProcessing(e) => e.error_code(),
            PipelineError::LexicalAnalysis(e) => e.error_code(),
            PipelineError::Configuration(e) => e.error_code(),
            PipelineError::Serialization(_) => codes::output::SERIALIZATION_ERROR,
            PipelineError::Pipeline { .. } => codes::system::INTERNAL_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_pipeline_error_creation() {
        let error = PipelineError::pipeline_error("Test error");
        assert_matches!(&error, PipelineError::Pipeline { message } if message == "Test error");
        assert_eq!(error.error_code(), codes::system::INTERNAL_ERROR);
    }

    #[test]
    fn test_layer_errors_keep_their_codes() {
        let error: PipelineError = LexerError::UnterminatedString { offset: 3 }.into();
        assert_eq!(error.error_code(), codes::lexical::UNTERMINATED_STRING);
        assert!(error.to_string().starts_with("Lexical analysis failed"));

        let error: PipelineError = FileProcessorError::FileNotFound {
            path: "x".to_string(),
        }
        .into();
        assert_eq!(error.error_code(), codes::file_processing::FILE_NOT_FOUND);
    }
}
