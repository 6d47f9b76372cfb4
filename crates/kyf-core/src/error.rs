use thiserror::Error;

/// Errors raised while collecting and validating fan input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("CPF must have exactly 11 digits (got {digits})")]
    InvalidCpf { digits: usize },

    #[error("unknown interest: {0}")]
    UnknownInterest(String),

    #[error("unknown form field: {0}")]
    UnknownField(String),

    #[error("unsupported file type \"{mime_type}\" for {file_name}: only images are accepted")]
    UnsupportedFileType { file_name: String, mime_type: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
