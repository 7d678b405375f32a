//! Error types with actionable diagnostics (Andon principle).
//!
//! All errors include contextual information to help users resolve issues
//! without needing to consult external documentation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for medida CLI operations.
pub type Result<T> = std::result::Result<T, MedidaError>;

/// Errors surfaced by medida CLI tools.
///
/// Each variant includes actionable context following the Andon principle
/// of making problems immediately visible and actionable.
#[derive(Error, Debug)]
pub enum MedidaError {
    /// Configuration file not found at expected path.
    #[error("Configuration file not found: {path}\n  → Create a config file or drop --config to use the built-in metric registry")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file has invalid syntax.
    #[error("Invalid configuration syntax in {path}:\n  {message}\n  → Check YAML syntax at the indicated line")]
    ConfigParsing { path: PathBuf, message: String },

    /// Configuration value is invalid.
    #[error("Invalid configuration value for '{field}': {message}\n  → {suggestion}")]
    ConfigValue { field: String, message: String, suggestion: String },

    /// Benchmark input file not found.
    #[error("Input file not found: {path}\n  → Export the benchmark rows as JSON and pass the file path")]
    InputNotFound { path: PathBuf },

    /// Benchmark input could not be decoded.
    #[error("Invalid benchmark input in {path}:\n  {message}\n  → Expected a JSON array of rows or an object with a 'sections' list")]
    InputParsing { path: PathBuf, message: String },

    /// Rows were rejected and the run asked for a clean batch.
    #[error("{count} row(s) rejected during ingest\n  → Fix the rows listed above or drop --strict")]
    RowsRejected { count: usize },

    /// Store rejected an operation.
    #[error("Store error: {message}\n  → Use --policy supersede to replace active records, or --policy skip to keep them")]
    Store { message: String },

    /// Comparison could not be computed.
    #[error("Comparison error: {message}\n  → Register the metric polarity under 'metrics:' in the config file")]
    Comparison { message: String },

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic error for unexpected conditions.
    #[error("Internal error: {message}\n  → Please report this bug at https://github.com/paiml/medida/issues")]
    Internal { message: String },
}

impl MedidaError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Check if this error is user-recoverable.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. }
                | Self::ConfigParsing { .. }
                | Self::ConfigValue { .. }
                | Self::InputNotFound { .. }
                | Self::InputParsing { .. }
                | Self::RowsRejected { .. }
                | Self::Store { .. }
                | Self::Comparison { .. }
        )
    }

    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigNotFound { .. } => "E001",
            Self::ConfigParsing { .. } => "E002",
            Self::ConfigValue { .. } => "E003",
            Self::InputNotFound { .. } => "E010",
            Self::InputParsing { .. } => "E011",
            Self::RowsRejected { .. } => "E012",
            Self::Store { .. } => "E020",
            Self::Comparison { .. } => "E030",
            Self::Io { .. } => "E050",
            Self::Serialization { .. } => "E051",
            Self::Internal { .. } => "E999",
        }
    }
}

impl From<serde_json::Error> for MedidaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization { message: err.to_string() }
    }
}

impl From<serde_yaml::Error> for MedidaError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization { message: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_errors() -> Vec<MedidaError> {
        vec![
            MedidaError::ConfigNotFound { path: "".into() },
            MedidaError::ConfigParsing { path: "".into(), message: "".into() },
            MedidaError::ConfigValue {
                field: "".into(),
                message: "".into(),
                suggestion: "".into(),
            },
            MedidaError::InputNotFound { path: "".into() },
            MedidaError::InputParsing { path: "".into(), message: "".into() },
            MedidaError::RowsRejected { count: 0 },
            MedidaError::Store { message: "".into() },
            MedidaError::Comparison { message: "".into() },
            MedidaError::io("", std::io::Error::other("x")),
            MedidaError::Serialization { message: "".into() },
            MedidaError::Internal { message: "".into() },
        ]
    }

    #[test]
    fn test_error_codes_are_unique() {
        let errors = all_errors();
        let codes: Vec<_> = errors.iter().map(MedidaError::code).collect();
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }

    #[test]
    fn test_all_error_codes_start_with_e() {
        for err in all_errors() {
            assert!(err.code().starts_with('E'));
        }
    }

    #[test]
    fn test_user_errors_are_recoverable() {
        assert!(MedidaError::ConfigNotFound { path: "".into() }.is_user_error());
        assert!(MedidaError::Store { message: "dup".into() }.is_user_error());
        assert!(!MedidaError::Internal { message: "".into() }.is_user_error());
        assert!(!MedidaError::Serialization { message: "".into() }.is_user_error());
    }

    #[test]
    fn test_io_error_constructor() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = MedidaError::io("reading rows.json", io_err);

        assert!(matches!(err, MedidaError::Io { .. }));
        assert!(err.to_string().contains("reading rows.json"));
    }

    #[test]
    fn test_config_value_error_includes_suggestion() {
        let err = MedidaError::ConfigValue {
            field: "validation.scale_tolerance".into(),
            message: "must be positive".into(),
            suggestion: "Use a value like 0.5".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("validation.scale_tolerance"));
        assert!(msg.contains("must be positive"));
        assert!(msg.contains("Use a value like 0.5"));
    }

    #[test]
    fn test_store_error_mentions_policies() {
        let msg = MedidaError::Store { message: "duplicate".into() }.to_string();
        assert!(msg.contains("supersede"));
        assert!(msg.contains("skip"));
    }

    #[test]
    fn test_json_error_converts_to_serialization() {
        let json_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err: MedidaError = json_err.into();
        assert!(matches!(err, MedidaError::Serialization { .. }));
    }

    #[test]
    fn test_internal_error_mentions_bug_report() {
        let msg = MedidaError::Internal { message: "unexpected state".into() }.to_string();
        assert!(msg.contains("github.com"));
        assert!(msg.contains("issues"));
    }
}
