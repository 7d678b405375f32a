//! Mapping of library errors onto CLI diagnostics

use medida_common::MedidaError;

use crate::compare::CompareError;
use crate::config::ConfigError;
use crate::store::StoreError;
use crate::Error;

impl From<ConfigError> for MedidaError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NotFound(path) => MedidaError::ConfigNotFound { path },
            ConfigError::Io { path, source } => {
                MedidaError::io(format!("reading {}", path.display()), source)
            }
            ConfigError::Parse { path, message } => MedidaError::ConfigParsing { path, message },
            ConfigError::Invalid(invalid) => MedidaError::ConfigValue {
                field: invalid.field(),
                message: invalid.to_string(),
                suggestion: invalid.suggestion().to_string(),
            },
        }
    }
}

impl From<Error> for MedidaError {
    fn from(err: Error) -> Self {
        match err {
            Error::Config(config) => config.into(),
            Error::Store(store) => MedidaError::Store { message: store.to_string() },
            Error::Compare(compare) => MedidaError::Comparison { message: compare.to_string() },
            Error::Validation(invalid) => MedidaError::Internal {
                message: format!("unreported validation failure: {invalid}"),
            },
        }
    }
}

impl From<StoreError> for MedidaError {
    fn from(err: StoreError) -> Self {
        Error::from(err).into()
    }
}

impl From<CompareError> for MedidaError {
    fn from(err: CompareError) -> Self {
        Error::from(err).into()
    }
}
