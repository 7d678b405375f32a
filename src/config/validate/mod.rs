//! Configuration validation
//!
//! Validates engine configuration for correctness before use.

mod error;
mod validator;

#[cfg(test)]
mod proptests;

pub use error::ValidationError;
pub use validator::validate_config;
