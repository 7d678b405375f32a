//! Shared infrastructure for medida CLI tools.
//!
//! This crate provides common utilities used by the medida binary:
//! - Error handling with actionable diagnostics
//! - Output format selection for command results
//!
//! # Toyota Way Principles
//!
//! - **Jidoka**: Rich error messages with actionable diagnostics
//! - **Muda Elimination**: Single source of truth for shared code

pub mod cli;
pub mod error;

pub use cli::OutputFormat;
pub use error::{MedidaError, Result};
