//! Shared error type.
//!
//! Downstream crates define their own error enums and wrap `HlError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors raised before a simulation run starts.
#[derive(Debug, Error, PartialEq)]
pub enum HlError {
    /// A configuration value is out of range.  Fatal to that run; no
    /// simulation state has been created yet.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid virtual time: {0}")]
    InvalidTime(f64),
}

/// Shorthand result type for all `hl-*` crates.
pub type HlResult<T> = Result<T, HlError>;
