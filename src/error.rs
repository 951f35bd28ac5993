// File: src/error.rs
//! Error types for hardware random generation.
//!
//! None of these are fatal: a caller can retry the whole request, ask for
//! fewer bytes, or switch instruction family.

use thiserror::Error;

use crate::types::{Family, Width};

/// The main error type for the library
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The requested instruction family is not implemented by this CPU.
    /// No instruction was executed.
    #[error("{0} is not supported by this CPU")]
    UnsupportedInstruction(Family),

    /// The instruction is present but reported failure on every attempt.
    #[error("{family} {width} draw failed after {attempts} attempts")]
    RetryExhausted {
        family: Family,
        width: Width,
        attempts: usize,
    },

    /// Neither RDRAND nor RDSEED is available.
    #[error("CPU does not support a hardware random number generator")]
    NoHardwareSupport,
}

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
