// File: src/lib.rs
//! Intel RDRAND/RDSEED hardware random numbers.
//!
//! [`detect`] reads the CPU capability bits once per process. A
//! [`Generator`] draws single 32- or 64-bit words with bounded retry, and
//! [`Generator::fill`] assembles them into byte buffers of any length.
//!
//! The output is raw hardware randomness with no conditioning or health
//! testing applied in software. No locks are taken: the instructions carry
//! no shared software state, so a `Generator<HardwareSource>` can be used
//! from any number of threads.

pub mod assembler;
pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod format;
pub mod generator;
pub mod logging;
pub mod rng;
pub mod source;
pub mod types;

pub use assembler::{select_family, Fill};
pub use detect::{detect, SupportFlags};
pub use error::{Error, Result};
pub use format::to_hex_string;
pub use generator::{Generator, RETRY_LIMIT};
pub use rng::HardwareRng;
pub use source::{HardwareSource, ScriptedSource, WordSource};
pub use types::{Family, Width, Word};

/// Fills `requested` bytes from the executing CPU's hardware generator.
///
/// Shorthand for `Generator::new().fill(requested, prefer_rdseed)`.
pub fn fill(requested: usize, prefer_rdseed: bool) -> Fill {
    Generator::new().fill(requested, prefer_rdseed)
}
