// File: src/generator.rs
//! # Word Generator
//!
//! Produces one hardware random word per call, retrying transient failures.
//!
//! RDRAND and RDSEED may legitimately report failure when the on-chip
//! conditioner has no fresh output yet. That is a property of the hardware,
//! not a software fault, so each draw gets [`RETRY_LIMIT`] attempts before it
//! is reported as [`Error::RetryExhausted`]. The limit is the value the
//! hardware vendor recommends for RDRAND and must not be changed casually.

use crate::detect::SupportFlags;
use crate::error::{Error, Result};
use crate::source::{HardwareSource, WordSource};
use crate::types::{Family, Width, Word};

/// Maximum number of instruction executions per word.
pub const RETRY_LIMIT: usize = 10;

/// Runs `op` at most `attempts` times and returns its first `Some`.
pub fn retry<T>(attempts: usize, mut op: impl FnMut() -> Option<T>) -> Option<T> {
    (0..attempts).find_map(|_| op())
}

/// Draws hardware random words from a [`WordSource`].
///
/// Support flags are read from the source once at construction and never
/// change afterwards.
#[derive(Debug, Clone)]
pub struct Generator<S = HardwareSource> {
    source: S,
    support: SupportFlags,
}

impl Generator<HardwareSource> {
    /// Generator over the executing CPU.
    pub fn new() -> Self {
        Self::with_source(HardwareSource)
    }
}

impl Default for Generator<HardwareSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: WordSource> Generator<S> {
    pub fn with_source(source: S) -> Self {
        let support = source.support();
        Self { source, support }
    }

    pub fn support(&self) -> SupportFlags {
        self.support
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Draws one word of the given family and width.
    pub fn draw(&self, family: Family, width: Width) -> Result<Word> {
        match width {
            Width::W32 => self.draw32(family).map(Word::U32),
            Width::W64 => self.draw64(family).map(Word::U64),
        }
    }

    pub fn draw32(&self, family: Family) -> Result<u32> {
        self.ensure_supported(family)?;
        retry(RETRY_LIMIT, || self.source.step32(family)).ok_or(Error::RetryExhausted {
            family,
            width: Width::W32,
            attempts: RETRY_LIMIT,
        })
    }

    pub fn draw64(&self, family: Family) -> Result<u64> {
        self.ensure_supported(family)?;
        retry(RETRY_LIMIT, || self.source.step64(family)).ok_or(Error::RetryExhausted {
            family,
            width: Width::W64,
            attempts: RETRY_LIMIT,
        })
    }

    pub fn rdrand32(&self) -> Result<u32> {
        self.draw32(Family::Rdrand)
    }

    pub fn rdrand64(&self) -> Result<u64> {
        self.draw64(Family::Rdrand)
    }

    pub fn rdseed32(&self) -> Result<u32> {
        self.draw32(Family::Rdseed)
    }

    pub fn rdseed64(&self) -> Result<u64> {
        self.draw64(Family::Rdseed)
    }

    fn ensure_supported(&self, family: Family) -> Result<()> {
        if self.support.supports(family) {
            Ok(())
        } else {
            Err(Error::UnsupportedInstruction(family))
        }
    }
}
