// File: src/assembler.rs
//! # Buffer Assembler
//!
//! Turns a stream of 64-bit hardware words into a byte buffer of exactly the
//! requested length.
//!
//! Instruction selection happens per word:
//!
//! 1. RDSEED, if it was asked for and the CPU has it.
//! 2. Otherwise RDRAND, if the CPU has it. When RDSEED was asked for this is
//!    a fallback, and [`Fill::fell_back`] reports it.
//! 3. Otherwise stop with [`Error::NoHardwareSupport`].
//!
//! Each word contributes its bytes least-significant first. The last word is
//! truncated to fit; its unused high bytes are dropped. The first failed draw
//! ends the fill, so a short buffer is how failure shows up.

use crate::detect::SupportFlags;
use crate::error::{Error, Result};
use crate::generator::Generator;
use crate::source::WordSource;
use crate::types::Family;

/// Upper bound on the up-front reservation. Larger fills grow as words arrive.
const MAX_PREALLOC: usize = 64 * 1024;

/// Picks the instruction for the next word, or `None` when nothing usable
/// is present.
pub fn select_family(support: SupportFlags, prefer_rdseed: bool) -> Option<Family> {
    if prefer_rdseed && support.rdseed_available {
        Some(Family::Rdseed)
    } else if support.rdrand_available {
        Some(Family::Rdrand)
    } else {
        None
    }
}

/// Outcome of a [`Generator::fill`] call.
///
/// `bytes` is never longer than `requested`. It is shorter only when
/// `error` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fill {
    bytes: Vec<u8>,
    requested: usize,
    family: Option<Family>,
    fell_back: bool,
    words_drawn: usize,
    error: Option<Error>,
}

impl Fill {
    fn with_capacity(requested: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(requested.min(MAX_PREALLOC)),
            requested,
            family: None,
            fell_back: false,
            words_drawn: 0,
            error: None,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn requested(&self) -> usize {
        self.requested
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// True when every requested byte was produced.
    pub fn is_complete(&self) -> bool {
        self.bytes.len() == self.requested
    }

    /// Instruction that produced the most recent word, if any was drawn.
    pub fn family(&self) -> Option<Family> {
        self.family
    }

    /// True when RDSEED was preferred but RDRAND had to be used instead.
    pub fn fell_back(&self) -> bool {
        self.fell_back
    }

    /// Number of successful 64-bit draws consumed.
    pub fn words_drawn(&self) -> usize {
        self.words_drawn
    }

    /// The error that cut the fill short.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Returns the bytes, or the error if the fill came up short.
    pub fn into_result(self) -> Result<Vec<u8>> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.bytes),
        }
    }
}

impl<S: WordSource> Generator<S> {
    /// Produces `requested` bytes of hardware randomness.
    ///
    /// Never fails outright: inspect [`Fill::is_complete`] or
    /// [`Fill::error`]. A zero-length request draws nothing.
    pub fn fill(&self, requested: usize, prefer_rdseed: bool) -> Fill {
        let mut fill = Fill::with_capacity(requested);

        while fill.bytes.len() < requested {
            let Some(family) = select_family(self.support(), prefer_rdseed) else {
                fill.error = Some(Error::NoHardwareSupport);
                break;
            };
            if prefer_rdseed && family == Family::Rdrand {
                fill.fell_back = true;
            }

            let word = match self.draw64(family) {
                Ok(word) => word,
                Err(e) => {
                    fill.error = Some(e);
                    break;
                }
            };

            let take = (requested - fill.bytes.len()).min(8);
            fill.bytes.extend_from_slice(&word.to_le_bytes()[..take]);
            fill.family = Some(family);
            fill.words_drawn += 1;
        }

        fill
    }
}
