// File: src/types.rs
//! Shared vocabulary: which instruction produced a word, and how wide it is.

use std::fmt;

/// Hardware random instruction family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// On-chip DRBG reseeded from the hardware entropy source.
    Rdrand,
    /// Conditioned output taken directly from the entropy source.
    Rdseed,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Rdrand => f.write_str("RDRAND"),
            Family::Rdseed => f.write_str("RDSEED"),
        }
    }
}

/// Width of a single hardware draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    W32,
    W64,
}

impl Width {
    /// Number of bytes in a word of this width.
    pub const fn bytes(self) -> usize {
        match self {
            Width::W32 => 4,
            Width::W64 => 8,
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Width::W32 => f.write_str("32-bit"),
            Width::W64 => f.write_str("64-bit"),
        }
    }
}

/// A word produced by one successful hardware draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Word {
    U32(u32),
    U64(u64),
}

impl Word {
    pub fn width(&self) -> Width {
        match self {
            Word::U32(_) => Width::W32,
            Word::U64(_) => Width::W64,
        }
    }

    /// Widens the word to 64 bits without changing its value.
    pub fn as_u64(&self) -> u64 {
        match *self {
            Word::U32(v) => u64::from(v),
            Word::U64(v) => v,
        }
    }
}
