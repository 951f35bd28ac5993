// File: src/detect.rs
//! # Feature Detection
//!
//! Reads the RDRAND and RDSEED capability bits from CPUID once per process.
//! The answer cannot change while the process runs, so it is cached in a
//! `OnceLock` and every later call is a plain load.
//!
//! On targets other than x86_64 both flags read false.

use std::sync::OnceLock;

use crate::types::Family;

/// Which hardware random instructions the executing CPU implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SupportFlags {
    pub rdrand_available: bool,
    pub rdseed_available: bool,
}

impl SupportFlags {
    /// Neither instruction available.
    pub const NONE: SupportFlags = SupportFlags::new(false, false);

    pub const fn new(rdrand_available: bool, rdseed_available: bool) -> Self {
        Self {
            rdrand_available,
            rdseed_available,
        }
    }

    /// Returns whether `family` may be executed.
    pub fn supports(&self, family: Family) -> bool {
        match family {
            Family::Rdrand => self.rdrand_available,
            Family::Rdseed => self.rdseed_available,
        }
    }

    /// Returns true if at least one instruction is available.
    pub fn any(&self) -> bool {
        self.rdrand_available || self.rdseed_available
    }
}

static SUPPORT: OnceLock<SupportFlags> = OnceLock::new();

/// Queries the CPU on first call and returns the cached flags afterwards.
pub fn detect() -> SupportFlags {
    *SUPPORT.get_or_init(query_cpu)
}

#[cfg(target_arch = "x86_64")]
#[allow(unused_unsafe)]
fn query_cpu() -> SupportFlags {
    use std::arch::x86_64::{__cpuid, __cpuid_count, __get_cpuid_max};

    const RDRAND_ECX_BIT: u32 = 1 << 30;
    const RDSEED_EBX_BIT: u32 = 1 << 18;

    // SAFETY: CPUID is available on every x86_64 processor.
    let (max_leaf, _) = unsafe { __get_cpuid_max(0) };

    let rdrand_available = if max_leaf >= 1 {
        // SAFETY: leaf 1 is within the range reported by leaf 0.
        let leaf1 = unsafe { __cpuid(1) };
        leaf1.ecx & RDRAND_ECX_BIT != 0
    } else {
        false
    };

    let rdseed_available = if max_leaf >= 7 {
        // SAFETY: leaf 7 is within the range reported by leaf 0.
        let leaf7 = unsafe { __cpuid_count(7, 0) };
        leaf7.ebx & RDSEED_EBX_BIT != 0
    } else {
        false
    };

    SupportFlags::new(rdrand_available, rdseed_available)
}

#[cfg(not(target_arch = "x86_64"))]
fn query_cpu() -> SupportFlags {
    SupportFlags::NONE
}
