// File: src/source.rs
//! Word sources: one attempt of a hardware draw instruction per call.
//!
//! [`HardwareSource`] executes the real RDRAND/RDSEED instructions.
//! [`ScriptedSource`] is a deterministic stand-in with injectable support
//! flags and failures, so retry, truncation and fallback logic can be
//! exercised without the silicon.

use std::cell::{Cell, RefCell};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::detect::{detect, SupportFlags};
use crate::types::{Family, Word};

/// A single-attempt source of hardware random words.
///
/// Each `step` call corresponds to exactly one execution of the underlying
/// instruction and returns `None` when that execution reported failure.
/// Implementations must return `None` without executing anything when the
/// family is not supported.
pub trait WordSource {
    /// Capabilities of this source.
    fn support(&self) -> SupportFlags;

    fn step32(&self, family: Family) -> Option<u32>;

    fn step64(&self, family: Family) -> Option<u64>;
}

impl<S: WordSource + ?Sized> WordSource for &S {
    fn support(&self) -> SupportFlags {
        (**self).support()
    }

    fn step32(&self, family: Family) -> Option<u32> {
        (**self).step32(family)
    }

    fn step64(&self, family: Family) -> Option<u64> {
        (**self).step64(family)
    }
}

/// The executing CPU's RDRAND and RDSEED instructions.
///
/// Holds no state. RDRAND and RDSEED keep no software-visible state either,
/// so concurrent use from several threads needs no synchronisation here.
#[derive(Debug, Clone, Copy, Default)]
pub struct HardwareSource;

impl WordSource for HardwareSource {
    fn support(&self) -> SupportFlags {
        detect()
    }

    fn step32(&self, family: Family) -> Option<u32> {
        if !detect().supports(family) {
            return None;
        }
        hw::step32(family)
    }

    fn step64(&self, family: Family) -> Option<u64> {
        if !detect().supports(family) {
            return None;
        }
        hw::step64(family)
    }
}

#[cfg(target_arch = "x86_64")]
mod hw {
    use std::arch::x86_64::{_rdrand32_step, _rdrand64_step, _rdseed32_step, _rdseed64_step};

    use crate::types::Family;

    // Callers check `detect()` before entering any of these.

    #[target_feature(enable = "rdrand")]
    unsafe fn rdrand32() -> Option<u32> {
        let mut value = 0;
        (_rdrand32_step(&mut value) == 1).then_some(value)
    }

    #[target_feature(enable = "rdrand")]
    unsafe fn rdrand64() -> Option<u64> {
        let mut value = 0;
        (_rdrand64_step(&mut value) == 1).then_some(value)
    }

    #[target_feature(enable = "rdseed")]
    unsafe fn rdseed32() -> Option<u32> {
        let mut value = 0;
        (_rdseed32_step(&mut value) == 1).then_some(value)
    }

    #[target_feature(enable = "rdseed")]
    unsafe fn rdseed64() -> Option<u64> {
        let mut value = 0;
        (_rdseed64_step(&mut value) == 1).then_some(value)
    }

    pub(super) fn step32(family: Family) -> Option<u32> {
        // SAFETY: the caller verified the CPUID bit for `family`.
        unsafe {
            match family {
                Family::Rdrand => rdrand32(),
                Family::Rdseed => rdseed32(),
            }
        }
    }

    pub(super) fn step64(family: Family) -> Option<u64> {
        // SAFETY: the caller verified the CPUID bit for `family`.
        unsafe {
            match family {
                Family::Rdrand => rdrand64(),
                Family::Rdseed => rdseed64(),
            }
        }
    }
}

#[cfg(not(target_arch = "x86_64"))]
mod hw {
    use crate::types::Family;

    pub(super) fn step32(_family: Family) -> Option<u32> {
        None
    }

    pub(super) fn step64(_family: Family) -> Option<u64> {
        None
    }
}

/// Deterministic word source for tests and simulations.
///
/// Words come from a seeded `StdRng`. Every `step` call is counted per
/// family, including calls for unsupported families, so tests can assert
/// that no instruction was attempted. Failures are scripted: the next `n`
/// attempts fail, or every attempt fails.
#[derive(Debug)]
pub struct ScriptedSource {
    support: SupportFlags,
    rng: RefCell<StdRng>,
    pending_failures: Cell<usize>,
    always_fail: Cell<bool>,
    rdrand_calls: Cell<usize>,
    rdseed_calls: Cell<usize>,
    produced: RefCell<Vec<(Family, Word)>>,
}

impl ScriptedSource {
    pub fn new(support: SupportFlags) -> Self {
        Self {
            support,
            rng: RefCell::new(StdRng::seed_from_u64(0)),
            pending_failures: Cell::new(0),
            always_fail: Cell::new(false),
            rdrand_calls: Cell::new(0),
            rdseed_calls: Cell::new(0),
            produced: RefCell::new(Vec::new()),
        }
    }

    /// Reseeds the word stream.
    pub fn with_seed(self, seed: u64) -> Self {
        *self.rng.borrow_mut() = StdRng::seed_from_u64(seed);
        self
    }

    /// Makes the next `attempts` steps fail.
    pub fn failing_next(self, attempts: usize) -> Self {
        self.pending_failures.set(attempts);
        self
    }

    /// Makes every step fail.
    pub fn always_failing(self) -> Self {
        self.always_fail.set(true);
        self
    }

    /// Makes the next `attempts` steps fail, from now on.
    pub fn set_failures(&self, attempts: usize) {
        self.pending_failures.set(attempts);
    }

    pub fn set_always_fail(&self, always_fail: bool) {
        self.always_fail.set(always_fail);
    }

    /// Number of attempts made for `family` so far.
    pub fn calls(&self, family: Family) -> usize {
        match family {
            Family::Rdrand => self.rdrand_calls.get(),
            Family::Rdseed => self.rdseed_calls.get(),
        }
    }

    pub fn total_calls(&self) -> usize {
        self.rdrand_calls.get() + self.rdseed_calls.get()
    }

    /// Successful words in the order they were produced.
    pub fn produced(&self) -> Vec<(Family, Word)> {
        self.produced.borrow().clone()
    }

    fn attempt(&self, family: Family) -> bool {
        let counter = match family {
            Family::Rdrand => &self.rdrand_calls,
            Family::Rdseed => &self.rdseed_calls,
        };
        counter.set(counter.get() + 1);

        if !self.support.supports(family) || self.always_fail.get() {
            return false;
        }
        let pending = self.pending_failures.get();
        if pending > 0 {
            self.pending_failures.set(pending - 1);
            return false;
        }
        true
    }
}

impl WordSource for ScriptedSource {
    fn support(&self) -> SupportFlags {
        self.support
    }

    fn step32(&self, family: Family) -> Option<u32> {
        if !self.attempt(family) {
            return None;
        }
        let value = self.rng.borrow_mut().next_u32();
        self.produced.borrow_mut().push((family, Word::U32(value)));
        Some(value)
    }

    fn step64(&self, family: Family) -> Option<u64> {
        if !self.attempt(family) {
            return None;
        }
        let value = self.rng.borrow_mut().next_u64();
        self.produced.borrow_mut().push((family, Word::U64(value)));
        Some(value)
    }
}
