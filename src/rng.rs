// File: src/rng.rs
//! `rand` integration: hardware words behind the `RngCore` interface.

use rand::{CryptoRng, Error, RngCore};

use crate::assembler::select_family;
use crate::error::Error as HwError;
use crate::generator::Generator;
use crate::source::{HardwareSource, WordSource};

/// A `RngCore` backed directly by RDRAND or RDSEED.
///
/// The infallible `RngCore` methods panic if the hardware cannot deliver,
/// the same way `rand`'s OS-backed generators do. Use `try_fill_bytes`
/// to handle failure.
pub struct HardwareRng<S = HardwareSource> {
    generator: Generator<S>,
    prefer_rdseed: bool,
}

impl HardwareRng<HardwareSource> {
    /// RDRAND on the executing CPU.
    pub fn rdrand() -> Self {
        Self::with_generator(Generator::new(), false)
    }

    /// RDSEED on the executing CPU, falling back to RDRAND.
    pub fn rdseed() -> Self {
        Self::with_generator(Generator::new(), true)
    }
}

impl Default for HardwareRng<HardwareSource> {
    fn default() -> Self {
        Self::rdrand()
    }
}

impl<S: WordSource> HardwareRng<S> {
    pub fn with_generator(generator: Generator<S>, prefer_rdseed: bool) -> Self {
        Self {
            generator,
            prefer_rdseed,
        }
    }

    pub fn generator(&self) -> &Generator<S> {
        &self.generator
    }

    pub fn try_next_u32(&self) -> Result<u32, HwError> {
        let family = select_family(self.generator.support(), self.prefer_rdseed)
            .ok_or(HwError::NoHardwareSupport)?;
        self.generator.draw32(family)
    }

    pub fn try_next_u64(&self) -> Result<u64, HwError> {
        let family = select_family(self.generator.support(), self.prefer_rdseed)
            .ok_or(HwError::NoHardwareSupport)?;
        self.generator.draw64(family)
    }
}

impl<S: WordSource> RngCore for HardwareRng<S> {
    fn next_u32(&mut self) -> u32 {
        self.try_next_u32()
            .unwrap_or_else(|e| panic!("hardware random generation failed: {e}"))
    }

    fn next_u64(&mut self) -> u64 {
        self.try_next_u64()
            .unwrap_or_else(|e| panic!("hardware random generation failed: {e}"))
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(e) = self.try_fill_bytes(dest) {
            panic!("hardware random generation failed: {e}");
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        let bytes = self
            .generator
            .fill(dest.len(), self.prefer_rdseed)
            .into_result()
            .map_err(Error::new)?;
        dest.copy_from_slice(&bytes);
        Ok(())
    }
}

impl<S: WordSource> CryptoRng for HardwareRng<S> {}
