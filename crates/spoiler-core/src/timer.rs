//! Cycle-accurate timing of a single memory access.
//!
//! [`AccessTimer`] is the capability the sweep relies on: time exactly one read of an
//! address, with serializing counter reads on both sides so that out-of-order execution
//! can neither hide nor inflate the latency of that read.
//!
//! The only hardware implementation is [`RdtscpTimer`] (x86_64). There is no fallback
//! clock: on targets without `rdtscp`, [`construct_access_timer`] fails with
//! [`TimerError::Unsupported`] instead of handing out a coarser timer whose readings would
//! be meaningless against the outlier threshold.

use thiserror::Error;

/// Errors returned when constructing the platform timer.
#[derive(Debug, Error)]
pub enum TimerError {
    /// No serializing cycle counter is available on this CPU or architecture.
    #[error("no serializing cycle counter available: {0}")]
    Unsupported(&'static str),
}

/// Times a single memory read.
pub trait AccessTimer {
    /// Returns the number of cycles elapsed while reading `addr` once.
    ///
    /// The result is the wrapping difference of the lower 32 bits of both counter
    /// readings. It cannot fail, but it may be meaningless if the thread was preempted
    /// or interrupted while the read was in flight. Callers filter such samples.
    ///
    /// # Safety
    ///
    /// `addr` must be valid for reads.
    unsafe fn time_access(&self, addr: *const u8) -> u32;
}

impl<T: AccessTimer + ?Sized> AccessTimer for Box<T> {
    unsafe fn time_access(&self, addr: *const u8) -> u32 {
        unsafe { (**self).time_access(addr) }
    }
}

/// `rdtscp`-based access timer.
///
/// Executes `rdtscp`, one volatile load, `rdtscp`, `mfence`.
#[cfg(target_arch = "x86_64")]
#[derive(Debug)]
pub struct RdtscpTimer {
    _private: (),
}

#[cfg(target_arch = "x86_64")]
impl RdtscpTimer {
    /// Creates the timer after checking CPUID for `rdtscp` support.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::Unsupported`] if the CPU does not report `rdtscp`.
    pub fn new() -> Result<Self, TimerError> {
        let cpuid = x86::cpuid::CpuId::new();
        let has_rdtscp = cpuid
            .get_extended_processor_and_feature_identifiers()
            .is_some_and(|f| f.has_rdtscp());
        if !has_rdtscp {
            return Err(TimerError::Unsupported("CPU does not support rdtscp"));
        }
        Ok(Self { _private: () })
    }
}

#[cfg(target_arch = "x86_64")]
impl AccessTimer for RdtscpTimer {
    #[inline(always)]
    unsafe fn time_access(&self, addr: *const u8) -> u32 {
        use core::arch::x86_64::{__rdtscp, _mm_mfence};
        let mut aux = 0;
        unsafe {
            let start = __rdtscp(&mut aux);
            core::ptr::read_volatile(addr);
            let end = __rdtscp(&mut aux);
            _mm_mfence();
            (end as u32).wrapping_sub(start as u32)
        }
    }
}

/// Constructs the access timer for the current platform.
///
/// # Errors
///
/// Returns [`TimerError::Unsupported`] on architectures other than x86_64 and on x86_64
/// CPUs without `rdtscp`.
pub fn construct_access_timer() -> Result<Box<dyn AccessTimer>, TimerError> {
    #[cfg(target_arch = "x86_64")]
    return Ok(Box::new(RdtscpTimer::new()?));
    #[cfg(not(target_arch = "x86_64"))]
    Err(TimerError::Unsupported("only x86_64 is supported"))
}
