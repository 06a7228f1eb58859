//! # Spoiler
//!
//! SPOILER page-sweep timing measurement. This crate re-exports [`spoiler_core`]; see its
//! documentation for the measurement itself.
//!
//! ```no_run
//! use spoiler::util::{MeasurementBuffer, Size};
//! use spoiler::{Spoiler, SweepConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut buffer = MeasurementBuffer::mmap(Size::MB(64), 0)?;
//! let probe = MeasurementBuffer::mmap(Size::KB(4), 0)?;
//! let spoiler = Spoiler::new(SweepConfig::default())?;
//! let measurement = spoiler.measure(buffer.as_mut_slice(), probe.page(0))?;
//! for (page, latency, diff) in measurement.measured_pages() {
//!     println!("{page}: {latency:?} (+{diff})");
//! }
//! # Ok(())
//! # }
//! ```

pub use spoiler_core::*;
