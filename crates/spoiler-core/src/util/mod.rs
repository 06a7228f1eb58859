//! Utility types and constants shared by the sweep and its callers.
//!
//! - [`Size`] - buffer size representation
//! - Page geometry and sweep defaults ([`PAGE_SIZE`], [`SPOILER_WINDOW`], etc.)
//! - [`MeasurementBuffer`] - owned `mmap` region for callers that need a sweep buffer
//! - Progress reporting utilities ([`NamedProgress`])

mod buffer;
mod constants;
mod named_progress;
mod size;

pub use self::buffer::MeasurementBuffer;
pub use self::constants::*;
pub use self::named_progress::NamedProgress;
pub use self::size::Size;
