//! # Spoiler Core
//!
//! `spoiler-core` implements the SPOILER timing measurement: a page-by-page sweep over a
//! large buffer that exposes load/store aliasing and DRAM row-buffer conflicts as rises in
//! the latency of a single timed read.
//!
//! ## Components
//!
//! - [`timer::AccessTimer`] - times one memory read between two serializing counter reads.
//!   [`timer::construct_access_timer`] returns the `rdtscp` implementation on x86_64.
//!
//! - [`Spoiler`] / [`spoiler_measure`] - the sweep. For every page past the window it
//!   writes the preceding pages, times the probe target, drops rounds above the outlier
//!   threshold and records a smoothed latency plus a clamped rise against the previous
//!   page.
//!
//! - [`Measurement`] - the owned result set with per-page measurement and diff views.
//!
//! - [`SweepConfig`] - window, round count, outlier threshold and warmup length.
//!
//! - [`util`] module - page constants, [`util::Size`] and [`util::MeasurementBuffer`] for
//!   callers that need an `mmap`-backed buffer.
//!
//! ## Platform Support
//!
//! Timing requires an x86_64 CPU with `rdtscp`. The sweep itself is platform independent and
//! accepts any [`timer::AccessTimer`].
//!
//! # References
//!
//! Islam et al., "SPOILER: Speculative Load Hazards Boost Rowhammer and Cache Attacks",
//! USENIX Security 2019. <https://arxiv.org/abs/1903.00446>

#![warn(missing_docs)]

mod config;
mod measurement;
pub mod timer;
pub mod util;

pub use config::{ConfigError, SweepConfig};
pub use measurement::{
    Baseline, Measurement, RoundStats, Spoiler, SweepError, SweepSummary, spoiler_measure,
};
