//! The SPOILER page sweep.
//!
//! For every page `p` past the first `window` pages, each round writes the pages
//! `p - window ..= p` and then times a single read of the probe target. A read that
//! aliases with one of the pending stores stalls, and the stall shows up as a rise in
//! latency from one page to the next.
//!
//! The sweep produces a [`Measurement`]:
//! - `measurements[p]`: mean latency over the rounds below the outlier threshold, or
//!   `None` if every round was rejected.
//! - `diffs[p]`: rise of the raw mean (sum over accepted rounds divided by the configured
//!   round count) against the previous page, clamped at zero.

use std::collections::TryReserveError;
use std::ops::Range;

use itertools::{Itertools, MinMaxResult};
use log::{debug, trace, warn};
use serde::Serialize;
use thiserror::Error;

use crate::config::SweepConfig;
use crate::timer::{AccessTimer, TimerError, construct_access_timer};
use crate::util::{PAGE_MASK, PAGE_SHIFT, PAGE_SIZE};

/// Errors returned by a sweep.
#[derive(Debug, Error)]
pub enum SweepError {
    /// The buffer length is not a whole number of pages.
    #[error("buffer size {size} is not a multiple of the page size {page_size}")]
    UnalignedBufferSize {
        /// Buffer length in bytes
        size: usize,
        /// Required granularity
        page_size: usize,
    },
    /// The configuration asks for zero rounds per page.
    #[error("round count must be positive")]
    ZeroRounds,
    /// Storage for the result set could not be allocated.
    #[error("failed to allocate result storage for {pages} pages: {source}")]
    ResultAllocation {
        /// Number of pages the result set was sized for
        pages: usize,
        /// Allocator error
        source: TryReserveError,
    },
}

/// Accepted-round statistics of a single page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoundStats {
    sum: u64,
    accepted: u64,
}

impl RoundStats {
    /// Records one round. Returns whether the round was accepted.
    ///
    /// Deltas at or above `threshold` are dropped entirely.
    pub fn record(&mut self, delta: u32, threshold: u32) -> bool {
        if delta < threshold {
            self.sum += u64::from(delta);
            self.accepted += 1;
            true
        } else {
            false
        }
    }

    /// Sum of all accepted deltas.
    pub fn sum(&self) -> u64 {
        self.sum
    }

    /// Number of accepted rounds.
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Mean over the accepted rounds, `None` if no round was accepted.
    pub fn mean(&self) -> Option<u64> {
        self.sum.checked_div(self.accepted)
    }

    /// Accepted sum divided by the configured round count.
    ///
    /// This is zero for a page whose rounds were all rejected.
    pub fn raw_mean(&self, rounds: usize) -> u64 {
        self.sum / rounds as u64
    }
}

/// Raw mean of the previously measured page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Baseline {
    prev_raw_mean: u64,
}

impl Baseline {
    /// Baseline before the first measured page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw mean of the previous page.
    pub fn value(&self) -> u64 {
        self.prev_raw_mean
    }

    /// Moves the baseline to `raw_mean` and returns the next baseline together with the
    /// clamped rise against the current one.
    pub fn advance(self, raw_mean: u64) -> (Self, u64) {
        let diff = raw_mean.saturating_sub(self.prev_raw_mean);
        (
            Self {
                prev_raw_mean: raw_mean,
            },
            diff,
        )
    }
}

/// Per-page result of a SPOILER sweep.
///
/// `measurements` and `diffs` always have one entry per page of the swept buffer.
/// Entries below [`Measurement::window`] are never measured: their measurement is `None`
/// and their diff is zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Measurement {
    window: usize,
    rounds: usize,
    measurements: Vec<Option<u64>>,
    diffs: Vec<u64>,
}

impl Measurement {
    fn try_new(page_count: usize, config: &SweepConfig) -> Result<Self, SweepError> {
        let alloc_err = |source| SweepError::ResultAllocation {
            pages: page_count,
            source,
        };
        let mut measurements = Vec::new();
        measurements
            .try_reserve_exact(page_count)
            .map_err(alloc_err)?;
        measurements.resize(page_count, None);
        let mut diffs = Vec::new();
        diffs.try_reserve_exact(page_count).map_err(alloc_err)?;
        diffs.resize(page_count, 0);
        Ok(Self {
            window: config.window,
            rounds: config.rounds,
            measurements,
            diffs,
        })
    }

    /// Mean latency per page in cycles. `None` marks pages without an accepted round.
    pub fn measurements(&self) -> &[Option<u64>] {
        &self.measurements
    }

    /// Clamped rise of the raw mean against the previous page, per page.
    pub fn diffs(&self) -> &[u64] {
        &self.diffs
    }

    /// Number of pages of the swept buffer.
    pub fn page_count(&self) -> usize {
        self.measurements.len()
    }

    /// Window size the sweep ran with.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Rounds per page the sweep ran with.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Page indices the sweep measured. Empty if the buffer had `window` pages or fewer.
    pub fn measured_range(&self) -> Range<usize> {
        self.window.min(self.page_count())..self.page_count()
    }

    /// Iterates `(page, measurement, diff)` over the measured range.
    pub fn measured_pages(&self) -> impl Iterator<Item = (usize, Option<u64>, u64)> + '_ {
        self.measured_range()
            .map(|p| (p, self.measurements[p], self.diffs[p]))
    }

    /// Number of measured pages whose rounds were all rejected.
    pub fn unset_pages(&self) -> usize {
        self.measured_pages().filter(|(_, m, _)| m.is_none()).count()
    }

    /// Aggregate statistics over the measured range.
    pub fn summary(&self) -> SweepSummary {
        let latency = match self.measured_pages().filter_map(|(_, m, _)| m).minmax() {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(x) => Some((x, x)),
            MinMaxResult::MinMax(min, max) => Some((min, max)),
        };
        // first maximum wins on ties
        let max_diff = self
            .measured_pages()
            .map(|(p, _, d)| (p, d))
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)));
        SweepSummary {
            measured_pages: self.measured_range().len(),
            unset_pages: self.unset_pages(),
            min_latency: latency.map(|(min, _)| min),
            max_latency: latency.map(|(_, max)| max),
            max_diff,
        }
    }
}

/// Aggregate view of a [`Measurement`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SweepSummary {
    /// Pages in the measured range
    pub measured_pages: usize,
    /// Measured pages without any accepted round
    pub unset_pages: usize,
    /// Smallest set measurement
    pub min_latency: Option<u64>,
    /// Largest set measurement
    pub max_latency: Option<u64>,
    /// Page index and value of the largest diff
    pub max_diff: Option<(usize, u64)>,
}

fn warmup(iterations: usize) {
    for i in 0..iterations {
        std::hint::black_box(i);
    }
}

/// Runs the SPOILER sweep over `buffer`, timing reads of `probe` with `timer`.
///
/// The first byte of every page in the window is overwritten with zero on every round.
/// `probe` is only read.
///
/// # Errors
///
/// - [`SweepError::UnalignedBufferSize`] if `buffer.len()` is not a multiple of [`PAGE_SIZE`]
/// - [`SweepError::ZeroRounds`] if `config.rounds` is zero
/// - [`SweepError::ResultAllocation`] if the result set cannot be allocated
pub fn spoiler_measure<T: AccessTimer + ?Sized>(
    timer: &T,
    buffer: &mut [u8],
    probe: &u8,
    config: &SweepConfig,
) -> Result<Measurement, SweepError> {
    if buffer.len() & PAGE_MASK != 0 {
        return Err(SweepError::UnalignedBufferSize {
            size: buffer.len(),
            page_size: PAGE_SIZE,
        });
    }
    if config.rounds == 0 {
        return Err(SweepError::ZeroRounds);
    }
    let page_count = buffer.len() >> PAGE_SHIFT;
    let mut ret = Measurement::try_new(page_count, config)?;
    debug!(
        "SPOILER sweep over {} pages (window {}, {} rounds, threshold {})",
        page_count, config.window, config.rounds, config.outlier_threshold
    );

    let base = buffer.as_mut_ptr();
    let probe: *const u8 = probe;

    warmup(config.warmup_iterations);
    let mut baseline = Baseline::new();
    for p in config.window..page_count {
        let mut stats = RoundStats::default();
        for _ in 0..config.rounds {
            for i in (0..=config.window).rev() {
                // p - i >= 0 and p < page_count, so the write stays inside `buffer`
                unsafe { base.add((p - i) * PAGE_SIZE).write_volatile(0) };
            }
            let delta = unsafe { timer.time_access(probe) };
            stats.record(delta, config.outlier_threshold);
        }
        ret.measurements[p] = stats.mean();
        let (next, diff) = baseline.advance(stats.raw_mean(config.rounds));
        ret.diffs[p] = diff;
        baseline = next;
        trace!(
            "page {}: {}/{} accepted, mean {:?}, diff {}",
            p,
            stats.accepted(),
            config.rounds,
            ret.measurements[p],
            diff
        );
    }

    let summary = ret.summary();
    debug!("SPOILER sweep done: {:?}", summary);
    if summary.measured_pages > 0 && summary.unset_pages == summary.measured_pages {
        warn!(
            "No round below the outlier threshold of {} cycles on any page",
            config.outlier_threshold
        );
    }
    Ok(ret)
}

/// SPOILER measurement primitive: a timer bundled with its sweep configuration.
pub struct Spoiler {
    timer: Box<dyn AccessTimer>,
    config: SweepConfig,
}

impl Spoiler {
    /// Creates a sweep using the platform timer from [`construct_access_timer`].
    ///
    /// # Errors
    ///
    /// Returns [`TimerError`] if no serializing cycle counter is available.
    pub fn new(config: SweepConfig) -> Result<Self, TimerError> {
        Ok(Self::with_timer(construct_access_timer()?, config))
    }

    /// Creates a sweep using `timer`.
    pub fn with_timer(timer: Box<dyn AccessTimer>, config: SweepConfig) -> Self {
        Self { timer, config }
    }

    /// The sweep configuration.
    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Sweeps `buffer` and times reads of `probe`. See [`spoiler_measure`].
    ///
    /// # Errors
    ///
    /// See [`spoiler_measure`].
    pub fn measure(&self, buffer: &mut [u8], probe: &u8) -> Result<Measurement, SweepError> {
        spoiler_measure(&*self.timer, buffer, probe, &self.config)
    }

    /// Sweeps `buffer_size` bytes starting at `buffer`, timing reads of `probe`.
    ///
    /// # Safety
    ///
    /// * `buffer` must be valid for reads and writes of `buffer_size` bytes and must not be
    ///   accessed by anyone else during the call. It may be null if `buffer_size` is zero.
    /// * `probe` must be valid for reads, must not point into the buffer and must stay
    ///   unchanged during the call
    ///
    /// # Errors
    ///
    /// See [`spoiler_measure`].
    pub unsafe fn measure_raw(
        &self,
        buffer: *mut u8,
        buffer_size: usize,
        probe: *const u8,
    ) -> Result<Measurement, SweepError> {
        let buffer: &mut [u8] = if buffer_size == 0 {
            &mut []
        } else {
            unsafe { std::slice::from_raw_parts_mut(buffer, buffer_size) }
        };
        let probe = unsafe { &*probe };
        self.measure(buffer, probe)
    }
}

#[cfg(test)]
mod tests {
    use super::{Baseline, Measurement, RoundStats, Spoiler, SweepError, spoiler_measure};
    use crate::config::SweepConfig;
    use crate::timer::AccessTimer;
    use crate::util::PAGE_SIZE;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::cell::{Cell, RefCell};

    /// Reports `latency(page, round)` for every call, deriving the page from the call count.
    struct PageTimer<F: Fn(usize, usize) -> u32> {
        window: usize,
        rounds: usize,
        calls: Cell<usize>,
        latency: F,
    }

    impl<F: Fn(usize, usize) -> u32> PageTimer<F> {
        fn new(config: &SweepConfig, latency: F) -> Self {
            Self {
                window: config.window,
                rounds: config.rounds,
                calls: Cell::new(0),
                latency,
            }
        }
    }

    impl<F: Fn(usize, usize) -> u32> AccessTimer for PageTimer<F> {
        unsafe fn time_access(&self, _addr: *const u8) -> u32 {
            let call = self.calls.get();
            self.calls.set(call + 1);
            (self.latency)(self.window + call / self.rounds, call % self.rounds)
        }
    }

    fn config(window: usize, rounds: usize) -> SweepConfig {
        SweepConfig {
            window,
            rounds,
            outlier_threshold: 600,
            warmup_iterations: 0,
        }
    }

    fn sweep(
        pages: usize,
        config: &SweepConfig,
        latency: impl Fn(usize, usize) -> u32,
    ) -> Measurement {
        let timer = PageTimer::new(config, latency);
        let mut buffer = vec![0xFFu8; pages * PAGE_SIZE];
        let probe = 0u8;
        spoiler_measure(&timer, &mut buffer, &probe, config).expect("sweep")
    }

    #[test]
    fn test_round_stats_rejects_at_threshold() {
        let mut stats = RoundStats::default();
        assert!(stats.record(599, 600));
        assert!(!stats.record(600, 600));
        assert!(!stats.record(u32::MAX, 600));
        assert_eq!(stats.sum(), 599);
        assert_eq!(stats.accepted(), 1);
        assert_eq!(stats.mean(), Some(599));
        assert_eq!(stats.raw_mean(3), 199);
    }

    #[test]
    fn test_round_stats_empty() {
        let stats = RoundStats::default();
        assert_eq!(stats.mean(), None);
        assert_eq!(stats.raw_mean(100), 0);
    }

    #[test]
    fn test_baseline_clamps() {
        let baseline = Baseline::new();
        let (baseline, diff) = baseline.advance(100);
        assert_eq!(diff, 100);
        let (baseline, diff) = baseline.advance(80);
        assert_eq!(diff, 0);
        assert_eq!(baseline.value(), 80);
        let (_, diff) = baseline.advance(95);
        assert_eq!(diff, 15);
    }

    #[test]
    fn test_result_lengths() {
        let config = config(4, 10);
        let m = sweep(20, &config, |_, _| 150);
        assert_eq!(m.page_count(), 20);
        assert_eq!(m.measurements().len(), 20);
        assert_eq!(m.diffs().len(), 20);
        assert_eq!(m.measured_range(), 4..20);
    }

    #[test]
    fn test_pre_window_pages_unset() {
        let config = config(8, 5);
        let m = sweep(16, &config, |_, _| 0);
        for p in 0..8 {
            assert_eq!(m.measurements()[p], None);
            assert_eq!(m.diffs()[p], 0);
        }
        for p in 8..16 {
            assert_eq!(m.measurements()[p], Some(0));
        }
    }

    #[test]
    fn test_mean_excludes_rejected_rounds() {
        let config = config(2, 10);
        // even rounds 100 cycles, odd rounds far above the threshold
        let m = sweep(4, &config, |_, r| if r % 2 == 0 { 100 } else { 5000 });
        assert_eq!(m.measurements()[2], Some(100));
        assert_eq!(m.measurements()[3], Some(100));
        // raw mean divides the accepted sum by all rounds: 500 / 10
        assert_eq!(m.diffs()[2], 50);
        assert_eq!(m.diffs()[3], 0);
    }

    #[test]
    fn test_mean_of_mixed_accepted_values() {
        let config = config(1, 4);
        let latencies = [120, 180, 599, 600];
        let m = sweep(2, &config, |_, r| latencies[r]);
        assert_eq!(m.measurements()[1], Some((120 + 180 + 599) / 3));
        assert_eq!(m.diffs()[1], (120 + 180 + 599) / 4);
    }

    #[test]
    fn test_diffs_clamped_to_zero() {
        let config = config(1, 10);
        let per_page = [0, 100, 300, 200, 250, 250];
        let m = sweep(per_page.len(), &config, |p, _| per_page[p]);
        assert_eq!(m.diffs(), &[0, 100, 200, 0, 50, 0]);
    }

    #[test]
    fn test_all_rejected_page_is_unset() {
        let config = config(1, 10);
        let per_page = [0, 0, 1000, 200];
        let m = sweep(per_page.len(), &config, |p, _| per_page[p]);
        assert_eq!(m.measurements()[1], Some(0));
        assert_eq!(m.measurements()[2], None);
        assert_ne!(m.measurements()[1], m.measurements()[2]);
        assert_eq!(m.measurements()[3], Some(200));
        assert_eq!(m.unset_pages(), 1);
        // the all-rejected page resets the baseline to zero
        assert_eq!(m.diffs()[2], 0);
        assert_eq!(m.diffs()[3], 200);
    }

    #[test]
    fn test_small_buffer_yields_empty_range() {
        let config = config(64, 100);
        for pages in [0, 1, 63, 64] {
            let timer = PageTimer::new(&config, |_, _| 100);
            let mut buffer = vec![0xFFu8; pages * PAGE_SIZE];
            let probe = 0u8;
            let m = spoiler_measure(&timer, &mut buffer, &probe, &config).expect("sweep");
            assert!(m.measured_range().is_empty());
            assert_eq!(m.page_count(), pages);
            assert!(m.measurements().iter().all(Option::is_none));
            assert_eq!(timer.calls.get(), 0);
            assert!(buffer.iter().all(|&b| b == 0xFF));
        }
    }

    #[test]
    fn test_unaligned_buffer_rejected() {
        let config = config(1, 1);
        let timer = PageTimer::new(&config, |_, _| 100);
        let mut buffer = vec![0u8; 3 * PAGE_SIZE + 17];
        let probe = 0u8;
        let err = spoiler_measure(&timer, &mut buffer, &probe, &config).unwrap_err();
        assert!(matches!(
            err,
            SweepError::UnalignedBufferSize {
                size,
                page_size: PAGE_SIZE
            } if size == 3 * PAGE_SIZE + 17
        ));
        assert_eq!(timer.calls.get(), 0);
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let timer = PageTimer::new(&config(1, 1), |_, _| 100);
        let mut buffer = vec![0u8; 4 * PAGE_SIZE];
        let probe = 0u8;
        let err = spoiler_measure(&timer, &mut buffer, &probe, &config(1, 0)).unwrap_err();
        assert!(matches!(err, SweepError::ZeroRounds));
    }

    #[test]
    fn test_timer_called_once_per_page_round() {
        let config = config(3, 7);
        let timer = PageTimer::new(&config, |_, _| 100);
        let mut buffer = vec![0u8; 10 * PAGE_SIZE];
        let probe = 0u8;
        spoiler_measure(&timer, &mut buffer, &probe, &config).expect("sweep");
        assert_eq!(timer.calls.get(), (10 - 3) * 7);
    }

    #[test]
    fn test_window_pages_written_probe_untouched() {
        let config = config(2, 3);
        let timer = PageTimer::new(&config, |_, _| 100);
        let mut buffer = vec![0xFFu8; 6 * PAGE_SIZE];
        let probe = 0xAAu8;
        spoiler_measure(&timer, &mut buffer, &probe, &config).expect("sweep");
        for (offset, &byte) in buffer.iter().enumerate() {
            if offset % PAGE_SIZE == 0 {
                assert_eq!(byte, 0, "page start {} not written", offset / PAGE_SIZE);
            } else {
                assert_eq!(byte, 0xFF, "byte {} modified", offset);
            }
        }
        assert_eq!(probe, 0xAA);
    }

    /// Uniform latency in `150..170` with 5% interrupt-sized outliers.
    struct NoisyTimer {
        rng: RefCell<StdRng>,
        calls: Cell<usize>,
        conflict: Option<(usize, u32)>,
        window: usize,
        rounds: usize,
    }

    impl NoisyTimer {
        fn new(seed: u64, config: &SweepConfig, conflict: Option<(usize, u32)>) -> Self {
            Self {
                rng: RefCell::new(StdRng::seed_from_u64(seed)),
                calls: Cell::new(0),
                conflict,
                window: config.window,
                rounds: config.rounds,
            }
        }
    }

    impl AccessTimer for NoisyTimer {
        unsafe fn time_access(&self, _addr: *const u8) -> u32 {
            let call = self.calls.get();
            self.calls.set(call + 1);
            let page = self.window + call / self.rounds;
            let mut rng = self.rng.borrow_mut();
            if rng.random_bool(0.05) {
                return rng.random_range(1000..100_000);
            }
            let base = rng.random_range(150..170);
            match self.conflict {
                Some((p, extra)) if p == page => base + extra,
                _ => base,
            }
        }
    }

    #[test]
    fn test_uniform_cost_diffs_near_zero() {
        let config = config(64, 100);
        for seed in 0..3 {
            let timer = NoisyTimer::new(seed, &config, None);
            let mut buffer = vec![0u8; 200 * PAGE_SIZE];
            let probe = 0u8;
            let m = spoiler_measure(&timer, &mut buffer, &probe, &config).expect("sweep");
            // the first measured page rises from the zero baseline
            assert!(m.diffs()[64] > 100);
            for p in 65..200 {
                assert!(m.diffs()[p] < 40, "diff {} at page {}", m.diffs()[p], p);
                let mean = m.measurements()[p].expect("accepted rounds");
                assert!((150..170).contains(&mean));
            }
        }
    }

    #[test]
    fn test_injected_conflict_ranks_highest() {
        let config = config(64, 100);
        for seed in 0..5 {
            let timer = NoisyTimer::new(seed, &config, Some((120, 250)));
            let mut buffer = vec![0u8; 200 * PAGE_SIZE];
            let probe = 0u8;
            let m = spoiler_measure(&timer, &mut buffer, &probe, &config).expect("sweep");
            let ranked = m
                .measured_pages()
                .skip(1)
                .max_by_key(|&(_, _, d)| d)
                .map(|(p, _, _)| p);
            assert_eq!(ranked, Some(120));
            assert_eq!(m.diffs()[121], 0);
        }
    }

    #[test]
    fn test_summary() {
        let config = config(1, 10);
        let per_page = [0, 100, 1000, 300, 200];
        let m = sweep(per_page.len(), &config, |p, _| per_page[p]);
        let summary = m.summary();
        assert_eq!(summary.measured_pages, 4);
        assert_eq!(summary.unset_pages, 1);
        assert_eq!(summary.min_latency, Some(100));
        assert_eq!(summary.max_latency, Some(300));
        assert_eq!(summary.max_diff, Some((3, 300)));
    }

    #[test]
    fn test_summary_empty() {
        let config = config(4, 10);
        let summary = sweep(4, &config, |_, _| 100).summary();
        assert_eq!(summary.measured_pages, 0);
        assert_eq!(summary.min_latency, None);
        assert_eq!(summary.max_diff, None);
    }

    #[test]
    fn test_spoiler_with_timer_and_raw() {
        let config = config(2, 4);
        let spoiler = Spoiler::with_timer(
            Box::new(PageTimer::new(&config, |p, _| 100 * p as u32)),
            config.clone(),
        );
        assert_eq!(spoiler.config(), &config);
        let mut buffer = vec![0u8; 5 * PAGE_SIZE];
        let probe = 0u8;
        let m = unsafe { spoiler.measure_raw(buffer.as_mut_ptr(), buffer.len(), &probe) }
            .expect("sweep");
        assert_eq!(m.measurements(), &[None, None, Some(200), Some(300), Some(400)]);
        assert_eq!(m.diffs(), &[0, 0, 200, 100, 100]);
        drop(m);
    }

    #[test]
    fn test_raw_empty_buffer_may_be_null() {
        let config = config(2, 4);
        let spoiler = Spoiler::with_timer(
            Box::new(PageTimer::new(&config, |_, _| 100)),
            config.clone(),
        );
        let probe = 0u8;
        let m = unsafe { spoiler.measure_raw(std::ptr::null_mut(), 0, &probe) }.expect("sweep");
        assert_eq!(m.page_count(), 0);
        assert!(m.measured_range().is_empty());
        assert!(m.diffs().is_empty());
    }

    #[test]
    fn test_measurement_serializes_unset_as_null() -> anyhow::Result<()> {
        let config = config(1, 2);
        let m = sweep(3, &config, |p, _| if p == 2 { 900 } else { 100 });
        let json = serde_json::to_value(&m)?;
        assert_eq!(json["measurements"], serde_json::json!([null, 100, null]));
        assert_eq!(json["diffs"], serde_json::json!([0, 100, 0]));
        assert_eq!(json["window"], 1);
        Ok(())
    }
}
