use std::time::Instant;

use anyhow::{Result, bail};
use clap::Parser;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use log::info;
use serde::Serialize;
use spoiler_bin::init_logging_with_progress;
use spoiler_bin::report::{MeasureReport, SweepRecord};
use spoiler_core::util::{MeasurementBuffer, NamedProgress, Size};
use spoiler_core::{Spoiler, SweepConfig};

/// Size of the separate buffer holding the probe target.
const PROBE_BUFFER_SIZE: Size = Size::MB(2);

/// CLI arguments for the `measure` binary.
#[derive(Debug, Parser, Serialize, Clone)]
struct CliArgs {
    /// JSON sweep configuration. Missing fields use the built-in defaults.
    #[clap(long = "config")]
    config: Option<String>,
    /// The size of the swept buffer in MB.
    #[clap(long = "size-mb", default_value = "512")]
    size_mb: usize,
    /// Page offset of the probe target inside its 2 MB buffer.
    #[clap(long = "read-page", default_value = "0")]
    read_page: usize,
    /// Override the number of window pages.
    #[clap(long = "window")]
    window: Option<usize>,
    /// Override the rounds per page.
    #[clap(long = "rounds")]
    rounds: Option<usize>,
    /// Override the outlier threshold in cycles.
    #[clap(long = "threshold")]
    threshold: Option<u32>,
    /// Repeat the sweep this many times.
    #[clap(long = "repeat", default_value = "1")]
    repeat: usize,
    /// Output file for results (JSON format).
    #[clap(long = "output")]
    output: Option<String>,
}

impl CliArgs {
    fn sweep_config(&self) -> Result<SweepConfig> {
        let mut config = match &self.config {
            Some(path) => SweepConfig::from_jsonfile(path)?,
            None => SweepConfig::default(),
        };
        if let Some(window) = self.window {
            config.window = window;
        }
        if let Some(rounds) = self.rounds {
            config.rounds = rounds;
        }
        if let Some(threshold) = self.threshold {
            config.outlier_threshold = threshold;
        }
        if config.rounds == 0 {
            bail!("sweep config needs at least one round per page");
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let progress = init_logging_with_progress()?;

    let args = CliArgs::parse();
    info!("CLI args: {:?}", args);
    if args.read_page >= PROBE_BUFFER_SIZE.pages() {
        bail!(
            "read page {} outside of the {} probe buffer",
            args.read_page,
            PROBE_BUFFER_SIZE
        );
    }
    let config = args.sweep_config()?;
    info!("Sweep config: {:?}", config);

    let buffer_size = Size::MB(args.size_mb);
    let mut buffer = MeasurementBuffer::mmap(buffer_size, 0)?;
    let probe_buffer = MeasurementBuffer::mmap(PROBE_BUFFER_SIZE, 0)?;
    let probe = probe_buffer.page(args.read_page);
    let spoiler = Spoiler::new(config.clone())?;

    let mut report = MeasureReport::new(config, buffer_size, args.read_page);
    let bar = progress.add(
        ProgressBar::new(args.repeat as u64).with_style(ProgressStyle::named_bar("SPOILER sweeps")),
    );
    let start_time = Instant::now();
    for rep in 1..=args.repeat {
        let sweep_start = Instant::now();
        let measurement = spoiler.measure(buffer.as_mut_slice(), probe)?;
        let record = SweepRecord::new(
            rep,
            sweep_start.elapsed().as_millis() as u64,
            measurement,
        );
        let summary = &record.summary;
        info!(
            "Sweep {}/{}: {} pages measured, {} unset, latency {:?}..{:?}, max diff {:?} ({}ms)",
            rep,
            args.repeat,
            summary.measured_pages,
            summary.unset_pages,
            summary.min_latency,
            summary.max_latency,
            summary.max_diff,
            record.duration_ms
        );
        report.add_sweep(record);
        bar.inc(1);
    }
    bar.finish();

    info!("=== MEASUREMENT SUMMARY ===");
    info!("Sweeps: {}/{}", report.sweeps.len(), args.repeat);
    info!("Peak pages (page, count): {:?}", report.peak_histogram());
    info!(
        "Total measurement time: {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    if let Some(output_file) = &args.output {
        report.save_to_file(output_file)?;
    }
    Ok(())
}
