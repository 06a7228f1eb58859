use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use itertools::Itertools;
use log::info;
use serde::Serialize;
use spoiler_core::util::Size;
use spoiler_core::{Measurement, SweepConfig, SweepSummary};

/// One sweep of a measurement session.
#[derive(Debug, Serialize)]
pub struct SweepRecord {
    /// 1-based repetition index
    pub repetition: usize,
    /// Wall-clock duration of the sweep
    pub duration_ms: u64,
    /// Aggregates of `measurement`
    pub summary: SweepSummary,
    /// Full result set
    pub measurement: Measurement,
}

impl SweepRecord {
    pub fn new(repetition: usize, duration_ms: u64, measurement: Measurement) -> Self {
        Self {
            repetition,
            duration_ms,
            summary: measurement.summary(),
            measurement,
        }
    }
}

/// All sweeps of one `measure` invocation.
#[derive(Debug, Serialize)]
pub struct MeasureReport {
    /// RFC 3339 timestamp of the session start
    pub date: String,
    pub config: SweepConfig,
    pub buffer_size: Size,
    /// Page offset of the probe target inside the probe buffer
    pub read_page: usize,
    pub sweeps: Vec<SweepRecord>,
}

impl MeasureReport {
    pub fn new(config: SweepConfig, buffer_size: Size, read_page: usize) -> Self {
        Self {
            date: chrono::Local::now().to_rfc3339(),
            config,
            buffer_size,
            read_page,
            sweeps: vec![],
        }
    }

    pub fn add_sweep(&mut self, record: SweepRecord) {
        self.sweeps.push(record);
    }

    /// How often each page carried the largest diff of a sweep, most frequent first.
    pub fn peak_histogram(&self) -> Vec<(usize, usize)> {
        let counts: HashMap<usize, usize> = self
            .sweeps
            .iter()
            .filter_map(|s| s.summary.max_diff.map(|(page, _)| page))
            .counts();
        counts
            .into_iter()
            .sorted_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)))
            .collect()
    }

    pub fn save_to_file(&self, filename: impl AsRef<Path>) -> anyhow::Result<()> {
        let file = File::create(filename.as_ref())?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        info!("Results saved to {}", filename.as_ref().display());
        Ok(())
    }
}
