//! # Spoiler binaries
//!
//! Command line front end for the SPOILER page sweep.
//!
//! ```sh
//! cargo build --release -p spoiler-bin
//! target/release/measure --size-mb 512 --repeat 5 --output log/spoiler.json
//! ```
//!
//! The `measure` binary maps a sweep buffer and a separate probe page, runs the sweep the
//! requested number of times and logs a summary for every run. With `--output`, the
//! configuration and every result set are written as JSON.
//!
//! ## Modules
//!
//! - `report`: serializable records of a measurement session.
pub mod report;

use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;

pub fn init_logging_with_progress() -> anyhow::Result<MultiProgress> {
    let logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).build();
    let progress = MultiProgress::new();
    LogWrapper::new(progress.clone(), logger).try_init()?;
    Ok(progress)
}
