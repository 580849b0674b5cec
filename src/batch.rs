//! Batch orchestration: decode → pipeline → encode per file.
//!
//! Jobs are independent and run on the rayon pool; results come back in input
//! order. Each job retries a bounded number of times with a fixed delay, and a
//! final failure is recorded as that item's status instead of aborting the
//! batch.
use crate::error::Error;
use crate::image::{decode_image, encode_image, ImageFormat};
use crate::pipeline::{run_pipeline, Op};
use log::{debug, warn};
use rayon::prelude::*;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// One input/output pair to process.
#[derive(Clone, Debug, Deserialize)]
pub struct BatchJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// UI-facing lifecycle of a batch item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchStatus {
    Pending,
    Processing,
    Completed,
    Error,
}

/// Final per-item record: status, 0-100 progress, and the error message when
/// the item failed.
#[derive(Clone, Debug)]
pub struct BatchOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub status: BatchStatus,
    pub progress: u8,
    pub error: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BatchOptions {
    pub format: ImageFormat,
    /// JPEG quality 1..=100; ignored by PNG/WebP.
    pub quality: u8,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            format: ImageFormat::Png,
            quality: 92,
            max_retries: 3,
            retry_delay_ms: 1000,
        }
    }
}

fn process_job(job: &BatchJob, ops: &[Op], options: &BatchOptions) -> Result<(), Error> {
    let decoded = decode_image(&job.input)?;
    let processed = run_pipeline(&decoded, ops)?;
    encode_image(&processed, &job.output, options.format, options.quality)
}

fn run_with_retry(job: &BatchJob, ops: &[Op], options: &BatchOptions) -> Result<(), Error> {
    let attempts = options.max_retries.max(1);
    let mut last_err = None;
    for attempt in 1..=attempts {
        match process_job(job, ops, options) {
            Ok(()) => {
                debug!("batch: {} done (attempt {attempt})", job.input.display());
                return Ok(());
            }
            Err(e) => {
                debug!(
                    "batch: {} attempt {attempt}/{attempts} failed: {e}",
                    job.input.display()
                );
                last_err = Some(e);
                if attempt < attempts {
                    std::thread::sleep(Duration::from_millis(options.retry_delay_ms));
                }
            }
        }
    }
    Err(last_err.unwrap_or_else(|| Error::Decode("no attempt was made".to_string())))
}

/// Process every job, fanning out over the rayon pool.
///
/// The returned vector is index-aligned with `jobs`; execution order across
/// jobs is unspecified.
pub fn run_batch(jobs: &[BatchJob], ops: &[Op], options: &BatchOptions) -> Vec<BatchOutcome> {
    jobs.par_iter()
        .map(|job| match run_with_retry(job, ops, options) {
            Ok(()) => BatchOutcome {
                input: job.input.clone(),
                output: job.output.clone(),
                status: BatchStatus::Completed,
                progress: 100,
                error: None,
            },
            Err(e) => {
                warn!("batch: {} failed permanently: {e}", job.input.display());
                BatchOutcome {
                    input: job.input.clone(),
                    output: job.output.clone(),
                    status: BatchStatus::Error,
                    progress: 0,
                    error: Some(e.to_string()),
                }
            }
        })
        .collect()
}
