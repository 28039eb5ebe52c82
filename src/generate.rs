//! Synthetic CSV writers
//!
//! `write_messages` is the benchmarked workload itself: `n` rows of
//! `(line, message)` where `message` is `line` zero characters.
//! `write_sample` produces a results file in the dashboard's input format.

use crate::error::Result;
use serde::Serialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Serialize)]
struct MessageRow {
    line: usize,
    message: String,
}

/// Write `line,message` rows for 1..=n
pub fn write_messages(path: &Path, n: usize) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    // An explicit header keeps n = 0 a valid, header-only file
    writer.write_record(["line", "message"])?;
    for line in 1..=n {
        writer.serialize(MessageRow {
            line,
            message: "0".repeat(line),
        })?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = n, "wrote messages");
    Ok(())
}

/// One measurement row of a results file
#[derive(Debug, Serialize)]
struct SampleRow<'a> {
    file: &'a str,
    n: u64,
    code: i32,
    user: String,
    sys: String,
    maxrss: u64,
}

/// Commands in the sample, with (seconds per row, base kilobytes, kilobytes per row)
const SAMPLE_COMMANDS: &[(&str, f64, u64, f64)] = &[
    ("js/main_csv", 2.0e-6, 42_000, 0.020),
    ("js/main_object", 1.2e-6, 40_000, 0.012),
    ("py/main_csv_dict", 3.1e-6, 9_500, 0.015),
    ("py/main_tuple", 1.4e-6, 9_200, 0.004),
    ("rs/csv_serde", 0.15e-6, 2_100, 0.0),
    ("rs/fs_struct", 0.11e-6, 2_000, 0.0),
];

/// Write a deterministic results file: `runs` rows per (command, size)
pub fn write_sample(path: &Path, runs: usize, sizes: &[u64]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    let mut rows = 0usize;

    for &(command, per_row, base_kb, kb_per_row) in SAMPLE_COMMANDS {
        for &n in sizes {
            for run in 0..runs {
                // Spread runs evenly around the nominal value
                let jitter = 1.0 + 0.02 * (run as f64 - (runs as f64 - 1.0) / 2.0);
                let user = per_row * n as f64 * jitter;
                writer.serialize(SampleRow {
                    file: command,
                    n,
                    code: 0,
                    user: format!("{:.4}", user),
                    sys: format!("{:.4}", user * 0.1),
                    maxrss: base_kb + (kb_per_row * n as f64) as u64,
                })?;
                rows += 1;
            }
        }
    }
    writer.flush()?;

    info!(path = %path.display(), rows, "wrote sample results");
    Ok(())
}
