//! bench-report - Benchmark results dashboard
//!
//! Reads a CSV of timing measurements (`file,n,code,<metric...>`), averages
//! it by command and input size, and renders a multi-series line chart.
//! The view (file, metric, hidden series, disabled languages) lives in a
//! URL query string so every view can be bookmarked.
//!
//! # Example
//!
//! ```no_run
//! use bench_report::{html, source::Source};
//! use bench_report_core::{Controller, MemoryLocation, Params};
//!
//! # async fn example() -> bench_report::Result<()> {
//! let params = Params::from_location(MemoryLocation::new("file=report.csv&metric=sys"));
//! let mut controller = Controller::new(params);
//! controller.run(&Source::new(".")).await;
//!
//! if let Some(config) = controller.config() {
//!     let report = html::ReportConfig::default();
//!     html::write_report(config, controller.params().state(), &report, ".".as_ref())?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod generate;
pub mod html;
pub mod source;
pub mod summary;

pub use error::{Error, Result};
