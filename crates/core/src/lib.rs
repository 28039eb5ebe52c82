//! bench-report-core - Results pipeline shared by the CLI and the dashboard
//!
//! This crate contains WASM-compatible code only: no filesystem, no
//! network client. Fetching is abstracted behind [`controller::Fetch`] and
//! the URL behind [`params::Location`].
//!
//! # Pipeline
//!
//! - [`decoder`]: CSV text to records
//! - [`aggregate`]: group by (command, size) and average one metric
//! - [`params`]: view state mirrored into the query string
//! - [`chart`]: chart configuration for a renderer
//! - [`controller`]: fetch, decode, aggregate and build in one run

pub mod aggregate;
pub mod chart;
pub mod controller;
pub mod data;
pub mod decoder;
pub mod error;
pub mod metric;
pub mod params;

pub use aggregate::{average, group};
pub use chart::{build, format_thousands, Axis, ChartConfig, Dataset, Language, Rgb, Scales};
pub use controller::{Controller, Fetch, Phase, Ticket};
pub use data::{AveragedSeries, Bucket, GroupedResults, Record, ResultSet};
pub use decoder::decode;
pub use error::{Error, FetchError, Result};
pub use metric::Metric;
pub use params::{Location, MemoryLocation, Navigation, Params, ViewState};
