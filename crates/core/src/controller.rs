//! Pipeline orchestration: fetch, decode, aggregate, build chart config
//!
//! The controller is always in one of two phases. It starts in
//! [`Phase::AwaitingFile`] and only moves to [`Phase::Rendered`] when a
//! fetch succeeds and yields at least one valid record. Any failure puts
//! it back in `AwaitingFile` with the error kept for display; there is no
//! automatic retry.
//!
//! The fetch is the only suspension point. [`Controller::begin`] hands out
//! a [`Ticket`] and [`Controller::complete`] consumes it, so a reload-class
//! mutation made while a fetch is outstanding makes the late response stale.

use crate::aggregate::{average, group};
use crate::chart::{self, ChartConfig, Dataset};
use crate::data::AveragedSeries;
use crate::decoder::decode;
use crate::error::{Error, FetchError, Result};
use crate::metric::Metric;
use crate::params::{Location, Navigation, Params};
use tracing::{debug, error, info};

/// Source of results files
///
/// Must yield the body of a 2xx response; anything else is a [`FetchError`].
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn fetch_text(&self, resource: &str) -> std::result::Result<String, FetchError>;
}

/// Controller state
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// No usable file yet; the file input should be shown and focused
    AwaitingFile { error: Option<Error> },
    /// A chart is on screen
    Rendered(ChartConfig),
}

/// Permission to deliver one fetch result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    file: String,
}

impl Ticket {
    pub fn file(&self) -> &str {
        &self.file
    }
}

pub struct Controller<L> {
    params: Params<L>,
    phase: Phase,
    averaged: Option<AveragedSeries>,
    generation: u64,
    in_flight: bool,
}

impl<L: Location> Controller<L> {
    pub fn new(params: Params<L>) -> Self {
        Self {
            params,
            phase: Phase::AwaitingFile { error: None },
            averaged: None,
            generation: 0,
            in_flight: false,
        }
    }

    pub fn params(&self) -> &Params<L> {
        &self.params
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn config(&self) -> Option<&ChartConfig> {
        match &self.phase {
            Phase::Rendered(config) => Some(config),
            Phase::AwaitingFile { .. } => None,
        }
    }

    /// Datasets on screen; empty unless rendered
    pub fn datasets(&self) -> &[Dataset] {
        self.config()
            .map(|c| c.datasets.as_slice())
            .unwrap_or_default()
    }

    pub fn error(&self) -> Option<&Error> {
        match &self.phase {
            Phase::AwaitingFile { error } => error.as_ref(),
            Phase::Rendered(_) => None,
        }
    }

    /// Averaged series from the last successful run
    pub fn averaged(&self) -> Option<&AveragedSeries> {
        self.averaged.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Start a pipeline run
    ///
    /// Returns `None` and settles in `AwaitingFile` when no file is selected;
    /// that idle state carries no error.
    pub fn begin(&mut self) -> Option<Ticket> {
        self.generation += 1;

        let Some(file) = self.params.file() else {
            info!("no results file selected");
            self.in_flight = false;
            self.averaged = None;
            self.phase = Phase::AwaitingFile { error: None };
            return None;
        };

        info!(file, generation = self.generation, "fetching results");
        self.in_flight = true;
        Some(Ticket {
            generation: self.generation,
            file: file.to_string(),
        })
    }

    /// Deliver the fetch result for a ticket; stale tickets are ignored
    pub fn complete(
        &mut self,
        ticket: &Ticket,
        body: std::result::Result<String, FetchError>,
    ) -> &Phase {
        if ticket.generation != self.generation {
            debug!(
                file = %ticket.file,
                ticket = ticket.generation,
                current = self.generation,
                "discarding superseded response"
            );
            return &self.phase;
        }

        self.in_flight = false;

        let outcome = body
            .map_err(Error::from)
            .and_then(|text| self.process(&ticket.file, &text));

        match outcome {
            Ok(averaged) => {
                let config = chart::build(&averaged, self.params.state());
                info!(
                    file = %ticket.file,
                    datasets = config.datasets.len(),
                    "rendered chart"
                );
                self.averaged = Some(averaged);
                self.phase = Phase::Rendered(config);
            }
            Err(e) => {
                error!(file = %ticket.file, "{}", e);
                self.averaged = None;
                self.phase = Phase::AwaitingFile { error: Some(e) };
            }
        }

        &self.phase
    }

    /// Run the whole pipeline once
    pub async fn run<F: Fetch>(&mut self, fetch: &F) -> &Phase {
        let Some(ticket) = self.begin() else {
            return &self.phase;
        };
        let body = fetch.fetch_text(ticket.file()).await;
        self.complete(&ticket, body)
    }

    fn process(&self, file: &str, text: &str) -> Result<AveragedSeries> {
        let results = decode(text)?;
        if results.is_empty() {
            return Err(Error::Empty(file.to_string()));
        }
        let grouped = group(&results, self.params.metric().as_str())?;
        Ok(average(&grouped))
    }

    /// Select a results file; the caller must re-run
    pub fn select_file(&mut self, file: &str) -> Navigation {
        self.supersede(|params| Ok(params.set_file(file)))
            .unwrap_or(Navigation::Unchanged)
    }

    /// Select the plotted metric; the caller must re-run
    pub fn select_metric(&mut self, metric: Metric) -> Navigation {
        self.supersede(|params| Ok(params.set_metric(metric)))
            .unwrap_or(Navigation::Unchanged)
    }

    /// Enable or disable a language prefix; the caller must re-run on `Reloaded`
    pub fn set_language_enabled(&mut self, prefix: &str, enabled: bool) -> Result<Navigation> {
        self.supersede(|params| {
            if enabled {
                params.enable_language(prefix)
            } else {
                params.disable_language(prefix)
            }
        })
    }

    /// Show or hide one series without refetching
    pub fn set_command_hidden(&mut self, label: &str, hidden: bool) -> Result<Navigation> {
        let navigation = if hidden {
            self.params.hide_command(label)?
        } else {
            self.params.show_command(label)?
        };

        if navigation == Navigation::Replaced {
            if let Some(averaged) = &self.averaged {
                self.phase = Phase::Rendered(chart::build(averaged, self.params.state()));
            }
        }

        Ok(navigation)
    }

    /// Legend click: flip one series' visibility
    pub fn toggle_command(&mut self, label: &str) -> Result<Navigation> {
        let hidden = self.params.command_hidden(label);
        self.set_command_hidden(label, !hidden)
    }

    fn supersede(
        &mut self,
        mutate: impl FnOnce(&mut Params<L>) -> Result<Navigation>,
    ) -> Result<Navigation> {
        let navigation = mutate(&mut self.params)?;
        if navigation.requires_rerun() {
            self.generation += 1;
            self.in_flight = false;
        }
        Ok(navigation)
    }
}
