//! URL-backed view state
//!
//! The query string is the only persistence layer. [`Params`] owns the
//! in-memory copy of it and writes every mutation straight back through a
//! [`Location`], so the two never disagree once a mutator returns.
//!
//! | param | meaning | default |
//! |---|---|---|
//! | `file` | results file to fetch | none |
//! | `metric` | `user`, `sys` or `maxrss` | `user` |
//! | `excludedCommands` | comma-joined series labels to start hidden | empty |
//! | `excludedLanguages` | comma-joined language prefixes to drop | empty |

use crate::error::{Error, Result};
use crate::metric::Metric;
use std::collections::BTreeSet;
use tracing::{debug, warn};
use url::form_urlencoded;

pub const FILE_PARAM: &str = "file";
pub const METRIC_PARAM: &str = "metric";
pub const EXCLUDED_COMMANDS_PARAM: &str = "excludedCommands";
pub const EXCLUDED_LANGUAGES_PARAM: &str = "excludedLanguages";

/// Sub-delimiter for set-valued parameters
const SET_DELIMITER: char = ',';

/// Where the query string of record lives
pub trait Location {
    /// Current query string, with or without the leading `?`
    fn query(&self) -> String;

    /// Rewrite the query string in place; nothing is recomputed
    fn replace(&mut self, query: &str);

    /// Rewrite the query string and start a fresh pipeline run
    fn reload(&mut self, query: &str);
}

/// In-memory [`Location`] for native callers and tests
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryLocation {
    query: String,
    replaces: usize,
    reloads: usize,
}

impl MemoryLocation {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Number of in-place rewrites so far
    pub fn replaces(&self) -> usize {
        self.replaces
    }

    /// Number of reloads requested so far
    pub fn reloads(&self) -> usize {
        self.reloads
    }
}

impl Location for MemoryLocation {
    fn query(&self) -> String {
        self.query.clone()
    }

    fn replace(&mut self, query: &str) {
        self.query = query.to_string();
        self.replaces += 1;
    }

    fn reload(&mut self, query: &str) {
        self.query = query.to_string();
        self.reloads += 1;
    }
}

/// What a mutation did to the location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// State already matched; the location was not touched
    Unchanged,
    /// Query rewritten in place; presentation-only change
    Replaced,
    /// Query rewritten and a fresh pipeline run is required
    Reloaded,
}

impl Navigation {
    pub fn requires_rerun(&self) -> bool {
        matches!(self, Navigation::Reloaded)
    }
}

/// Decoded view parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    file: Option<String>,
    metric: Metric,
    excluded_commands: BTreeSet<String>,
    excluded_languages: BTreeSet<String>,
    /// Unrecognised parameters, kept in order so rewrites do not drop them
    extra: Vec<(String, String)>,
}

impl ViewState {
    /// Decode a query string; a leading `?` is accepted
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut state = Self::default();
        let mut seen: BTreeSet<String> = BTreeSet::new();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let known = matches!(
                key.as_ref(),
                FILE_PARAM | METRIC_PARAM | EXCLUDED_COMMANDS_PARAM | EXCLUDED_LANGUAGES_PARAM
            );
            if known && !seen.insert(key.to_string()) {
                debug!(param = %key, "ignoring repeated parameter");
                continue;
            }

            match key.as_ref() {
                FILE_PARAM => {
                    let file = value.trim();
                    state.file = (!file.is_empty()).then(|| file.to_string());
                }
                METRIC_PARAM => match value.parse::<Metric>() {
                    Ok(metric) => state.metric = metric,
                    Err(e) => warn!("{}; using {}", e, Metric::default()),
                },
                EXCLUDED_COMMANDS_PARAM => state.excluded_commands = split_set(&value),
                EXCLUDED_LANGUAGES_PARAM => state.excluded_languages = split_set(&value),
                _ => state.extra.push((key.to_string(), value.to_string())),
            }
        }

        state
    }

    /// Encode back into a query string (no leading `?`)
    pub fn to_query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());

        if let Some(file) = &self.file {
            query.append_pair(FILE_PARAM, file);
        }
        query.append_pair(METRIC_PARAM, self.metric.as_str());
        if !self.excluded_commands.is_empty() {
            query.append_pair(EXCLUDED_COMMANDS_PARAM, &join_set(&self.excluded_commands));
        }
        if !self.excluded_languages.is_empty() {
            query.append_pair(EXCLUDED_LANGUAGES_PARAM, &join_set(&self.excluded_languages));
        }
        for (key, value) in &self.extra {
            query.append_pair(key, value);
        }

        query.finish()
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn command_hidden(&self, label: &str) -> bool {
        self.excluded_commands.contains(label)
    }

    pub fn language_disabled(&self, prefix: &str) -> bool {
        self.excluded_languages.contains(prefix)
    }

    pub fn excluded_commands(&self) -> impl Iterator<Item = &str> {
        self.excluded_commands.iter().map(String::as_str)
    }

    pub fn excluded_languages(&self) -> impl Iterator<Item = &str> {
        self.excluded_languages.iter().map(String::as_str)
    }
}

fn split_set(value: &str) -> BTreeSet<String> {
    value
        .split(SET_DELIMITER)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn join_set(set: &BTreeSet<String>) -> String {
    set.iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// Set elements are comma-joined in the URL, so they may not contain one
fn set_element(kind: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::InvalidParam(format!("{} name is empty", kind)));
    }
    if value.contains(SET_DELIMITER) {
        return Err(Error::InvalidParam(format!(
            "{} name {:?} contains ','",
            kind, value
        )));
    }
    Ok(value.to_string())
}

/// View state mirrored into a [`Location`]
#[derive(Debug)]
pub struct Params<L> {
    state: ViewState,
    location: L,
}

impl<L: Location> Params<L> {
    /// Read the initial state from the location's query string
    pub fn from_location(location: L) -> Self {
        let state = ViewState::from_query(&location.query());
        Self { state, location }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn file(&self) -> Option<&str> {
        self.state.file()
    }

    /// Select a results file; an empty name clears the selection
    pub fn set_file(&mut self, file: &str) -> Navigation {
        let file = file.trim();
        self.state.file = (!file.is_empty()).then(|| file.to_string());
        self.reload()
    }

    pub fn metric(&self) -> Metric {
        self.state.metric()
    }

    pub fn set_metric(&mut self, metric: Metric) -> Navigation {
        self.state.metric = metric;
        self.reload()
    }

    pub fn command_hidden(&self, label: &str) -> bool {
        self.state.command_hidden(label)
    }

    pub fn language_disabled(&self, prefix: &str) -> bool {
        self.state.language_disabled(prefix)
    }

    pub fn enable_language(&mut self, prefix: &str) -> Result<Navigation> {
        let prefix = set_element("language", prefix)?;
        if self.state.excluded_languages.remove(&prefix) {
            Ok(self.reload())
        } else {
            Ok(Navigation::Unchanged)
        }
    }

    pub fn disable_language(&mut self, prefix: &str) -> Result<Navigation> {
        let prefix = set_element("language", prefix)?;
        if self.state.excluded_languages.insert(prefix) {
            Ok(self.reload())
        } else {
            Ok(Navigation::Unchanged)
        }
    }

    pub fn show_command(&mut self, label: &str) -> Result<Navigation> {
        let label = set_element("command", label)?;
        if self.state.excluded_commands.remove(&label) {
            Ok(self.replace())
        } else {
            Ok(Navigation::Unchanged)
        }
    }

    pub fn hide_command(&mut self, label: &str) -> Result<Navigation> {
        let label = set_element("command", label)?;
        if self.state.excluded_commands.insert(label) {
            Ok(self.replace())
        } else {
            Ok(Navigation::Unchanged)
        }
    }

    fn replace(&mut self) -> Navigation {
        let query = self.state.to_query();
        debug!(%query, "replacing query");
        self.location.replace(&query);
        Navigation::Replaced
    }

    fn reload(&mut self) -> Navigation {
        let query = self.state.to_query();
        debug!(%query, "reloading with query");
        self.location.reload(&query);
        Navigation::Reloaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn params(query: &str) -> Params<MemoryLocation> {
        Params::from_location(MemoryLocation::new(query))
    }

    fn assert_in_sync(params: &Params<MemoryLocation>) {
        assert_eq!(
            &ViewState::from_query(&params.location().query()),
            params.state()
        );
    }

    #[test]
    fn test_defaults() {
        let state = ViewState::from_query("");

        assert_eq!(state.file(), None);
        assert_eq!(state.metric(), Metric::User);
        assert_eq!(state.excluded_commands().count(), 0);
        assert_eq!(state.excluded_languages().count(), 0);
    }

    #[test]
    fn test_from_query_reads_all_params() {
        let state = ViewState::from_query(
            "?file=report.csv&metric=maxrss&excludedCommands=rs%2Fa,py/b&excludedLanguages=js",
        );

        assert_eq!(state.file(), Some("report.csv"));
        assert_eq!(state.metric(), Metric::Maxrss);
        assert!(state.command_hidden("rs/a"));
        assert!(state.command_hidden("py/b"));
        assert!(!state.command_hidden("rs/b"));
        assert!(state.language_disabled("js"));
        assert!(!state.language_disabled("rs"));
    }

    #[test]
    fn test_unknown_metric_falls_back_to_default() {
        let state = ViewState::from_query("file=a.csv&metric=wall");
        assert_eq!(state.metric(), Metric::User);
    }

    #[test]
    fn test_empty_file_is_absent() {
        assert_eq!(ViewState::from_query("file=").file(), None);
        assert_eq!(ViewState::from_query("file=%20").file(), None);
    }

    #[test]
    fn test_empty_set_elements_dropped() {
        let state = ViewState::from_query("excludedLanguages=,js,,py,");
        let langs: Vec<&str> = state.excluded_languages().collect();
        assert_eq!(langs, vec!["js", "py"]);
    }

    #[test]
    fn test_query_round_trip() {
        let mut p = params("");
        p.set_file("results/report.csv");
        p.set_metric(Metric::Sys);
        p.hide_command("js/main_csv").unwrap();
        p.hide_command("py/main dict").unwrap();
        p.disable_language("rs").unwrap();

        let rebuilt = ViewState::from_query(&p.state().to_query());
        assert_eq!(&rebuilt, p.state());
        assert_eq!(rebuilt.file(), Some("results/report.csv"));
        assert!(rebuilt.command_hidden("py/main dict"));
    }

    #[test]
    fn test_unknown_params_preserved() {
        let mut p = params("theme=dark&file=a.csv&ref=ci");
        p.hide_command("rs/a").unwrap();

        let query = p.location().query();
        assert!(query.contains("theme=dark"));
        assert!(query.contains("ref=ci"));
        assert_in_sync(&p);
    }

    #[test]
    fn test_file_and_metric_reload() {
        let mut p = params("file=a.csv");

        assert_eq!(p.set_file("b.csv"), Navigation::Reloaded);
        assert_eq!(p.set_metric(Metric::Maxrss), Navigation::Reloaded);
        assert_eq!(p.location().reloads(), 2);
        assert_eq!(p.location().replaces(), 0);
        assert_eq!(p.file(), Some("b.csv"));
        assert_in_sync(&p);
    }

    #[test]
    fn test_resubmitting_same_file_reloads() {
        let mut p = params("file=a.csv");
        assert_eq!(p.set_file("a.csv"), Navigation::Reloaded);
        assert_eq!(p.location().reloads(), 1);
    }

    #[test]
    fn test_clearing_file() {
        let mut p = params("file=a.csv");
        p.set_file("  ");
        assert_eq!(p.file(), None);
        assert!(!p.location().query().contains("file="));
    }

    #[test]
    fn test_language_toggles_reload() {
        let mut p = params("file=a.csv");

        assert_eq!(p.disable_language("py").unwrap(), Navigation::Reloaded);
        assert!(p.language_disabled("py"));
        assert_in_sync(&p);

        assert_eq!(p.disable_language("py").unwrap(), Navigation::Unchanged);
        assert_eq!(p.enable_language("py").unwrap(), Navigation::Reloaded);
        assert!(!p.language_disabled("py"));
        assert_eq!(p.enable_language("py").unwrap(), Navigation::Unchanged);

        assert_eq!(p.location().reloads(), 2);
        assert_in_sync(&p);
    }

    #[test]
    fn test_command_toggles_replace_only() {
        let mut p = params("file=a.csv");

        assert_eq!(p.hide_command("rs/a").unwrap(), Navigation::Replaced);
        assert!(p.command_hidden("rs/a"));
        assert_in_sync(&p);

        assert_eq!(p.show_command("rs/a").unwrap(), Navigation::Replaced);
        assert!(!p.command_hidden("rs/a"));
        assert_eq!(p.show_command("rs/a").unwrap(), Navigation::Unchanged);

        assert_eq!(p.location().replaces(), 2);
        assert_eq!(p.location().reloads(), 0);
        assert_in_sync(&p);
    }

    #[test]
    fn test_comma_in_set_element_rejected() {
        let mut p = params("");

        assert!(matches!(
            p.hide_command("rs/a,b"),
            Err(Error::InvalidParam(_))
        ));
        assert!(matches!(
            p.disable_language(""),
            Err(Error::InvalidParam(_))
        ));
        assert_eq!(p.location().replaces() + p.location().reloads(), 0);
    }

    #[test]
    fn test_navigation_requires_rerun() {
        assert!(Navigation::Reloaded.requires_rerun());
        assert!(!Navigation::Replaced.requires_rerun());
        assert!(!Navigation::Unchanged.requires_rerun());
    }
}
