//! Chart configuration built from averaged results and view state
//!
//! The configuration is a plain value handed to a renderer; it is rebuilt
//! from scratch for every change and never patched in place.

use crate::data::AveragedSeries;
use crate::metric::Metric;
use crate::params::ViewState;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Language a command belongs to, derived from its two-character prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    JavaScript,
    Python,
    Rust,
    Other,
}

impl Language {
    /// Languages that can be toggled from the dashboard
    pub const KNOWN: [Language; 3] = [Language::JavaScript, Language::Python, Language::Rust];

    /// The two-character prefix of a command label (`"rs/fs_struct"` -> `"rs"`)
    pub fn prefix(command: &str) -> &str {
        match command.char_indices().nth(2) {
            Some((end, _)) => &command[..end],
            None => command,
        }
    }

    pub fn from_prefix(prefix: &str) -> Self {
        match prefix {
            "js" => Language::JavaScript,
            "py" => Language::Python,
            "rs" => Language::Rust,
            _ => Language::Other,
        }
    }

    pub fn of(command: &str) -> Self {
        Self::from_prefix(Self::prefix(command))
    }

    /// Prefix code used in `excludedLanguages`
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Language::JavaScript => Some("js"),
            Language::Python => Some("py"),
            Language::Rust => Some("rs"),
            Language::Other => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::Python => "Python",
            Language::Rust => "Rust",
            Language::Other => "other",
        }
    }

    /// Series color. A new language needs its own arm here.
    pub fn color(&self) -> Rgb {
        match self {
            Language::JavaScript => Rgb(0, 185, 95),
            Language::Python => Rgb(225, 190, 0),
            Language::Rust => Rgb(225, 120, 0),
            Language::Other => Rgb(0, 0, 0),
        }
    }
}

/// An sRGB color, serialized as `rgb(r, g, b)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Axis title and tick formatting
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub title: String,
    /// Raw values are divided by this before display
    pub divisor: f64,
    /// Unit appended to tick labels (empty for none)
    pub suffix: String,
    /// Ticks are whole numbers
    pub integer: bool,
}

impl Axis {
    /// The x-axis: input sizes
    pub fn size() -> Self {
        Self {
            title: "data size".to_string(),
            divisor: 1.0,
            suffix: String::new(),
            integer: true,
        }
    }

    /// The y-axis for a metric
    pub fn for_metric(metric: Metric) -> Self {
        match metric {
            Metric::User | Metric::Sys => Self {
                title: "seconds".to_string(),
                divisor: 1.0,
                suffix: "s".to_string(),
                integer: false,
            },
            // maxrss is reported in kilobytes
            Metric::Maxrss => Self {
                title: "megabytes".to_string(),
                divisor: 1024.0,
                suffix: "MB".to_string(),
                integer: false,
            },
        }
    }

    /// Render a raw value as a tick label
    pub fn format_tick(&self, value: f64) -> String {
        let scaled = value / self.divisor;
        let number = if self.integer {
            format_thousands(scaled.round() as i64)
        } else {
            format_decimal(scaled, 2)
        };

        if self.suffix.is_empty() {
            number
        } else {
            format!("{} {}", number, self.suffix)
        }
    }
}

/// Both chart axes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

/// One plotted series
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    /// size -> mean value
    pub data: BTreeMap<u64, f64>,
    pub border_color: Rgb,
    pub background_color: Rgb,
    pub fill: bool,
    /// Rendered as a legend entry only
    pub hidden: bool,
}

impl Dataset {
    /// Value at the largest size
    pub fn last_value(&self) -> Option<f64> {
        self.data.last_key_value().map(|(_, v)| *v)
    }
}

/// Everything a renderer needs to draw the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    /// Ascending union of all sizes across datasets
    pub labels: Vec<u64>,
    /// Ordered for the legend: largest final value first
    pub datasets: Vec<Dataset>,
    pub scales: Scales,
}

impl ChartConfig {
    pub fn dataset(&self, label: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.label == label)
    }

    /// Largest value among visible datasets
    pub fn max_visible_value(&self) -> f64 {
        self.datasets
            .iter()
            .filter(|d| !d.hidden)
            .flat_map(|d| d.data.values().copied())
            .fold(0.0f64, f64::max)
    }
}

/// Build the chart configuration for the current view
///
/// Commands of a disabled language are dropped entirely; commands listed
/// in `excludedCommands` stay in the config with `hidden` set, so their
/// legend entry can bring them back.
pub fn build(averaged: &AveragedSeries, state: &ViewState) -> ChartConfig {
    let mut datasets: Vec<Dataset> = averaged
        .iter()
        .filter(|(command, _)| !state.language_disabled(Language::prefix(command)))
        .map(|(command, points)| {
            let color = Language::of(command).color();
            Dataset {
                label: command.to_string(),
                data: points.iter().copied().collect(),
                border_color: color,
                background_color: color,
                fill: false,
                hidden: state.command_hidden(command),
            }
        })
        .collect();

    datasets.sort_by(legend_order);

    let labels: BTreeSet<u64> = datasets
        .iter()
        .flat_map(|d| d.data.keys().copied())
        .collect();

    ChartConfig {
        labels: labels.into_iter().collect(),
        datasets,
        scales: Scales {
            x: Axis::size(),
            y: Axis::for_metric(state.metric()),
        },
    }
}

/// Descending by final value; series without points sort last
fn legend_order(a: &Dataset, b: &Dataset) -> Ordering {
    match (a.last_value(), b.last_value()) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Integer with comma thousands separators (`1234567` -> `"1,234,567"`)
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

fn format_decimal(value: f64, places: usize) -> String {
    let fixed = format!("{:.*}", places, value.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let whole: i64 = whole.parse().unwrap_or(0);
    let sign = if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };

    if frac.is_empty() {
        format!("{}{}", sign, format_thousands(whole))
    } else {
        format!("{}{}.{}", sign, format_thousands(whole), frac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{average, group};
    use crate::decoder::decode;
    use pretty_assertions::assert_eq;

    fn averaged(text: &str, metric: &str) -> AveragedSeries {
        average(&group(&decode(text).unwrap(), metric).unwrap())
    }

    const REPORT: &str = "file,n,code,user,maxrss\n\
        js/main_csv,10,0,0.30,40960\n\
        js/main_csv,100,0,0.90,51200\n\
        py/main_dict,10,0,0.10,9216\n\
        py/main_dict,100,0,0.50,10240\n\
        rs/fs_struct,10,0,0.01,2048\n\
        rs/fs_struct,100,0,0.05,2048\n\
        go/main,10,0,0.02,4096\n\
        go/main,100,0,0.20,4096\n";

    #[test]
    fn test_language_prefix() {
        assert_eq!(Language::prefix("rs/fs_struct"), "rs");
        assert_eq!(Language::prefix("js"), "js");
        assert_eq!(Language::prefix("r"), "r");
        assert_eq!(Language::prefix("ü/é/x"), "ü/");
        assert_eq!(Language::of("py/main_tuple"), Language::Python);
        assert_eq!(Language::of("go/main"), Language::Other);
    }

    #[test]
    fn test_language_colors() {
        assert_eq!(Language::JavaScript.color(), Rgb(0, 185, 95));
        assert_eq!(Language::Python.color(), Rgb(225, 190, 0));
        assert_eq!(Language::Rust.color(), Rgb(225, 120, 0));
        assert_eq!(Language::Other.color(), Rgb(0, 0, 0));
        assert_eq!(Rgb(225, 120, 0).to_string(), "rgb(225, 120, 0)");
    }

    #[test]
    fn test_build_one_dataset_per_command() {
        let config = build(&averaged(REPORT, "user"), &ViewState::default());

        assert_eq!(config.datasets.len(), 4);
        assert_eq!(config.labels, vec![10, 100]);

        let rs = config.dataset("rs/fs_struct").unwrap();
        assert_eq!(rs.border_color, Rgb(225, 120, 0));
        assert_eq!(rs.data.get(&10), Some(&0.01));
        assert!(!rs.hidden);
        assert!(!rs.fill);
    }

    #[test]
    fn test_build_marks_hidden_commands() {
        let state = ViewState::from_query("excludedCommands=py/main_dict");
        let config = build(&averaged(REPORT, "user"), &state);

        assert!(config.dataset("py/main_dict").unwrap().hidden);
        assert!(!config.dataset("js/main_csv").unwrap().hidden);
    }

    #[test]
    fn test_build_drops_disabled_languages() {
        let state = ViewState::from_query("excludedLanguages=js,go");
        let config = build(&averaged(REPORT, "user"), &state);

        let labels: Vec<&str> = config.datasets.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels.len(), 2);
        assert!(!labels.iter().any(|l| l.starts_with("js")));
        assert!(!labels.iter().any(|l| l.starts_with("go")));
    }

    #[test]
    fn test_disabled_language_wins_over_visible_command() {
        // js/main_csv is not individually hidden but its language is off
        let state = ViewState::from_query("excludedLanguages=js&excludedCommands=py/main_dict");
        let config = build(&averaged(REPORT, "user"), &state);

        assert!(config.dataset("js/main_csv").is_none());
        assert!(config.dataset("py/main_dict").is_some());
    }

    #[test]
    fn test_legend_sorted_by_final_value_descending() {
        let config = build(&averaged(REPORT, "user"), &ViewState::default());

        let labels: Vec<&str> = config.datasets.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["js/main_csv", "py/main_dict", "go/main", "rs/fs_struct"]
        );
    }

    #[test]
    fn test_legend_order_is_total() {
        let mut series = AveragedSeries::default();
        for i in 0..60u32 {
            let value = if i % 3 == 0 { f64::NAN } else { f64::from(i) };
            series.insert(format!("rs/c{:02}", i), vec![(10, value)]);
        }

        let config = build(&series, &ViewState::default());
        let finite: Vec<f64> = config
            .datasets
            .iter()
            .filter_map(Dataset::last_value)
            .filter(|v| v.is_finite())
            .collect();

        assert_eq!(finite.len(), 40);
        assert!(finite.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_axes_follow_metric() {
        let user = build(&averaged(REPORT, "user"), &ViewState::default());
        assert_eq!(user.scales.x.title, "data size");
        assert_eq!(user.scales.y.title, "seconds");

        let state = ViewState::from_query("metric=maxrss");
        let rss = build(&averaged(REPORT, "maxrss"), &state);
        assert_eq!(rss.scales.y.title, "megabytes");
        assert_eq!(rss.scales.y.format_tick(51200.0), "50.00 MB");
    }

    #[test]
    fn test_tick_formatting() {
        let x = Axis::size();
        assert_eq!(x.format_tick(0.0), "0");
        assert_eq!(x.format_tick(999.0), "999");
        assert_eq!(x.format_tick(1000.0), "1,000");
        assert_eq!(x.format_tick(1_234_567.0), "1,234,567");

        let y = Axis::for_metric(Metric::Sys);
        assert_eq!(y.format_tick(1.5), "1.50 s");
        assert_eq!(y.format_tick(1234.5), "1,234.50 s");
    }

    #[test]
    fn test_format_thousands_negative() {
        assert_eq!(format_thousands(-1234), "-1,234");
        assert_eq!(format_thousands(-12), "-12");
    }

    #[test]
    fn test_max_visible_value_skips_hidden() {
        let state = ViewState::from_query("excludedCommands=js/main_csv");
        let config = build(&averaged(REPORT, "user"), &state);
        assert_eq!(config.max_visible_value(), 0.5);
    }

    #[test]
    fn test_chart_config_json_shape() {
        let averaged = averaged("file,n,code,user\nrs/a,1000,0,2.0\n", "user");
        let config = build(&averaged, &ViewState::default());
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["labels"], serde_json::json!([1000]));
        assert_eq!(json["datasets"][0]["label"], "rs/a");
        assert_eq!(json["datasets"][0]["data"]["1000"], 2.0);
        assert_eq!(json["datasets"][0]["borderColor"], "rgb(225, 120, 0)");
        assert_eq!(json["datasets"][0]["hidden"], false);
        assert_eq!(json["scales"]["x"]["title"], "data size");
        assert_eq!(json["scales"]["y"]["suffix"], "s");
    }
}
