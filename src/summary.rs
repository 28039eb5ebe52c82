//! Plain-text rendering of averaged results

use bench_report_core::{AveragedSeries, Axis, Language, Metric, ViewState};

/// Markdown table of every (command, size) mean, commands of disabled languages omitted
pub fn averages_table(averaged: &AveragedSeries, state: &ViewState) -> String {
    let metric = state.metric();
    let x = Axis::size();
    let y = Axis::for_metric(metric);

    let visible: Vec<(&str, &[(u64, f64)])> = averaged
        .iter()
        .filter(|(command, _)| !state.language_disabled(Language::prefix(command)))
        .collect();

    if visible.is_empty() {
        return "No benchmark results to show.".to_string();
    }

    let mut lines = Vec::new();
    lines.push(format!("## Mean {} by input size\n", metric.label()));
    lines.push(format!("| Command | {} | {} |", x.title, y.title));
    lines.push("|---------|------|------|".to_string());

    for (command, points) in visible {
        let marker = if state.command_hidden(command) {
            " (hidden)"
        } else {
            ""
        };
        for (size, value) in points {
            lines.push(format!(
                "| {}{} | {} | {} |",
                command,
                marker,
                x.format_tick(*size as f64),
                y.format_tick(*value)
            ));
        }
    }

    lines.join("\n")
}

/// Short one-line description of the view, for logs
pub fn describe(state: &ViewState) -> String {
    let mut parts = vec![format!(
        "file={}",
        state.file().unwrap_or("<none>")
    )];
    if state.metric() != Metric::default() {
        parts.push(format!("metric={}", state.metric()));
    }
    let languages: Vec<&str> = state.excluded_languages().collect();
    if !languages.is_empty() {
        parts.push(format!("without {}", languages.join("/")));
    }
    parts.join(" ")
}
