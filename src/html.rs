//! Static HTML report with Chart.js
//!
//! The page is a snapshot of one view. Legend clicks toggle series and
//! persist `excludedCommands` with `history.replaceState`; everything that
//! needs a recompute (file, metric, languages) is fixed at render time.

use crate::error::{Error, Result};
use bench_report_core::{ChartConfig, ViewState};
use minijinja::{context, Environment};
use std::path::Path;

/// HTML template for the report page
const REPORT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    <script src="https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js"></script>
    <style>
        :root {
            --bg-primary: #0d1117;
            --bg-secondary: #161b22;
            --text-primary: #c9d1d9;
            --text-muted: #6e7681;
            --border-color: #30363d;
        }

        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif;
            background: var(--bg-primary);
            color: var(--text-primary);
            line-height: 1.6;
        }

        .container {
            max-width: 1200px;
            margin: 0 auto;
            padding: 2rem;
        }

        header {
            margin-bottom: 1.5rem;
        }

        h1 {
            font-size: 1.5rem;
            font-weight: 600;
        }

        .view {
            color: var(--text-muted);
            font-family: 'SF Mono', 'Fira Code', monospace;
            font-size: 0.85rem;
        }

        .chart-container {
            background: #ffffff;
            border: 1px solid var(--border-color);
            border-radius: 12px;
            padding: 1.5rem;
            height: 520px;
            position: relative;
        }

        .no-data {
            text-align: center;
            padding: 3rem;
            color: var(--text-muted);
        }

        footer {
            text-align: center;
            padding: 2rem;
            color: var(--text-muted);
            font-size: 0.9rem;
        }
    </style>
</head>
<body>
    <div class="container">
        <header>
            <h1>{{ title }}</h1>
            <p class="view">{{ file }} &middot; {{ metric }}{% if excluded_languages %} &middot; without {{ excluded_languages }}{% endif %}</p>
        </header>

        {% if series_count == 0 %}
        <div class="no-data">No benchmark series to show.</div>
        {% else %}
        <div class="chart-container">
            <canvas id="mainCanvas"></canvas>
        </div>
        {% endif %}

        <footer>
            {{ series_count }} series &middot; generated {{ generated }}
        </footer>
    </div>

    <script>
        const report = {{ chart_json|safe }};

        function formatTick(axis, value) {
            const scaled = value / axis.divisor;
            const text = axis.integer
                ? Math.round(scaled).toLocaleString('en-US')
                : scaled.toLocaleString('en-US', { minimumFractionDigits: 2, maximumFractionDigits: 2 });
            return axis.suffix ? text + ' ' + axis.suffix : text;
        }

        function persistHidden(datasets) {
            const params = new URLSearchParams(window.location.search);
            const hidden = datasets.filter(d => d.hidden).map(d => d.label);
            if (hidden.length > 0) {
                params.set('excludedCommands', hidden.join(','));
            } else {
                params.delete('excludedCommands');
            }
            history.replaceState(null, '', '?' + params.toString());
        }

        document.addEventListener('DOMContentLoaded', function() {
            const canvas = document.getElementById('mainCanvas');
            if (!canvas) {
                return;
            }

            // A bookmarked URL may hide a different set than the snapshot
            const params = new URLSearchParams(window.location.search);
            if (params.has('excludedCommands')) {
                const hidden = new Set(params.get('excludedCommands').split(','));
                report.datasets.forEach(d => { d.hidden = hidden.has(d.label); });
            }

            new Chart(canvas.getContext('2d'), {
                type: 'line',
                data: {
                    labels: report.labels,
                    datasets: report.datasets.map(d => ({
                        label: d.label,
                        data: report.labels.map(x => (x in d.data ? d.data[x] : null)),
                        borderColor: d.borderColor,
                        backgroundColor: d.backgroundColor,
                        fill: d.fill,
                        hidden: d.hidden,
                        spanGaps: true,
                    })),
                },
                options: {
                    responsive: true,
                    maintainAspectRatio: false,
                    plugins: {
                        legend: {
                            onClick: function(e, item, legend) {
                                const chart = legend.chart;
                                const dataset = chart.data.datasets[item.datasetIndex];
                                dataset.hidden = !dataset.hidden;
                                chart.update();
                                persistHidden(chart.data.datasets);
                            }
                        }
                    },
                    scales: {
                        x: {
                            title: { display: true, text: report.scales.x.title },
                            ticks: {
                                callback: function(value) {
                                    return formatTick(report.scales.x, Number(this.getLabelForValue(value)));
                                }
                            }
                        },
                        y: {
                            title: { display: true, text: report.scales.y.title },
                            ticks: {
                                callback: function(value) {
                                    return formatTick(report.scales.y, value);
                                }
                            }
                        }
                    }
                }
            });
        });
    </script>
</body>
</html>
"#;

/// Report configuration
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Title for the page
    pub title: String,
    /// Path to output directory
    pub output_dir: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Benchmark Results".to_string(),
            output_dir: "dist".to_string(),
        }
    }
}

/// Serialize chart config for inline `<script>` embedding
fn script_json(config: &ChartConfig) -> Result<String> {
    let json = serde_json::to_string(config)?;
    // A label containing "</script>" must not end the script element
    Ok(json.replace("</", "<\\/"))
}

/// Render the report page for one view
pub fn generate_report(
    config: &ChartConfig,
    state: &ViewState,
    report: &ReportConfig,
) -> Result<String> {
    let mut env = Environment::new();
    // The .html name turns on HTML auto-escaping for query-derived values
    env.add_template("report.html", REPORT_TEMPLATE)?;
    let template = env.get_template("report.html")?;

    let excluded_languages = state.excluded_languages().collect::<Vec<_>>().join(", ");
    let generated = chrono::Utc::now()
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string();

    let html = template.render(context! {
        title => &report.title,
        file => state.file().unwrap_or_default(),
        metric => state.metric().label(),
        excluded_languages => excluded_languages,
        series_count => config.datasets.len(),
        generated => generated,
        chart_json => script_json(config)?,
    })?;

    Ok(html)
}

/// Write `index.html` and `chart.json` into the configured directory
pub fn write_report(
    config: &ChartConfig,
    state: &ViewState,
    report: &ReportConfig,
    base_path: &Path,
) -> Result<()> {
    let output_dir = base_path.join(&report.output_dir);
    std::fs::create_dir_all(&output_dir).map_err(|e| Error::FileWriteError {
        path: output_dir.display().to_string(),
        source: e,
    })?;

    let html = generate_report(config, state, report)?;
    let index_path = output_dir.join("index.html");
    std::fs::write(&index_path, html).map_err(|e| Error::FileWriteError {
        path: index_path.display().to_string(),
        source: e,
    })?;

    // Also write the raw chart config as JSON
    let data_path = output_dir.join("chart.json");
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&data_path, json).map_err(|e| Error::FileWriteError {
        path: data_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
