//! Dioxus-based benchmark dashboard for bench-report
//!
//! A pure Rust frontend that compiles to WebAssembly.
//! 100% Rust - no manually written JS/TS/CSS.
//! All styling is inline in Rust code.
//!
//! The view lives in the page's query string (`?file=...&metric=...`).
//! Changing the file, the metric or the enabled languages re-runs the
//! pipeline; toggling a legend entry only rewrites `excludedCommands`.

use bench_report_core::{ChartConfig, Controller, Fetch, Language, Metric, Params, Phase};
use dioxus::prelude::*;
use tracing::warn;

mod styles;
mod web;

use styles::*;
use web::{GlooFetch, WebLocation};

/// Global theme context - true = dark mode
#[derive(Clone, Copy)]
struct ThemeCtx(Signal<bool>);

/// The single pipeline controller, shared by every component
#[derive(Clone, Copy)]
struct ControllerCtx(Signal<Controller<WebLocation>>);

const CHART_WIDTH: f64 = 800.0;
const CHART_HEIGHT: f64 = 400.0;
const CHART_PADDING: f64 = 60.0;

fn main() {
    tracing_wasm::set_as_global_default();
    launch(App);
}

/// Start a pipeline run and deliver its result when the fetch resolves
fn rerun(mut controller: Signal<Controller<WebLocation>>) {
    let Some(ticket) = controller.write().begin() else {
        return;
    };
    spawn(async move {
        let body = GlooFetch.fetch_text(ticket.file()).await;
        controller.write().complete(&ticket, body);
    });
}

#[component]
fn App() -> Element {
    // Theme state - default to dark mode
    let dark_mode = use_signal(|| true);
    use_context_provider(|| ThemeCtx(dark_mode));

    let controller = use_signal(|| Controller::new(Params::from_location(WebLocation)));
    use_context_provider(|| ControllerCtx(controller));

    use_effect(move || rerun(controller));

    let dark = *dark_mode.read();
    let (phase, loading) = {
        let c = controller.read();
        (c.phase().clone(), c.is_loading())
    };

    rsx! {
        div { style: "{app_style(dark)}",
            Header {}

            main { style: "{main_content_style(dark)}",
                Controls {}

                if loading {
                    LoadingState {}
                }

                {match phase {
                    Phase::AwaitingFile { error } => rsx! {
                        if let Some(e) = error {
                            ErrorState { message: e.to_string() }
                        } else if !loading {
                            EmptyState { message: "Enter the name of a results file." }
                        }
                    },
                    Phase::Rendered(config) => rsx! {
                        if config.datasets.is_empty() {
                            EmptyState { message: "No benchmark series to show." }
                        } else {
                            Chart { config }
                        }
                    },
                }}
            }
        }
    }
}

#[component]
fn Header() -> Element {
    let ThemeCtx(mut dark_mode) = use_context::<ThemeCtx>();
    let dark = *dark_mode.read();

    rsx! {
        header { style: "{header_style(dark)}",
            h1 { style: "{title_style(dark)}", "bench-report" }
            button {
                style: "{toggle_btn_style(dark)}",
                onclick: move |_| {
                    let current = *dark_mode.read();
                    dark_mode.set(!current);
                },
                if dark { "☀ light" } else { "☾ dark" }
            }
        }
    }
}

#[component]
fn Controls() -> Element {
    let ThemeCtx(dark_mode) = use_context::<ThemeCtx>();
    let dark = *dark_mode.read();

    rsx! {
        div { style: "{controls_style(dark)}",
            FileForm {}
            MetricPicker {}
            LanguageToggles {}
        }
    }
}

#[component]
fn FileForm() -> Element {
    let ThemeCtx(dark_mode) = use_context::<ThemeCtx>();
    let ControllerCtx(mut controller) = use_context::<ControllerCtx>();
    let dark = *dark_mode.read();

    let (current, awaiting) = {
        let c = controller.read();
        (
            c.params().file().unwrap_or_default().to_string(),
            matches!(c.phase(), Phase::AwaitingFile { .. }),
        )
    };
    let mut draft = use_signal(|| current.clone());

    rsx! {
        form {
            style: "{control_group_style(dark)}",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                let file = draft.read().trim().to_string();
                let navigation = controller.write().select_file(&file);
                if navigation.requires_rerun() {
                    rerun(controller);
                }
            },
            label { r#for: "file", "Results file" }
            input {
                id: "file",
                r#type: "text",
                style: "{input_style(dark)}",
                placeholder: "report.csv",
                autofocus: awaiting,
                value: "{draft}",
                oninput: move |evt| draft.set(evt.value()),
            }
            button { r#type: "submit", style: "{toggle_btn_style(dark)}", "Load" }
        }
    }
}

#[component]
fn MetricPicker() -> Element {
    let ThemeCtx(dark_mode) = use_context::<ThemeCtx>();
    let ControllerCtx(mut controller) = use_context::<ControllerCtx>();
    let dark = *dark_mode.read();
    let selected = controller.read().params().metric();

    rsx! {
        div { style: "{control_group_style(dark)}",
            span { style: "{muted_style(dark)}", "Metric" }
            for metric in Metric::ALL {
                label { key: "{metric}",
                    input {
                        r#type: "radio",
                        name: "metric",
                        value: metric.as_str(),
                        checked: metric == selected,
                        onchange: move |_| {
                            let navigation = controller.write().select_metric(metric);
                            if navigation.requires_rerun() {
                                rerun(controller);
                            }
                        },
                    }
                    " {metric.label()}"
                }
            }
        }
    }
}

#[component]
fn LanguageToggles() -> Element {
    let ThemeCtx(dark_mode) = use_context::<ThemeCtx>();
    let ControllerCtx(mut controller) = use_context::<ControllerCtx>();
    let dark = *dark_mode.read();

    rsx! {
        div { style: "{control_group_style(dark)}",
            span { style: "{muted_style(dark)}", "Languages" }
            for language in Language::KNOWN {
                {
                    let code = language.code().unwrap_or_default();
                    let enabled = !controller.read().params().language_disabled(code);
                    rsx! {
                        label { key: "{code}",
                            input {
                                r#type: "checkbox",
                                checked: enabled,
                                onchange: move |_| {
                                    let outcome = controller
                                        .write()
                                        .set_language_enabled(code, !enabled);
                                    match outcome {
                                        Ok(navigation) if navigation.requires_rerun() => {
                                            rerun(controller)
                                        }
                                        Ok(_) => {}
                                        Err(e) => warn!("{}", e),
                                    }
                                },
                            }
                            " {language.name()}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn LoadingState() -> Element {
    let ThemeCtx(dark_mode) = use_context::<ThemeCtx>();
    let dark = *dark_mode.read();

    rsx! {
        div { style: "{loading_style(dark)}",
            "Loading..."
        }
    }
}

#[component]
fn ErrorState(message: String) -> Element {
    let ThemeCtx(dark_mode) = use_context::<ThemeCtx>();
    let dark = *dark_mode.read();

    rsx! {
        div { style: "{error_style(dark)}", "role": "alert",
            strong { "Error: " }
            "{message}"
        }
    }
}

#[component]
fn EmptyState(message: String) -> Element {
    let ThemeCtx(dark_mode) = use_context::<ThemeCtx>();
    let dark = *dark_mode.read();

    rsx! {
        div { style: "{empty_style(dark)}",
            p { "{message}" }
            code { style: "{code_style(dark)}", "bench-report sample --output report.csv" }
        }
    }
}

/// Chart card: SVG plot plus a clickable legend
#[component]
fn Chart(config: ChartConfig) -> Element {
    let ThemeCtx(dark_mode) = use_context::<ThemeCtx>();
    let ControllerCtx(mut controller) = use_context::<ControllerCtx>();
    let dark = *dark_mode.read();

    rsx! {
        div { style: "{chart_card_style(dark)}",
            div { style: "{legend_style(dark)}",
                for dataset in config.datasets.iter() {
                    {
                        let label = dataset.label.clone();
                        rsx! {
                            div {
                                key: "{dataset.label}",
                                style: "{legend_item_style(dataset.hidden)}",
                                onclick: move |_| {
                                    if let Err(e) = controller.write().toggle_command(&label) {
                                        warn!("{}", e);
                                    }
                                },
                                span { style: "width: 12px; height: 12px; background: {dataset.border_color}; flex-shrink: 0;" }
                                span { "{dataset.label}" }
                            }
                        }
                    }
                }
            }
            ChartSvg { config: config.clone() }
        }
    }
}

#[component]
fn ChartSvg(config: ChartConfig) -> Element {
    let padding = CHART_PADDING;
    let plot_height = CHART_HEIGHT - 2.0 * padding;
    let max_value = match config.max_visible_value() {
        v if v > 0.0 => v,
        _ => 1.0,
    };
    let count = config.labels.len();

    rsx! {
        svg {
            style: "width: 100%; height: auto; max-height: 520px;",
            view_box: "0 0 {CHART_WIDTH} {CHART_HEIGHT}",
            "preserveAspectRatio": "xMidYMid meet",

            for i in 0..5 {
                line {
                    x1: "{padding}",
                    y1: "{padding + plot_height * (i as f64 / 4.0)}",
                    x2: "{CHART_WIDTH - padding}",
                    y2: "{padding + plot_height * (i as f64 / 4.0)}",
                    stroke: "{GRID_COLOR}",
                    "stroke-width": "1",
                }
            }

            for i in 0..5 {
                text {
                    x: "{padding - 6.0}",
                    y: "{padding + plot_height * (i as f64 / 4.0) + 4.0}",
                    fill: "{AXIS_COLOR}",
                    "font-size": "11",
                    "text-anchor": "end",
                    "{config.scales.y.format_tick(max_value * (1.0 - i as f64 / 4.0))}"
                }
            }

            for (i, size) in config.labels.iter().enumerate() {
                text {
                    key: "x-{size}",
                    x: "{x_position(i, count)}",
                    y: "{CHART_HEIGHT - padding + 18.0}",
                    fill: "{AXIS_COLOR}",
                    "font-size": "11",
                    "text-anchor": "middle",
                    "{config.scales.x.format_tick(*size as f64)}"
                }
            }

            text {
                x: "{CHART_WIDTH / 2.0}",
                y: "{CHART_HEIGHT - 12.0}",
                fill: "{AXIS_COLOR}",
                "font-size": "12",
                "text-anchor": "middle",
                "{config.scales.x.title}"
            }
            text {
                x: "16",
                y: "{CHART_HEIGHT / 2.0}",
                fill: "{AXIS_COLOR}",
                "font-size": "12",
                "text-anchor": "middle",
                "transform": "rotate(-90 16 {CHART_HEIGHT / 2.0})",
                "{config.scales.y.title}"
            }

            for dataset in config.datasets.iter().filter(|d| !d.hidden) {
                {
                    let points: Vec<(usize, f64)> = config
                        .labels
                        .iter()
                        .enumerate()
                        .filter_map(|(i, size)| dataset.data.get(size).map(|v| (i, *v)))
                        .collect();
                    let path = generate_line_path(&points, count, max_value);
                    let color = dataset.border_color.to_string();
                    rsx! {
                        path {
                            key: "{dataset.label}-line",
                            d: "{path}",
                            fill: "none",
                            stroke: "{color}",
                            "stroke-width": "2",
                        }
                        for (i, value) in points.iter() {
                            circle {
                                key: "{dataset.label}-point-{i}",
                                cx: "{x_position(*i, count)}",
                                cy: "{y_position(*value, max_value)}",
                                r: "3",
                                fill: "{color}",
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Horizontal position of the `index`-th size label
fn x_position(index: usize, count: usize) -> f64 {
    let width = CHART_WIDTH - 2.0 * CHART_PADDING;
    if count <= 1 {
        return CHART_PADDING + width / 2.0;
    }
    CHART_PADDING + width * (index as f64 / (count - 1) as f64)
}

fn y_position(value: f64, max_value: f64) -> f64 {
    let height = CHART_HEIGHT - 2.0 * CHART_PADDING;
    CHART_PADDING + height * (1.0 - value / max_value)
}

/// SVG path through a series; missing sizes are spanned
fn generate_line_path(points: &[(usize, f64)], count: usize, max_value: f64) -> String {
    let mut path = String::new();

    for (n, (i, value)) in points.iter().enumerate() {
        let x = x_position(*i, count);
        let y = y_position(*value, max_value);

        if n == 0 {
            path.push_str(&format!("M {:.1} {:.1}", x, y));
        } else {
            path.push_str(&format!(" L {:.1} {:.1}", x, y));
        }
    }

    path
}
