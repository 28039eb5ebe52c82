//! Binary to generate the index.html from Rust
//!
//! Run with: cargo run --bin generate_html
//!
//! Writes the page shell for the Dioxus WASM app. The dashboard fetches
//! results files relative to the page, so every `*.csv` already sitting
//! in `dist/` is listed as a `?file=` link; the list doubles as the
//! fallback when the WASM bundle fails to load.

use std::fs;
use std::io;
use std::path::Path;
use url::form_urlencoded;

const SAMPLE_HINT: &str = "bench-report sample --output dist/report.csv";

fn main() -> io::Result<()> {
    let dist_path = Path::new("dist");
    fs::create_dir_all(dist_path)?;

    let results = results_files(dist_path)?;
    let html = generate_index_html(&results);

    let index_path = dist_path.join("index.html");
    fs::write(&index_path, &html)?;

    println!("✅ Generated: {}", index_path.display());
    if results.is_empty() {
        println!("   No results files in dist/ yet: {SAMPLE_HINT}");
    } else {
        println!("   Results files: {}", results.join(", "));
    }
    Ok(())
}

/// CSV files next to the page, sorted by name
fn results_files(dir: &Path) -> io::Result<Vec<String>> {
    let mut files: Vec<String> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "csv"))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    files.sort();
    Ok(files)
}

/// `?file=` link for a results file
fn file_link(name: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(name.as_bytes()).collect();
    let label = name
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    format!(r#"<li><a href="?file={encoded}">{label}</a></li>"#)
}

fn generate_index_html(results: &[String]) -> String {
    let links = if results.is_empty() {
        format!("<li>none yet: run <code>{SAMPLE_HINT}</code></li>")
    } else {
        results
            .iter()
            .map(|name| file_link(name))
            .collect::<Vec<_>>()
            .join("\n            ")
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="description" content="Benchmark timings by command and input size">
    <title>bench-report</title>
    <style>
{styles}
    </style>
</head>
<body>
    <div id="loading">
        <p>loading bench-report...</p>
        <p>Results files served with this page:</p>
        <ul>
            {links}
        </ul>
    </div>
    <div id="main"></div>
    <script type="module">
        import init from './bench_report_dashboard.js';
        init().then(() => {{
            document.getElementById('loading').remove();
        }});
    </script>
</body>
</html>"#,
        styles = get_styles(),
    )
}

fn get_styles() -> &'static str {
    r#"        * { margin: 0; padding: 0; box-sizing: border-box; }
        html, body { min-height: 100%; }
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif; font-size: 14px; }
        #loading { padding: 2rem; text-align: center; font-family: inherit; }
        #loading ul { list-style: none; margin-top: 0.5rem; }
        #loading code { font-family: 'SF Mono', 'Fira Code', monospace; }
        #main { min-height: 100vh; }"#
}
