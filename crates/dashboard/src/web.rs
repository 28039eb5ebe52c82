//! Browser-side [`Location`] and [`Fetch`]
//!
//! The query string of record is `window.location.search`. Rewrites go
//! through the History API so the page itself is never reloaded; a
//! `reload` pushes a history entry and the caller re-runs the pipeline.

use bench_report_core::{Fetch, FetchError, Location};
use gloo_net::http::Request;
use http::StatusCode;
use tracing::warn;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WebLocation;

impl WebLocation {
    fn write(&self, query: &str, push: bool) {
        let Some(window) = web_sys::window() else {
            warn!("no window, query not written");
            return;
        };
        let url = if query.is_empty() {
            window.location().pathname().unwrap_or_default()
        } else {
            format!("?{query}")
        };
        let history = match window.history() {
            Ok(history) => history,
            Err(e) => {
                warn!("history unavailable: {:?}", e);
                return;
            }
        };
        let written = if push {
            history.push_state_with_url(&JsValue::NULL, "", Some(&url))
        } else {
            history.replace_state_with_url(&JsValue::NULL, "", Some(&url))
        };
        if let Err(e) = written {
            warn!("failed to write query {url}: {:?}", e);
        }
    }
}

impl Location for WebLocation {
    fn query(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default()
    }

    fn replace(&mut self, query: &str) {
        self.write(query, false);
    }

    fn reload(&mut self, query: &str) {
        self.write(query, true);
    }
}

/// HTTP/2 responses carry no reason phrase; fall back to the canonical one
fn status_reason(status: u16, text: String) -> String {
    if !text.trim().is_empty() {
        return text;
    }
    StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown")
        .to_string()
}

/// Fetches results files relative to the page
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooFetch;

impl Fetch for GlooFetch {
    async fn fetch_text(&self, resource: &str) -> Result<String, FetchError> {
        let response = Request::get(resource)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !response.ok() {
            return Err(FetchError::Status {
                status: response.status(),
                reason: status_reason(response.status(), response.status_text()),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}
