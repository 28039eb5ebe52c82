//! Minimalistic styles - no external CSS files
//!
//! Light/dark theme for the page chrome. The chart card stays light in
//! both themes so every series color, black included, reads on it.

// ============================================================================
// Theme-aware style generators
// ============================================================================

/// Generate app style based on theme
pub fn app_style(dark: bool) -> String {
    let (bg, fg) = if dark {
        ("#0d1117", "#c9d1d9")
    } else {
        ("#ffffff", "#1a1a1a")
    };
    format!(
        "min-height: 100vh; \
         display: flex; \
         flex-direction: column; \
         font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif; \
         font-size: 14px; \
         background: {bg}; \
         color: {fg}; \
         line-height: 1.5; \
         margin: 0; \
         padding: 0;"
    )
}

/// Generate header style
pub fn header_style(dark: bool) -> String {
    let (bg, border) = if dark {
        ("#161b22", "#30363d")
    } else {
        ("#f6f8fa", "#d0d7de")
    };
    format!(
        "display: flex; \
         justify-content: space-between; \
         align-items: center; \
         padding: 0.75rem 1rem; \
         background: {bg}; \
         border-bottom: 1px solid {border};"
    )
}

/// Generate title style
pub fn title_style(_dark: bool) -> &'static str {
    "font-size: 1.1rem; \
     font-weight: 600; \
     margin: 0;"
}

/// Generate theme toggle button style
pub fn toggle_btn_style(dark: bool) -> String {
    let (bg, fg, border) = if dark {
        ("#21262d", "#c9d1d9", "#30363d")
    } else {
        ("#f6f8fa", "#1a1a1a", "#d0d7de")
    };
    format!(
        "background: {bg}; \
         color: {fg}; \
         border: 1px solid {border}; \
         padding: 0.35rem 0.75rem; \
         font-family: inherit; \
         font-size: 0.8rem; \
         border-radius: 6px; \
         cursor: pointer;"
    )
}

/// Main content area
pub fn main_content_style(_dark: bool) -> &'static str {
    "flex: 1; \
     padding: 1rem; \
     max-width: 1200px; \
     width: 100%; \
     margin: 0 auto; \
     box-sizing: border-box;"
}

/// Control bar above the chart
pub fn controls_style(dark: bool) -> String {
    let border = if dark { "#30363d" } else { "#d0d7de" };
    format!(
        "display: flex; \
         flex-wrap: wrap; \
         gap: 1.5rem; \
         align-items: center; \
         padding: 0.75rem 0; \
         border-bottom: 1px solid {border}; \
         margin-bottom: 1rem;"
    )
}

/// Group of related controls
pub fn control_group_style(_dark: bool) -> &'static str {
    "display: flex; \
     align-items: center; \
     gap: 0.5rem; \
     font-size: 0.85rem;"
}

/// File name input style
pub fn input_style(dark: bool) -> String {
    let (bg, fg, border) = if dark {
        ("#0d1117", "#c9d1d9", "#30363d")
    } else {
        ("#ffffff", "#1a1a1a", "#d0d7de")
    };
    format!(
        "width: 16rem; \
         box-sizing: border-box; \
         padding: 0.35rem 0.75rem; \
         background: {bg}; \
         color: {fg}; \
         border: 1px solid {border}; \
         border-radius: 6px; \
         font-family: 'SF Mono', 'Fira Code', monospace; \
         font-size: 0.85rem; \
         outline: none;"
    )
}

/// Chart card style
pub fn chart_card_style(dark: bool) -> String {
    let border = if dark { "#30363d" } else { "#d0d7de" };
    format!(
        "background: #ffffff; \
         color: #1a1a1a; \
         border: 1px solid {border}; \
         border-radius: 8px; \
         padding: 0.75rem;"
    )
}

/// Legend container
pub fn legend_style(_dark: bool) -> &'static str {
    "display: flex; \
     flex-wrap: wrap; \
     gap: 0.25rem 1rem; \
     justify-content: center; \
     padding: 0.5rem 0;"
}

/// Legend entry; hidden series are struck through
pub fn legend_item_style(hidden: bool) -> String {
    let (decoration, opacity) = if hidden {
        ("line-through", "0.5")
    } else {
        ("none", "1")
    };
    format!(
        "display: flex; \
         align-items: center; \
         gap: 0.35rem; \
         font-size: 0.8rem; \
         cursor: pointer; \
         user-select: none; \
         text-decoration: {decoration}; \
         opacity: {opacity};"
    )
}

/// Generate muted text style
pub fn muted_style(dark: bool) -> String {
    let fg = if dark { "#8b949e" } else { "#57606a" };
    format!("color: {fg};")
}

/// Generate loading style
pub fn loading_style(_dark: bool) -> &'static str {
    "padding: 2rem; \
     text-align: center;"
}

/// Generate error style
pub fn error_style(dark: bool) -> String {
    let border = if dark { "#f85149" } else { "#cf222e" };
    format!(
        "padding: 1rem; \
         border: 1px solid {border}; \
         border-radius: 8px; \
         margin: 1rem 0;"
    )
}

/// Generate empty state style
pub fn empty_style(_dark: bool) -> &'static str {
    "padding: 2rem; \
     text-align: center; \
     opacity: 0.7;"
}

/// Generate code/mono style
pub fn code_style(dark: bool) -> String {
    let (bg, fg) = if dark {
        ("#21262d", "#79c0ff")
    } else {
        ("#f6f8fa", "#0550ae")
    };
    format!(
        "background: {bg}; \
         color: {fg}; \
         padding: 0.2rem 0.5rem; \
         border-radius: 4px; \
         font-size: 0.85rem; \
         font-family: 'SF Mono', 'Fira Code', monospace;"
    )
}

// ============================================================================
// Chart colors (chart card is always light)
// ============================================================================

/// SVG grid line color
pub const GRID_COLOR: &str = "#eaeef2";

/// SVG axis label color
pub const AXIS_COLOR: &str = "#6e7681";
