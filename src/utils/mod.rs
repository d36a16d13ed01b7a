pub mod table;

pub use table::Table;

use tracing_subscriber::EnvFilter;

/// Initialize tracing with `RUST_LOG` plus debug output for this crate
pub fn init_tracing() {
    let mut filter = EnvFilter::from_default_env();
    for directive in ["eks_demo_dashboard=debug", "launcher=debug", "dashboard=debug", "tower_http=info"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();
}

/// Escape text for use inside HTML element content or quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Parse a boolean flag value ("true"/"false", "1"/"0", "yes"/"no", case-insensitive)
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
