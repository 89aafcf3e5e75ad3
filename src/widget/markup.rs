//! Result rendering as escaped markup, plus the status line strings.
//!
//! The result fields come from an untrusted backend, so every piece of
//! text is escaped before it is interpolated into a fragment. The plain
//! clipboard text is the one deliberate exception.

use crate::api::ResultItem;

use super::ResultsPane;

/// Status line for a failed request.
pub const STATUS_NETWORK_ERROR: &str = "Network error";

/// Status line (and placeholder text) for an empty result set.
pub const STATUS_NO_RESULTS: &str = "No results";

/// Escape `& < > " '` for safe insertion as markup text.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the results area as an HTML fragment.
pub fn results(pane: &ResultsPane) -> String {
    match pane {
        ResultsPane::Empty => String::new(),
        ResultsPane::NoResults => {
            format!("<div class=\"placeholder\">{}</div>", STATUS_NO_RESULTS)
        }
        ResultsPane::Error => "<div class=\"error\">Error fetching results</div>".to_string(),
        ResultsPane::Results(items) => {
            let mut out = String::new();
            for item in items {
                out.push_str(&card(item));
            }
            out
        }
    }
}

/// Render a single result card.
pub fn card(item: &ResultItem) -> String {
    format!(
        concat!(
            "<div class=\"card\">",
            "<div class=\"code\">{} <span class=\"badge\">{}</span></div>",
            "<div class=\"description\">{}</div>",
            "</div>"
        ),
        escape(&item.code),
        escape(&item.source),
        escape(&item.description),
    )
}

/// Plain clipboard text for a result: `<code> - <description>`.
pub fn copy_text(item: &ResultItem) -> String {
    format!("{} - {}", item.code, item.description)
}

/// Status line confirming a clipboard copy.
pub fn copied_status(text: &str) -> String {
    format!("Copied: {}", text)
}

/// Status line for a non-empty result set.
pub fn status_found(count: usize, query: &str) -> String {
    format!("Found {} results for \"{}\"", count, query)
}
