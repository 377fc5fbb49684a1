//! Text output formatting

use std::fmt::Write as _;

use colored::Colorize;
use folio_core::{RenderedResult, SearchView};
use html_escape::decode_html_entities;

use super::NO_RESULTS;

pub struct TextFormatter;

impl TextFormatter {
    /// Grouped results with highlighted terms; nothing for a cleared view.
    pub fn format_view(view: &SearchView, mark_tag: &str) -> String {
        let groups = match view {
            SearchView::Cleared => return String::new(),
            SearchView::NoResults => return format!("{NO_RESULTS}\n"),
            SearchView::Results(groups) => groups,
        };

        let mut out = String::new();
        for (idx, group) in groups.iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            let _ = writeln!(
                out,
                "{} {}",
                group.display_name.bold().underline(),
                format!("({})", group.results.len()).bright_black()
            );
            for result in &group.results {
                Self::format_result(&mut out, result, mark_tag);
            }
        }
        out
    }

    fn format_result(out: &mut String, result: &RenderedResult, mark_tag: &str) {
        let _ = writeln!(out, "  ◆ {}", decorate(&result.title_html, mark_tag).bold());
        let _ = writeln!(out, "    {}", result.url.cyan());

        let meta: Vec<&str> = [result.category.as_deref(), result.date.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if !meta.is_empty() {
            let _ = writeln!(out, "    {}", meta.join(" · ").bright_black());
        }
        for snippet in &result.snippets {
            let _ = writeln!(out, "    {}", decorate(snippet, mark_tag));
        }
    }
}

/// Turn an escaped fragment with `<tag>` markers into terminal text.
fn decorate(fragment: &str, tag: &str) -> String {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let mut out = String::with_capacity(fragment.len());
    let mut rest = fragment;

    while let Some(start) = rest.find(&open) {
        out.push_str(&decode_html_entities(&rest[..start]));
        let inner = &rest[start + open.len()..];
        let Some(end) = inner.find(&close) else {
            rest = inner;
            break;
        };
        let marked = decode_html_entities(&inner[..end]);
        let _ = write!(out, "{}", marked.yellow().bold());
        rest = &inner[end + close.len()..];
    }
    out.push_str(&decode_html_entities(rest));
    out
}
