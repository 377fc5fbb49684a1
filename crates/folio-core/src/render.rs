//! Turn grouped results into display structures and HTML.

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Serialize;

use crate::config::Config;
use crate::group::ResultGroup;
use crate::snippet::SnippetExtractor;

/// One result ready for display. `*_html` fields are escaped fragments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedResult {
    /// Escaped title with highlighted terms.
    pub title_html: String,
    /// Link target, corrected for the current page depth.
    pub url: String,
    /// Category label, if non-empty.
    pub category: Option<String>,
    /// Date label, if non-empty.
    pub date: Option<String>,
    /// Escaped, highlighted excerpts in document order.
    pub snippets: Vec<String>,
    /// `snippets` holds the highlighted description rather than content excerpts.
    pub used_description: bool,
}

/// A display group of results sharing one document type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedGroup {
    /// Group key (`blog`, `project`, ...).
    pub name: String,
    /// Heading shown above the group.
    pub display_name: String,
    /// Results in rank order.
    pub results: Vec<RenderedResult>,
}

/// What the result area currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "groups", rename_all = "snake_case")]
pub enum SearchView {
    /// Blank query; nothing displayed.
    #[default]
    Cleared,
    /// A search ran and matched nothing.
    NoResults,
    /// Grouped results of the latest search.
    Results(Vec<RenderedGroup>),
}

impl SearchView {
    /// Rendered groups, empty unless results are shown.
    pub fn groups(&self) -> &[RenderedGroup] {
        match self {
            Self::Results(groups) => groups,
            Self::Cleared | Self::NoResults => &[],
        }
    }

    /// Number of rendered results across all groups.
    pub fn result_count(&self) -> usize {
        self.groups().iter().map(|g| g.results.len()).sum()
    }
}

/// Renders grouped results with snippets and corrected links.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    extractor: SnippetExtractor,
    page_depth: usize,
}

impl Renderer {
    /// Renderer for pages at the site root.
    pub fn new(extractor: SnippetExtractor) -> Self {
        Self {
            extractor,
            page_depth: 0,
        }
    }

    /// Renderer using the snippet settings and page path from `config`.
    pub fn from_config(config: &Config) -> Self {
        let renderer = Self::new(SnippetExtractor::new(config.snippet.clone()));
        match config.source.page_path.as_deref() {
            Some(path) => renderer.with_page_path(path),
            None => renderer,
        }
    }

    /// Correct relative URLs as seen from the page at `path`.
    #[must_use]
    pub fn with_page_path(mut self, path: &str) -> Self {
        self.page_depth = page_depth(path);
        self
    }

    /// Render grouped results for `query`, highlighting its terms.
    pub fn render(&self, groups: &[ResultGroup], query: &str) -> Vec<RenderedGroup> {
        let tag = &self.extractor.config().mark_tag;
        let highlighter = self.extractor.highlighter(query);

        groups
            .iter()
            .map(|group| RenderedGroup {
                name: group.name.clone(),
                display_name: group.display_name(),
                results: group
                    .results
                    .iter()
                    .map(|result| {
                        let doc = &result.document;
                        let excerpts = self.extractor.extract(doc.content(), query);
                        let used_description = excerpts.is_empty();
                        let snippets = if used_description {
                            let fallback = self.extractor.describe(doc.description(), query);
                            if fallback.is_empty() {
                                Vec::new()
                            } else {
                                vec![fallback.to_html(tag)]
                            }
                        } else {
                            excerpts.iter().map(|s| s.to_html(tag)).collect()
                        };

                        RenderedResult {
                            title_html: highlighter.to_html(&doc.title, tag),
                            url: correct_url(&doc.url, self.page_depth),
                            category: doc.category.clone().filter(|c| !c.is_empty()),
                            date: doc.date.clone().filter(|d| !d.is_empty()),
                            snippets,
                            used_description,
                        }
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Result markup for embedding in a page.
pub fn to_html(groups: &[RenderedGroup]) -> String {
    let mut html = String::new();
    for group in groups {
        let _ = write!(
            html,
            "<div class=\"result-section\">\n  <h3>{}</h3>\n  <ul>\n",
            encode_text(&group.display_name)
        );
        for result in &group.results {
            let _ = write!(
                html,
                "    <li>\n      <a href=\"{}\" class=\"result-item\">\n        <div class=\"result-title\">{}</div>\n        <div class=\"result-meta\">",
                encode_double_quoted_attribute(&result.url),
                result.title_html
            );
            if let Some(category) = &result.category {
                let _ = write!(
                    html,
                    "<span class=\"result-category\">{}</span>",
                    encode_text(category)
                );
            }
            if let Some(date) = &result.date {
                let _ = write!(html, "<span class=\"result-date\">{}</span>", encode_text(date));
            }
            html.push_str("</div>\n        <div class=\"result-snippet\">");
            html.push_str(&result.snippets.join("<span class=\"snippet-separator\">...</span>"));
            html.push_str("</div>\n      </a>\n    </li>\n");
        }
        html.push_str("  </ul>\n</div>\n");
    }
    html
}

/// Directory levels between the site root and the page at `path`.
///
/// Counts non-empty path segments, less one when the path ends in `/` or `.html`:
/// `/blogs/post.html` → 1, `/projects/` → 0.
pub fn page_depth(path: &str) -> usize {
    let parts = path.split('/').filter(|part| !part.is_empty()).count();
    if path.ends_with('/') || path.ends_with(".html") {
        parts.saturating_sub(1)
    } else {
        parts
    }
}

/// Make a relative `url` resolve from a page `depth` levels below the root.
pub fn correct_url(url: &str, depth: usize) -> String {
    if url.starts_with('/') || url.starts_with("http") || depth == 0 {
        return url.to_string();
    }
    format!("{}{url}", "../".repeat(depth))
}
