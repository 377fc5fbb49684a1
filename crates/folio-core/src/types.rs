use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::ops::Range;

/// Names of every document field the index file may carry.
pub const DOCUMENT_FIELDS: &[&str] = &[
    "id",
    "title",
    "url",
    "content",
    "description",
    "type",
    "category",
    "date",
];

/// One entry of the site's search index file.
///
/// Documents are immutable once loaded. Every field is lenient: `null`, a missing key,
/// or a non-string scalar never fails deserialization, so a sloppy index entry degrades
/// to empty text instead of breaking the whole load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique document identifier.
    #[serde(default, deserialize_with = "lenient_required")]
    pub id: String,
    /// Page title.
    #[serde(default, deserialize_with = "lenient_required")]
    pub title: String,
    /// Link to the page, usually relative to the site root.
    #[serde(default, deserialize_with = "lenient_required")]
    pub url: String,
    /// Full page text.
    #[serde(default, deserialize_with = "lenient_optional", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Short summary, used when no content excerpt matches.
    #[serde(default, deserialize_with = "lenient_optional", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Grouping discriminator (`blog`, `page`, `blog-list`, ...).
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    /// Free-form category label.
    #[serde(default, deserialize_with = "lenient_optional", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Publication date as written in the index.
    #[serde(default, deserialize_with = "lenient_optional", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Document {
    /// Look up a field by its index-file name. Absent optional fields return `None`.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "id" => Some(self.id.as_str()),
            "title" => Some(self.title.as_str()),
            "url" => Some(self.url.as_str()),
            "content" => self.content.as_deref(),
            "description" => self.description.as_deref(),
            "type" => self.kind.as_deref(),
            "category" => self.category.as_deref(),
            "date" => self.date.as_deref(),
            _ => None,
        }
    }

    /// Set a field by its index-file name. Unknown names are ignored.
    pub fn set_field(&mut self, name: &str, value: String) {
        match name {
            "id" => self.id = value,
            "title" => self.title = value,
            "url" => self.url = value,
            "content" => self.content = Some(value),
            "description" => self.description = Some(value),
            "type" => self.kind = Some(value),
            "category" => self.category = Some(value),
            "date" => self.date = Some(value),
            _ => {},
        }
    }

    /// Content text, or `""` when absent.
    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }

    /// Description text, or `""` when absent.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_optional<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(scalar_to_string))
}

fn lenient_required<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_optional(deserializer).map(Option::unwrap_or_default)
}

/// A ranked hit returned by an [`Indexer`](crate::Indexer).
///
/// Only the fields listed in `store_fields` are populated on `document`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The matched document (stored fields only).
    pub document: Document,
    /// Relevance score; higher ranks first.
    pub score: f32,
    /// Query terms (as analyzed by the index) found in the stored text of this hit.
    pub terms: Vec<String>,
}

impl SearchResult {
    /// Create a result with no matched terms recorded.
    pub const fn new(document: Document, score: f32) -> Self {
        Self {
            document,
            score,
            terms: Vec::new(),
        }
    }
}

/// A bounded excerpt of a document field with highlighted sub-ranges.
///
/// `highlights` are byte ranges into `text`; they are sorted, disjoint, and lie on
/// character boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    /// Excerpt text, including any `...` decoration.
    pub text: String,
    /// Byte ranges of `text` to highlight.
    pub highlights: Vec<Range<usize>>,
}

impl Snippet {
    /// Whether the excerpt has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The highlighted substrings, in order.
    pub fn marked(&self) -> impl Iterator<Item = &str> {
        self.highlights.iter().map(|r| &self.text[r.clone()])
    }

    /// Render as an HTML fragment, wrapping highlights in `<tag>`.
    pub fn to_html(&self, tag: &str) -> String {
        crate::highlight::render_html(&self.text, &self.highlights, tag)
    }
}
