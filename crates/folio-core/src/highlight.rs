//! Query-term highlighting.
//!
//! Highlighting runs in one pass over the original text: every case-insensitive
//! occurrence of every term is located, widened to the word that contains it, and the
//! resulting ranges are sorted and merged. Markup is only produced at the very end by
//! interleaving escaped literal segments with wrapped segments, so inserted tags can
//! never be matched by a later term.
//!
//! Word characters are Unicode alphanumerics plus `_`.

use std::ops::Range;

use crate::types::Snippet;

/// Case-fold a single character. Characters whose lowercase form expands to several
/// characters are kept as-is so that character offsets stay aligned with the source.
pub(crate) fn fold(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(first), None) => first,
        _ => c,
    }
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split `query` on whitespace and keep terms of at least `min_len` characters,
/// case-folded. Order is preserved and repeated terms are kept.
pub fn query_terms(query: &str, min_len: usize) -> Vec<String> {
    query
        .split_whitespace()
        .filter(|term| term.chars().count() >= min_len)
        .map(|term| term.chars().map(fold).collect())
        .collect()
}

/// Text prepared for repeated case-insensitive scanning.
pub(crate) struct FoldedText {
    /// Original characters.
    pub chars: Vec<char>,
    folded: Vec<char>,
    /// Byte offset of each char, plus the total length as a sentinel.
    offsets: Vec<usize>,
}

impl FoldedText {
    pub fn new(text: &str) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut offsets = Vec::with_capacity(text.len() + 1);
        for (offset, c) in text.char_indices() {
            chars.push(c);
            offsets.push(offset);
        }
        offsets.push(text.len());
        let folded = chars.iter().copied().map(fold).collect();
        Self {
            chars,
            folded,
            offsets,
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn byte_offset(&self, char_index: usize) -> usize {
        self.offsets[char_index]
    }

    /// First occurrence of `term` (already folded) at or after char index `from`.
    pub fn find(&self, term: &[char], from: usize) -> Option<usize> {
        if term.is_empty() || term.len() > self.folded.len() {
            return None;
        }
        let last_start = self.folded.len() - term.len();
        (from..=last_start).find(|&start| self.folded[start..start + term.len()] == *term)
    }

    /// Widen a char range to the word containing it. Only edges that sit on a word
    /// character are extended.
    pub fn extend_to_word(&self, range: Range<usize>) -> Range<usize> {
        let Range { mut start, mut end } = range;
        if start < end && is_word_char(self.chars[start]) {
            while start > 0 && is_word_char(self.chars[start - 1]) {
                start -= 1;
            }
        }
        if start < end && is_word_char(self.chars[end - 1]) {
            while end < self.chars.len() && is_word_char(self.chars[end]) {
                end += 1;
            }
        }
        start..end
    }
}

/// Highlights a fixed set of query terms in arbitrary text.
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    terms: Vec<Vec<char>>,
}

impl Highlighter {
    /// Build from a raw query, ignoring terms shorter than `min_term_len`.
    pub fn new(query: &str, min_term_len: usize) -> Self {
        let terms = query_terms(query, min_term_len)
            .into_iter()
            .map(|term| term.chars().collect())
            .collect();
        Self { terms }
    }

    /// Whether no usable term survived the length filter.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub(crate) fn terms(&self) -> &[Vec<char>] {
        &self.terms
    }

    /// Sorted, merged char ranges to highlight in `text`.
    pub(crate) fn char_ranges(&self, text: &FoldedText) -> Vec<Range<usize>> {
        let mut ranges = Vec::new();
        for term in &self.terms {
            let mut from = 0;
            while let Some(start) = text.find(term, from) {
                let end = start + term.len();
                ranges.push(text.extend_to_word(start..end));
                from = end;
            }
        }
        merge_ranges(ranges)
    }

    /// Byte ranges of `text` to highlight: sorted, disjoint, on char boundaries.
    pub fn ranges(&self, text: &str) -> Vec<Range<usize>> {
        if self.terms.is_empty() || text.is_empty() {
            return Vec::new();
        }
        let folded = FoldedText::new(text);
        self.char_ranges(&folded)
            .into_iter()
            .map(|r| folded.byte_offset(r.start)..folded.byte_offset(r.end))
            .collect()
    }

    /// Highlight `text`, returning it together with its ranges.
    pub fn highlight(&self, text: &str) -> Snippet {
        Snippet {
            text: text.to_string(),
            highlights: self.ranges(text),
        }
    }

    /// Highlight only the `body` byte range of `text`, leaving the rest (such as
    /// ellipsis decoration) unmarked. Ranges are relative to the whole of `text`.
    pub(crate) fn highlight_within(&self, text: &str, body: Range<usize>) -> Snippet {
        let offset = body.start;
        let highlights = text
            .get(body)
            .map(|inner| {
                self.ranges(inner)
                    .into_iter()
                    .map(|r| r.start + offset..r.end + offset)
                    .collect()
            })
            .unwrap_or_default();
        Snippet {
            text: text.to_string(),
            highlights,
        }
    }

    /// Highlight `text` straight to an HTML fragment.
    pub fn to_html(&self, text: &str, tag: &str) -> String {
        render_html(text, &self.ranges(text), tag)
    }
}

/// Sort ranges and merge the ones that overlap or touch.
fn merge_ranges(mut ranges: Vec<Range<usize>>) -> Vec<Range<usize>> {
    ranges.sort_by_key(|r| (r.start, r.end));
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged
}

/// Interleave escaped literal text with `<tag>`-wrapped highlight ranges.
///
/// `ranges` must be sorted, disjoint byte ranges on char boundaries of `text`;
/// out-of-order or out-of-bounds ranges are skipped.
pub fn render_html(text: &str, ranges: &[Range<usize>], tag: &str) -> String {
    let mut out = String::with_capacity(text.len() + ranges.len() * (tag.len() * 2 + 5));
    let mut cursor = 0;
    for range in ranges {
        if range.start < cursor
            || range.end > text.len()
            || range.start >= range.end
            || !text.is_char_boundary(range.start)
            || !text.is_char_boundary(range.end)
        {
            continue;
        }
        out.push_str(&html_escape::encode_text(&text[cursor..range.start]));
        out.push('<');
        out.push_str(tag);
        out.push('>');
        out.push_str(&html_escape::encode_text(&text[range.clone()]));
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
        cursor = range.end;
    }
    out.push_str(&html_escape::encode_text(&text[cursor..]));
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn html(query: &str, text: &str) -> String {
        Highlighter::new(query, 3).to_html(text, "mark")
    }

    #[test]
    fn test_query_terms_filters_short_terms() {
        assert_eq!(query_terms("  Rust is FUN  ", 3), vec!["rust", "fun"]);
        assert!(query_terms("ab cd", 3).is_empty());
        assert!(query_terms("   ", 3).is_empty());
        assert_eq!(query_terms("fox fox", 3), vec!["fox", "fox"]);
    }

    #[test]
    fn test_highlights_each_term_case_insensitively() {
        assert_eq!(
            html("fox JUMPS", "The Fox jumps"),
            "The <mark>Fox</mark> <mark>jumps</mark>"
        );
    }

    #[test]
    fn test_extends_match_to_containing_word() {
        assert_eq!(
            html("search", "Researching searches"),
            "<mark>Researching</mark> <mark>searches</mark>"
        );
    }

    #[test]
    fn test_word_boundary_stops_at_punctuation() {
        assert_eq!(
            html("rust", "rust-lang, rusty_code."),
            "<mark>rust</mark>-lang, <mark>rusty_code</mark>."
        );
    }

    #[test]
    fn test_term_with_symbols_only_extends_word_edges() {
        assert_eq!(html("c++", "I like c++ and abc++x"), "I like <mark>c++</mark> and <mark>abc++</mark>x");
    }

    #[test]
    fn test_overlapping_terms_merge_into_one_mark() {
        assert_eq!(html("hook hooks", "useful hooks"), "useful <mark>hooks</mark>");
        assert_eq!(html("state tate", "state"), "<mark>state</mark>");
    }

    #[test]
    fn test_term_matching_tag_name_is_not_double_wrapped() {
        let out = html("mark", "bookmark the mark");
        assert_eq!(out, "<mark>bookmark</mark> the <mark>mark</mark>");
        assert_eq!(out.matches("<mark>").count(), 2);
    }

    #[test]
    fn test_literal_text_is_escaped() {
        assert_eq!(
            html("tags", "<b>tags</b> & more"),
            "&lt;b&gt;<mark>tags</mark>&lt;/b&gt; &amp; more"
        );
    }

    #[test]
    fn test_ranges_are_sorted_and_disjoint() {
        let h = Highlighter::new("fox jumps over", 3);
        let text = "The quick brown fox jumps over the lazy dog; foxes jump.";
        let ranges = h.ranges(text);
        for pair in ranges.windows(2) {
            assert!(pair[0].end < pair[1].start);
        }
        let marked: Vec<&str> = ranges.iter().map(|r| &text[r.clone()]).collect();
        assert_eq!(marked, vec!["fox", "jumps", "over", "foxes"]);
    }

    #[test]
    fn test_highlight_within_leaves_decoration_unmarked() {
        let h = Highlighter::new("... rust", 3);
        let text = "...learn rust...";
        let snippet = h.highlight_within(text, 3..13);
        assert_eq!(snippet.marked().collect::<Vec<_>>(), vec!["rust"]);
        assert_eq!(snippet.to_html("mark"), "...learn <mark>rust</mark>...");
        assert!(h.highlight(text).marked().any(|m| m.ends_with("...")));
    }

    #[test]
    fn test_unicode_offsets_are_byte_ranges() {
        let h = Highlighter::new("café", 3);
        let text = "Un CAFÉ très cafés";
        let ranges = h.ranges(text);
        let marked: Vec<&str> = ranges.iter().map(|r| &text[r.clone()]).collect();
        assert_eq!(marked, vec!["CAFÉ", "cafés"]);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(html("", "text"), "text");
        assert_eq!(html("ab", "ab ab"), "ab ab");
        assert_eq!(html("rust", ""), "");
        assert!(Highlighter::new("to be", 3).is_empty());
    }

    #[test]
    fn test_render_skips_invalid_ranges() {
        let out = render_html("hello world", &[6..11, 0..5, 3..40], "em");
        assert_eq!(out, "hello <em>world</em>");
    }
}
