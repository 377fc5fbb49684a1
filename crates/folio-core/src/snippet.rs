//! Snippet extraction around query-term matches.
//!
//! For each query term (in query order) the content is scanned left to right; each
//! accepted match yields a window of `context_chars` characters on both sides of the
//! match, decorated with an ellipsis wherever it does not reach the start or end of the
//! content. Windows whose decorated text repeats an earlier one are dropped. Offsets are
//! counted in characters, never bytes.

use std::ops::Range;

use crate::config::SnippetConfig;
use crate::highlight::{FoldedText, Highlighter, is_word_char};
use crate::types::Snippet;

/// Upper bound on how far a window edge moves outward to reach a word boundary.
const MAX_SNAP_CHARS: usize = 24;

/// Cuts highlighted excerpts out of document text.
#[derive(Debug, Clone, Default)]
pub struct SnippetExtractor {
    config: SnippetConfig,
}

impl SnippetExtractor {
    /// Extractor using `config`.
    pub const fn new(config: SnippetConfig) -> Self {
        Self { config }
    }

    /// Settings this extractor was built with.
    pub const fn config(&self) -> &SnippetConfig {
        &self.config
    }

    /// Highlighter for `query` using this extractor's term-length threshold.
    pub fn highlighter(&self, query: &str) -> Highlighter {
        Highlighter::new(query, self.config.min_term_len)
    }

    /// Up to `max_snippets` excerpts of `content`, each containing at least one term.
    ///
    /// Returns an empty vec when the content is empty, no term survives the length
    /// filter, or no term occurs in the content.
    pub fn extract(&self, content: &str, query: &str) -> Vec<Snippet> {
        let highlighter = self.highlighter(query);
        if content.is_empty() || highlighter.is_empty() || self.config.max_snippets == 0 {
            return Vec::new();
        }

        let text = FoldedText::new(content);
        let mut raw: Vec<(String, Range<usize>)> = Vec::new();

        'terms: for term in highlighter.terms() {
            let mut from = 0;
            let mut accepted = 0;
            while from < text.len() && accepted < self.config.max_per_term {
                let Some(start) = text.find(term, from) else {
                    break;
                };
                let end = start + term.len();
                let (snippet, body) = self.window(&text, start, end);
                if !raw.iter().any(|(seen, _)| *seen == snippet) {
                    raw.push((snippet, body));
                    accepted += 1;
                    if raw.len() >= self.config.max_snippets {
                        break 'terms;
                    }
                }
                from = end;
            }
        }

        tracing::trace!(count = raw.len(), "extracted snippets");
        raw.into_iter()
            .map(|(snippet, body)| highlighter.highlight_within(&snippet, body))
            .collect()
    }

    /// Description fallback: truncate to `description_len` characters (adding an
    /// ellipsis when cut) and highlight with the same terms.
    pub fn describe(&self, description: &str, query: &str) -> Snippet {
        let limit = self.config.description_len;
        let (text, body) = match description.char_indices().nth(limit) {
            Some((cut, _)) => (format!("{}{}", &description[..cut], self.config.ellipsis), 0..cut),
            None => (description.to_string(), 0..description.len()),
        };
        self.highlighter(query).highlight_within(&text, body)
    }

    /// Decorated window text around the match at chars `start..end`, with the byte
    /// range of the undecorated body.
    fn window(&self, text: &FoldedText, start: usize, end: usize) -> (String, Range<usize>) {
        let len = text.len();
        let mut from = start.saturating_sub(self.config.context_chars);
        let mut to = end.saturating_add(self.config.context_chars).min(len);
        if self.config.snap_to_words {
            from = snap_start(&text.chars, from);
            to = snap_end(&text.chars, to);
        }

        let ellipsis = &self.config.ellipsis;
        let mut snippet = String::new();
        if from > 0 {
            snippet.push_str(ellipsis);
        }
        let body_start = snippet.len();
        snippet.extend(&text.chars[from..to]);
        let body = body_start..snippet.len();
        if to < len {
            snippet.push_str(ellipsis);
        }
        (snippet, body)
    }
}

/// Move a window start that falls inside a word back to the word's first character.
fn snap_start(chars: &[char], start: usize) -> usize {
    if start == 0 || start >= chars.len() {
        return start;
    }
    if !(is_word_char(chars[start - 1]) && is_word_char(chars[start])) {
        return start;
    }
    let mut snapped = start;
    while snapped > 0 && is_word_char(chars[snapped - 1]) {
        if start - snapped >= MAX_SNAP_CHARS {
            return start;
        }
        snapped -= 1;
    }
    snapped
}

/// Move a window end that falls inside a word forward to the word's end.
fn snap_end(chars: &[char], end: usize) -> usize {
    if end == 0 || end >= chars.len() {
        return end;
    }
    if !(is_word_char(chars[end - 1]) && is_word_char(chars[end])) {
        return end;
    }
    let mut snapped = end;
    while snapped < chars.len() && is_word_char(chars[snapped]) {
        if snapped - end >= MAX_SNAP_CHARS {
            return end;
        }
        snapped += 1;
    }
    snapped
}
