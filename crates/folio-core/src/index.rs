use std::time::Instant;

use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, BoostQuery, FuzzyTermQuery, Occur, Query, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, STORED, Schema, TEXT, TextOptions, Value};
use tantivy::tokenizer::TokenStream;
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term};
use tracing::{debug, info};

use crate::config::{CombineWith, IndexConfig};
use crate::highlight::fold;
use crate::{Document, Error, Result, SearchResult};

/// Score multipliers applied to the looser match kinds, relative to an exact term.
const FUZZY_WEIGHT: f32 = 0.45;
const PREFIX_WEIGHT: f32 = 0.375;
/// Largest edit distance the Levenshtein automata support.
const MAX_EDIT_DISTANCE: u8 = 2;

/// Full-text index capability: bulk load, then ranked queries.
pub trait Indexer: Send + Sync {
    /// Add every document in `documents` and make them searchable.
    fn add_all(&mut self, documents: &[Document]) -> Result<()>;
    /// Ranked hits for `query`, best first. Blank queries return no hits.
    fn search(&self, query: &str) -> Result<Vec<SearchResult>>;
    /// Number of indexed documents.
    fn len(&self) -> usize;

    /// Whether no documents are indexed.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct FieldSpec {
    name: String,
    field: Field,
    indexed: bool,
    stored: bool,
    boost: f32,
}

/// In-memory Tantivy index shaped by an [`IndexConfig`].
pub struct SearchIndex {
    index: Index,
    reader: IndexReader,
    fields: Vec<FieldSpec>,
    config: IndexConfig,
    documents: usize,
}

impl SearchIndex {
    /// Build an empty index. Every field named in `fields` is tokenized; every field in
    /// `store_fields` is returned with results.
    pub fn new(config: &IndexConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Schema::builder();
        let mut fields = Vec::new();
        for name in crate::types::DOCUMENT_FIELDS {
            let indexed = config.fields.iter().any(|f| f == name);
            let stored = config.store_fields.iter().any(|f| f == name);
            let options = match (indexed, stored) {
                (true, true) => TEXT | STORED,
                (true, false) => TEXT,
                (false, true) => TextOptions::from(STORED),
                (false, false) => continue,
            };
            let field = builder.add_text_field(name, options);
            fields.push(FieldSpec {
                name: (*name).to_string(),
                field,
                indexed,
                stored,
                boost: config.boost_for(name),
            });
        }

        let index = Index::create_in_ram(builder.build());
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| Error::Index(format!("Failed to create reader: {e}")))?;

        Ok(Self {
            index,
            reader,
            fields,
            config: config.clone(),
            documents: 0,
        })
    }

    /// Build an index and load `documents` into it.
    pub fn build(config: &IndexConfig, documents: &[Document]) -> Result<Self> {
        let mut index = Self::new(config)?;
        index.add_all(documents)?;
        Ok(index)
    }

    fn indexed(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|spec| spec.indexed)
    }

    /// Run the query text through the indexed fields' analyzer.
    fn analyze(&self, query: &str) -> Result<Vec<String>> {
        let Some(first) = self.indexed().next() else {
            return Ok(Vec::new());
        };
        let mut analyzer = self.index.tokenizer_for_field(first.field)?;
        let mut stream = analyzer.token_stream(query);
        let mut terms: Vec<String> = Vec::new();
        while stream.advance() {
            let text = stream.token().text.clone();
            if !terms.contains(&text) {
                terms.push(text);
            }
        }
        Ok(terms)
    }

    /// Edit distance allowed for `term`: its length scaled by the fuzzy fraction.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn edit_distance(&self, term: &str) -> u8 {
        let scaled = (term.chars().count() as f32 * self.config.fuzzy).round();
        scaled.clamp(0.0, f32::from(MAX_EDIT_DISTANCE)) as u8
    }

    /// Per-term query: exact, fuzzy, and prefix variants across every indexed field.
    fn term_query(&self, term: &str) -> Box<dyn Query> {
        let distance = self.edit_distance(term);
        let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::new();
        for spec in self.indexed() {
            let t = Term::from_field_text(spec.field, term);
            let exact: Box<dyn Query> =
                Box::new(TermQuery::new(t.clone(), IndexRecordOption::WithFreqs));
            clauses.push((Occur::Should, Box::new(BoostQuery::new(exact, spec.boost))));

            if distance > 0 {
                let fuzzy: Box<dyn Query> =
                    Box::new(FuzzyTermQuery::new(t.clone(), distance, true));
                clauses.push((
                    Occur::Should,
                    Box::new(BoostQuery::new(fuzzy, spec.boost * FUZZY_WEIGHT)),
                ));
            }
            if self.config.prefix {
                let prefix: Box<dyn Query> = Box::new(FuzzyTermQuery::new_prefix(t, 0, true));
                clauses.push((
                    Occur::Should,
                    Box::new(BoostQuery::new(prefix, spec.boost * PREFIX_WEIGHT)),
                ));
            }
        }
        Box::new(BooleanQuery::new(clauses))
    }

    fn to_result(&self, doc: &TantivyDocument, score: f32, terms: &[String]) -> SearchResult {
        let mut document = Document::default();
        for spec in self.fields.iter().filter(|spec| spec.stored) {
            if let Some(text) = doc.get_first(spec.field).and_then(|v| v.as_str()) {
                document.set_field(&spec.name, text.to_string());
            }
        }

        let haystack: String = self
            .indexed()
            .filter_map(|spec| document.field(&spec.name))
            .collect::<Vec<_>>()
            .join(" ")
            .chars()
            .map(fold)
            .collect();
        let matched = terms
            .iter()
            .filter(|term| haystack.contains(term.as_str()))
            .cloned()
            .collect();

        SearchResult {
            document,
            score,
            terms: matched,
        }
    }
}

impl Indexer for SearchIndex {
    fn add_all(&mut self, documents: &[Document]) -> Result<()> {
        let started = Instant::now();
        let mut writer: IndexWriter = self
            .index
            .writer(50_000_000)
            .map_err(|e| Error::Index(format!("Failed to create writer: {e}")))?;

        for document in documents {
            let mut doc = TantivyDocument::default();
            for spec in &self.fields {
                if let Some(text) = document.field(&spec.name) {
                    doc.add_text(spec.field, text);
                }
            }
            writer
                .add_document(doc)
                .map_err(|e| Error::Index(format!("Failed to add document: {e}")))?;
        }

        writer
            .commit()
            .map_err(|e| Error::Index(format!("Failed to commit: {e}")))?;
        self.reader
            .reload()
            .map_err(|e| Error::Index(format!("Failed to reload reader: {e}")))?;
        self.documents += documents.len();

        info!(
            "Indexed {} documents in {:.2}ms",
            documents.len(),
            started.elapsed().as_secs_f64() * 1000.0
        );
        Ok(())
    }

    fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let started = Instant::now();
        let terms = self.analyze(query)?;
        if terms.is_empty() || self.config.limit == 0 {
            return Ok(Vec::new());
        }

        let occur = match self.config.combine_with {
            CombineWith::And => Occur::Must,
            CombineWith::Or => Occur::Should,
        };
        let clauses = terms
            .iter()
            .map(|term| (occur, self.term_query(term)))
            .collect();
        let query_obj = BooleanQuery::new(clauses);

        let searcher = self.reader.searcher();
        let top_docs = searcher
            .search(&query_obj, &TopDocs::with_limit(self.config.limit))
            .map_err(|e| Error::Index(format!("Search failed: {e}")))?;

        let mut results = Vec::with_capacity(top_docs.len());
        for (score, address) in top_docs {
            let doc: TantivyDocument = searcher
                .doc(address)
                .map_err(|e| Error::Index(format!("Failed to retrieve doc: {e}")))?;
            results.push(self.to_result(&doc, score, &terms));
        }

        debug!(
            "Found {} results for query '{}' in {:.2}ms",
            results.len(),
            query,
            started.elapsed().as_secs_f64() * 1000.0
        );
        Ok(results)
    }

    fn len(&self) -> usize {
        self.documents
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn doc(id: &str, title: &str, content: &str, kind: &str) -> Document {
        Document {
            id: id.to_string(),
            title: title.to_string(),
            url: format!("{id}.html"),
            content: Some(content.to_string()),
            description: Some(format!("About {title}")),
            kind: Some(kind.to_string()),
            ..Document::default()
        }
    }

    fn corpus() -> Vec<Document> {
        vec![
            doc("rust", "Learning Rust", "Ownership and borrowing make Rust memory safe.", "blog"),
            doc("tokio", "Async with Tokio", "Tokio is an asynchronous runtime for Rust.", "blog"),
            doc("about", "About me", "I write about photography and travel.", "about"),
        ]
    }

    fn index_with(config: &IndexConfig) -> SearchIndex {
        SearchIndex::build(config, &corpus()).expect("should build index")
    }

    fn ids(results: &[SearchResult]) -> Vec<String> {
        results.iter().map(|r| r.document.url.clone()).collect()
    }

    #[test]
    fn test_build_counts_documents() {
        let index = index_with(&IndexConfig::default());
        assert_eq!(index.len(), 3);
        assert!(!index.is_empty());
    }

    #[test]
    fn test_exact_search_returns_stored_fields() {
        let index = index_with(&IndexConfig::default());
        let results = index.search("tokio").unwrap();
        assert_eq!(ids(&results)[0], "tokio.html");
        let top = &results[0];
        assert_eq!(top.document.title, "Async with Tokio");
        assert_eq!(top.document.kind.as_deref(), Some("blog"));
        assert!(top.document.content().contains("asynchronous runtime"));
        assert_eq!(top.terms, vec!["tokio"]);
        // `id` is not a stored field by default.
        assert_eq!(top.document.id, "");
    }

    #[test]
    fn test_prefix_matching() {
        let index = index_with(&IndexConfig::default());
        let results = index.search("photo").unwrap();
        assert_eq!(ids(&results), vec!["about.html"]);

        let no_prefix = IndexConfig {
            prefix: false,
            fuzzy: 0.0,
            ..IndexConfig::default()
        };
        assert!(index_with(&no_prefix).search("photo").unwrap().is_empty());
    }

    #[test]
    fn test_fuzzy_matching() {
        let index = index_with(&IndexConfig::default());
        // one edit away from "ownership"
        let results = index.search("ownersip").unwrap();
        assert_eq!(ids(&results), vec!["rust.html"]);
    }

    #[test]
    fn test_and_vs_or_combination() {
        let and_index = index_with(&IndexConfig::default());
        assert!(and_index.search("tokio photography").unwrap().is_empty());

        let or_index = index_with(&IndexConfig {
            combine_with: CombineWith::Or,
            ..IndexConfig::default()
        });
        let mut found = ids(&or_index.search("tokio photography").unwrap());
        found.sort();
        assert_eq!(found, vec!["about.html", "tokio.html"]);
    }

    #[test]
    fn test_title_boost_ranks_title_match_first() {
        let docs = vec![
            doc("body", "Other topic", "This post mentions serde once.", "blog"),
            doc("title", "Serde tips", "Nothing else here.", "blog"),
        ];
        let index = SearchIndex::build(&IndexConfig::default(), &docs).unwrap();
        let results = index.search("serde").unwrap();
        assert_eq!(ids(&results)[0], "title.html");
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_blank_and_symbol_queries_return_nothing() {
        let index = index_with(&IndexConfig::default());
        assert!(index.search("").unwrap().is_empty());
        assert!(index.search("   ").unwrap().is_empty());
        assert!(index.search("?? !!").unwrap().is_empty());
    }

    #[test]
    fn test_special_characters_do_not_error() {
        let index = index_with(&IndexConfig::default());
        assert!(index.search("rust\" (AND) [x] ^2 ~").is_ok());
    }

    #[test]
    fn test_limit_is_respected() {
        let index = index_with(&IndexConfig {
            combine_with: CombineWith::Or,
            limit: 1,
            ..IndexConfig::default()
        });
        assert_eq!(index.search("rust tokio about").unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_field_fails_to_build() {
        let config = IndexConfig {
            fields: vec!["body".into()],
            ..IndexConfig::default()
        };
        assert!(matches!(SearchIndex::new(&config), Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_content_is_indexed_as_empty() {
        let docs = vec![Document {
            title: "Bare page".into(),
            url: "bare.html".into(),
            ..Document::default()
        }];
        let index = SearchIndex::build(&IndexConfig::default(), &docs).unwrap();
        let results = index.search("bare").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].document.content, None);
    }
}
