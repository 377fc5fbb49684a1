use std::path::PathBuf;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use crate::config::SourceConfig;
use crate::{Document, Error, Result};

/// File name of the index relative to a page directory.
const PAGE_RELATIVE_INDEX: &str = "static/search-index.json";

/// Where to read the document collection from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexSource {
    /// URLs tried in order; the first success wins.
    Remote(Vec<String>),
    /// A local JSON file.
    File(PathBuf),
}

impl IndexSource {
    /// Interpret a user-supplied location: `http(s)://` URLs are remote, anything else
    /// is a file path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Remote(vec![location.to_string()])
        } else {
            Self::File(PathBuf::from(location))
        }
    }

    /// Build the remote candidate list from configuration.
    ///
    /// When a page path is configured and is not the site root, the copy next to the
    /// page (`<page dir>/static/search-index.json`) is tried before the site-wide path.
    pub fn from_config(source: &SourceConfig) -> Result<Self> {
        let base = source
            .base_url
            .as_deref()
            .ok_or_else(|| Error::Config("source.base_url is not set and no index was given".into()))?;
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(Error::InvalidUrl(format!(
                "source.base_url must be an http(s) URL, got '{base}'"
            )));
        }
        let base = base.trim_end_matches('/');

        let mut candidates = Vec::new();
        if let Some(dir) = source.page_path.as_deref().and_then(page_directory) {
            candidates.push(format!("{base}{dir}/{PAGE_RELATIVE_INDEX}"));
        }
        let root = format!("{base}/{}", source.index_path.trim_start_matches('/'));
        if !candidates.contains(&root) {
            candidates.push(root);
        }
        Ok(Self::Remote(candidates))
    }
}

/// Directory portion of a page path, or `None` for the site root.
///
/// `/blogs/post.html` → `/blogs`, `/projects/` → `/projects`, `/index.html` → `None`.
fn page_directory(page_path: &str) -> Option<String> {
    let dir = if page_path.contains(".html") {
        page_path.rfind('/').map_or("", |idx| &page_path[..idx])
    } else {
        page_path
    };
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        None
    } else if dir.starts_with('/') {
        Some(dir.to_string())
    } else {
        Some(format!("/{dir}"))
    }
}

/// Parse the index payload: a JSON array of documents.
pub fn parse_documents(json: &str) -> Result<Vec<Document>> {
    serde_json::from_str(json).map_err(|e| Error::Parse(format!("invalid search index: {e}")))
}

/// Loads the document collection over HTTP or from disk.
pub struct IndexLoader {
    client: Client,
}

impl IndexLoader {
    /// Loader with a 30 second request timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Loader with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(Error::Network)?;
        Ok(Self { client })
    }

    /// Read every document from `source`.
    ///
    /// Remote sources try each URL in order, moving on only when a URL is missing or
    /// unreachable. A missing file maps to [`Error::NotFound`].
    pub async fn load(&self, source: &IndexSource) -> Result<Vec<Document>> {
        let documents = match source {
            IndexSource::File(path) => {
                let json = tokio::fs::read_to_string(path).await.map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        Error::NotFound(format!("search index '{}'", path.display()))
                    } else {
                        Error::Io(e)
                    }
                })?;
                parse_documents(&json)?
            },
            IndexSource::Remote(urls) => self.fetch_first(urls).await?,
        };
        info!("Loaded search index with {} documents", documents.len());
        Ok(documents)
    }

    async fn fetch_first(&self, urls: &[String]) -> Result<Vec<Document>> {
        let mut last_error = Error::Config("no index URL configured".into());
        for url in urls {
            match self.fetch(url).await {
                Ok(documents) => return Ok(documents),
                Err(err @ (Error::NotFound(_) | Error::Network(_))) => {
                    debug!("index not available at {url}: {err}");
                    last_error = err;
                },
                Err(err) => return Err(err),
            }
        }
        Err(last_error)
    }

    /// GET one index URL.
    pub async fn fetch(&self, url: &str) -> Result<Vec<Document>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            if status == StatusCode::NOT_FOUND {
                return Err(Error::NotFound(format!("search index not found at '{url}'")));
            }
            return Err(match response.error_for_status() {
                Ok(_) => Error::Other(format!("unexpected HTTP status {status} from '{url}'")),
                Err(err) => Error::Network(err),
            });
        }

        let body = response.text().await?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        parse_documents(&body)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const INDEX: &str = r#"[
        {"id": "home", "url": "index.html", "title": "Home", "type": "home"},
        {"id": "blogs-rust", "url": "blogs/rust.html", "title": "Rust", "type": "blog", "content": "Ownership"}
    ]"#;

    #[test]
    fn test_parse_location() {
        assert_eq!(
            IndexSource::parse("https://example.com/static/search-index.json"),
            IndexSource::Remote(vec!["https://example.com/static/search-index.json".into()])
        );
        assert_eq!(
            IndexSource::parse("site/static/search-index.json"),
            IndexSource::File(PathBuf::from("site/static/search-index.json"))
        );
    }

    #[test]
    fn test_from_config_root_page() {
        let source = SourceConfig {
            base_url: Some("https://example.com/".into()),
            page_path: Some("/index.html".into()),
            ..SourceConfig::default()
        };
        assert_eq!(
            IndexSource::from_config(&source).unwrap(),
            IndexSource::Remote(vec!["https://example.com/static/search-index.json".into()])
        );
    }

    #[test]
    fn test_from_config_nested_page_tries_page_copy_first() {
        let source = SourceConfig {
            base_url: Some("https://example.com".into()),
            page_path: Some("/blogs/rust.html".into()),
            ..SourceConfig::default()
        };
        assert_eq!(
            IndexSource::from_config(&source).unwrap(),
            IndexSource::Remote(vec![
                "https://example.com/blogs/static/search-index.json".into(),
                "https://example.com/static/search-index.json".into(),
            ])
        );
    }

    #[test]
    fn test_from_config_requires_base_url() {
        assert!(matches!(
            IndexSource::from_config(&SourceConfig::default()),
            Err(Error::Config(_))
        ));
        let bad = SourceConfig {
            base_url: Some("example.com".into()),
            ..SourceConfig::default()
        };
        assert!(matches!(IndexSource::from_config(&bad), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_page_directory() {
        assert_eq!(page_directory("/"), None);
        assert_eq!(page_directory(""), None);
        assert_eq!(page_directory("/about.html"), None);
        assert_eq!(page_directory("/projects/"), Some("/projects".into()));
        assert_eq!(page_directory("/a/b/c.html"), Some("/a/b".into()));
    }

    #[test]
    fn test_parse_documents_rejects_non_array() {
        assert!(matches!(parse_documents("{\"id\": 1}"), Err(Error::Parse(_))));
        assert!(parse_documents("[]").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_success() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/static/search-index.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(INDEX))
            .mount(&server)
            .await;

        let loader = IndexLoader::new()?;
        let source = IndexSource::parse(&format!("{}/static/search-index.json", server.uri()));
        let documents = loader.load(&source).await?;
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[1].kind.as_deref(), Some("blog"));
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_404_maps_to_not_found() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let loader = IndexLoader::new()?;
        let err = loader
            .fetch(&format!("{}/static/search-index.json", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)), "got {err:?}");
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_server_error_maps_to_network() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let loader = IndexLoader::new()?;
        let err = loader.fetch(&server.uri()).await.unwrap_err();
        assert_eq!(err.category(), "network");
        Ok(())
    }

    #[tokio::test]
    async fn test_falls_back_to_root_index() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/blogs/static/search-index.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/static/search-index.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(INDEX))
            .mount(&server)
            .await;

        let source = IndexSource::from_config(&SourceConfig {
            base_url: Some(server.uri()),
            page_path: Some("/blogs/rust.html".into()),
            ..SourceConfig::default()
        })?;
        let documents = IndexLoader::new()?.load(&source).await?;
        assert_eq!(documents.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_page_copy_does_not_fall_back() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/blogs/static/search-index.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/static/search-index.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(INDEX))
            .expect(0)
            .mount(&server)
            .await;

        let source = IndexSource::from_config(&SourceConfig {
            base_url: Some(server.uri()),
            page_path: Some("/blogs/rust.html".into()),
            ..SourceConfig::default()
        })?;
        let err = IndexLoader::new()?.load(&source).await.unwrap_err();
        assert!(matches!(err, Error::Parse(_)), "got {err:?}");
        Ok(())
    }

    #[tokio::test]
    async fn test_load_from_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("search-index.json");
        std::fs::write(&path, INDEX)?;
        let documents = IndexLoader::new()?.load(&IndexSource::File(path)).await?;
        assert_eq!(documents[0].title, "Home");

        let missing = IndexSource::File(dir.path().join("missing.json"));
        let err = IndexLoader::new()?.load(&missing).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        Ok(())
    }
}
