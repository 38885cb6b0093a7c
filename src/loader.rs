//! Article loading.
//! Articles are described by a manifest in JSON or YAML format (quire.json,
//! quire.yml, quire.yaml); each entry carries an article's metadata and
//! either its body or the path of the file holding it.

use crate::article::{Article, SortClass};
use crate::constants::MANIFEST_FILES;
use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Trait for producing the articles of a corpus.
pub trait ArticleLoader {
    /// Loads every article, failing on the first one that cannot be built.
    fn load(&self) -> Result<Vec<Article>>;
}

#[derive(Debug, Deserialize)]
struct Manifest {
    articles: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    source: String,
    /// RFC 3339 timestamp, or a bare `YYYY-MM-DD` date.
    time: String,
    #[serde(default)]
    sort: SortClass,
    #[serde(default)]
    tags: String,
    #[serde(default)]
    title: String,
    titletext: Option<String>,
    #[serde(default)]
    author: String,
    authortext: Option<String>,
    aside: Option<String>,
    asidetext: Option<String>,
    img: Option<String>,
    body: Option<String>,
    body_path: Option<PathBuf>,
}

/// Parses an article time, returning it with its is-date-and-time flag.
pub fn parse_time(value: &str) -> Option<(DateTime<Utc>, bool)> {
    let value = value.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Some((time.with_timezone(&Utc), true));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    Some((date.and_hms_opt(0, 0, 0)?.and_utc(), false))
}

impl ManifestEntry {
    fn into_article(self, base_dir: &Path) -> Result<Article> {
        if self.source.trim().is_empty() {
            return Err(Error::ManifestError("article with an empty source".to_string()));
        }
        let (time, is_datetime) = parse_time(&self.time).ok_or_else(|| Error::ArticleError {
            article: self.source.clone(),
            message: format!("invalid time '{}'", self.time),
        })?;

        let body = match (self.body, &self.body_path) {
            (Some(body), _) => body,
            (None, Some(path)) => read_body(&self.source, &base_dir.join(path))?,
            (None, None) => read_body(&self.source, &base_dir.join(&self.source))?,
        };

        let mut article = Article::new(self.source, time);
        article.is_datetime = is_datetime;
        article.sort = self.sort;
        article.tags = self.tags;
        article.titletext = self.titletext.unwrap_or_else(|| self.title.clone());
        article.title = self.title;
        article.authortext = self.authortext.unwrap_or_else(|| self.author.clone());
        article.author = self.author;
        article.asidetext = self.asidetext.or_else(|| self.aside.clone());
        article.aside = self.aside;
        article.img = self.img;
        article.body = body;
        Ok(article)
    }
}

fn read_body(source: &str, path: &Path) -> Result<String> {
    debug!("Reading body of '{}' from {}", source, path.display());
    std::fs::read_to_string(path).map_err(|e| Error::ArticleError {
        article: source.to_string(),
        message: format!("cannot read body from '{}': {}", path.display(), e),
    })
}

/// Parses manifest content into articles.
///
/// JSON is tried first, then YAML. Relative body paths resolve against
/// `base_dir`.
///
/// # Errors
/// * `Error::ManifestError` if the content is neither valid JSON nor YAML,
///   an entry has an empty source, or two entries share a source
/// * `Error::ArticleError` if an entry has a bad time or unreadable body
pub fn parse_manifest<P: AsRef<Path>>(content: &str, base_dir: P) -> Result<Vec<Article>> {
    let manifest: Manifest = match serde_json::from_str(content) {
        Ok(v) => v,
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ManifestError(format!("Invalid manifest format: {e}")))?,
    };

    let mut seen = HashSet::new();
    let mut articles = Vec::with_capacity(manifest.articles.len());
    for entry in manifest.articles {
        if !seen.insert(entry.source.clone()) {
            return Err(Error::ManifestError(format!("duplicate article '{}'", entry.source)));
        }
        articles.push(entry.into_article(base_dir.as_ref())?);
    }
    Ok(articles)
}

/// Loader for articles listed in a manifest file.
pub struct ManifestLoader<P: AsRef<Path>> {
    path: P,
}

impl<P: AsRef<Path>> ManifestLoader<P> {
    /// Creates a new ManifestLoader. `path` is either the manifest itself or
    /// a directory containing one of the known manifest files.
    pub fn new(path: P) -> Self {
        Self { path }
    }

    fn manifest_path(&self) -> Result<PathBuf> {
        let path = self.path.as_ref();
        if !path.is_dir() {
            return Ok(path.to_path_buf());
        }
        MANIFEST_FILES.iter().map(|file| path.join(file)).find(|p| p.exists()).ok_or_else(|| {
            Error::ManifestError(format!(
                "No manifest file found in '{}' (tried: {})",
                path.display(),
                MANIFEST_FILES.join(", ")
            ))
        })
    }
}

impl<P: AsRef<Path>> ArticleLoader for ManifestLoader<P> {
    fn load(&self) -> Result<Vec<Article>> {
        let manifest_path = self.manifest_path()?;
        debug!("Loading manifest from {}", manifest_path.display());
        let content = std::fs::read_to_string(&manifest_path)?;
        let base_dir = manifest_path.parent().unwrap_or(Path::new("."));
        parse_manifest(&content, base_dir)
    }
}
