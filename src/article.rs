//! Article records: one source document's metadata plus its rendered body.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Ordering override for an article.
///
/// `First` entries always precede `Normal` ones, `Last` entries always
/// follow them, whatever their timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortClass {
    First,
    #[default]
    Normal,
    Last,
}

/// A fully populated article.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    /// Corpus-unique identifier, also used as the link target.
    pub source: String,
    pub time: DateTime<Utc>,
    /// Whether `time` carries a time of day or only a date.
    pub is_datetime: bool,
    pub sort: SortClass,
    /// Space-separated tags; `\ ` is a literal space inside one tag.
    pub tags: String,
    pub base: String,
    pub stripbase: String,
    pub striplangbase: String,
    pub title: String,
    pub titletext: String,
    pub author: String,
    pub authortext: String,
    pub aside: Option<String>,
    pub asidetext: Option<String>,
    pub img: Option<String>,
    /// Markup written verbatim when the article is injected.
    pub body: String,
}

impl Article {
    /// Creates an article with the path-derived fields filled in from
    /// `source` and everything else empty.
    pub fn new<S: Into<String>>(source: S, time: DateTime<Utc>) -> Self {
        let source = source.into();
        let base = base_name(&source).to_string();
        let stripbase = strip_extension(&source).to_string();
        let striplangbase = strip_language(&stripbase).to_string();
        Self {
            source,
            time,
            is_datetime: false,
            sort: SortClass::Normal,
            tags: String::new(),
            base,
            stripbase,
            striplangbase,
            title: String::new(),
            titletext: String::new(),
            author: String::new(),
            authortext: String::new(),
            aside: None,
            asidetext: None,
            img: None,
            body: String::new(),
        }
    }

    /// Iterates over the article's tags, keeping escaped spaces intact.
    pub fn tag_list(&self) -> impl Iterator<Item = &str> {
        split_tags(&self.tags)
    }
}

/// File name component of a slash-separated path.
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Path with the extension of its last component removed.
pub fn strip_extension(path: &str) -> &str {
    let name_start = path.len() - base_name(path).len();
    match path[name_start..].rfind('.') {
        Some(0) | None => path,
        Some(dot) => &path[..name_start + dot],
    }
}

/// Removes a trailing language suffix such as `.en` or `.de`.
///
/// Only two-letter alphabetic suffixes count as languages.
pub fn strip_language(stripbase: &str) -> &str {
    let stripped = strip_extension(stripbase);
    let suffix = &stripbase[stripped.len()..];
    if stripped.len() < stripbase.len()
        && suffix.len() == 3
        && suffix[1..].chars().all(|c| c.is_ascii_alphabetic())
    {
        stripped
    } else {
        stripbase
    }
}

/// Splits a tag string on unescaped spaces, skipping empty tokens.
pub fn split_tags(tags: &str) -> impl Iterator<Item = &str> {
    let mut rest = tags;
    std::iter::from_fn(move || {
        rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            return None;
        }
        let bytes = rest.as_bytes();
        let mut end = 0;
        while end < bytes.len() && bytes[end] != b' ' {
            end += if bytes[end] == b'\\' && bytes.get(end + 1) == Some(&b' ') { 2 } else { 1 };
        }
        let (tag, tail) = rest.split_at(end);
        rest = tail;
        Some(tag)
    })
}
