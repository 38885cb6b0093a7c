//! `${name}` / `${name|argument}` expansion against one article of a corpus.
//!
//! A `${` with no closing `}` after it is copied through literally along with
//! the rest of the input. Names that are not recognized are dropped, braces
//! and all. There is no escape for a literal `${`.

use crate::article::Article;
use crate::corpus::Corpus;
use crate::tags::render_tag_list;
use chrono::format::{Item, StrftimeItems};
use log::debug;
use std::fmt::Write;

/// Which article a path token refers to, relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relative {
    Current,
    First,
    Last,
    /// The newer neighbour (one position back, wrapping).
    Next,
    /// The older neighbour (one position forward, wrapping).
    Prev,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathField {
    Base,
    StripBase,
    StripLangBase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Date,
    DateTime,
    DateTimeFmt(&'a str),
    Pos,
    Path(Relative, PathField),
    Tags(&'a str),
    Title,
    TitleText,
    Author,
    AuthorText,
    Source,
    Url,
    Aside,
    AsideText,
    Img,
}

impl<'a> Token<'a> {
    fn parse(name: &str, arg: &'a str) -> Option<Self> {
        let token = match name {
            "date" => Token::Date,
            "datetime" => Token::DateTime,
            "datetime-fmt" => Token::DateTimeFmt(arg),
            "pos" | "position" => Token::Pos,
            "tags" => Token::Tags(arg),
            "title" => Token::Title,
            "titletext" => Token::TitleText,
            "author" => Token::Author,
            "authortext" => Token::AuthorText,
            "source" => Token::Source,
            "url" => Token::Url,
            "aside" => Token::Aside,
            "asidetext" => Token::AsideText,
            "img" => Token::Img,
            _ => return Self::parse_path(name),
        };
        Some(token)
    }

    fn parse_path(name: &str) -> Option<Self> {
        let (relative, field) = match name.split_once('-') {
            Some(("first", field)) => (Relative::First, field),
            Some(("last", field)) => (Relative::Last, field),
            Some(("next", field)) => (Relative::Next, field),
            Some(("prev", field)) => (Relative::Prev, field),
            Some(_) => return None,
            None => (Relative::Current, name),
        };
        let field = match field {
            "base" => PathField::Base,
            "stripbase" => PathField::StripBase,
            "striplangbase" => PathField::StripLangBase,
            _ => return None,
        };
        Some(Token::Path(relative, field))
    }
}

/// Expands every token in `template` for the article at `index`.
///
/// `url` is the value of `${url}`; it renders empty when `None`.
pub fn substitute(template: &str, corpus: &Corpus, index: usize, url: Option<&str>) -> String {
    let mut out = String::with_capacity(template.len());
    substitute_into(&mut out, template, corpus, index, url);
    out
}

/// Same as [`substitute`], appending to `out`.
pub fn substitute_into(
    out: &mut String,
    template: &str,
    corpus: &Corpus,
    index: usize,
    url: Option<&str>,
) {
    if corpus.get(index).is_none() {
        debug!("No article at position {}, copying template as-is.", index);
        out.push_str(template);
        return;
    }

    let mut rest = template;
    while let Some(open) = rest.find("${") {
        let after = &rest[open + 2..];
        let Some(close) = after.find('}') else {
            break;
        };
        out.push_str(&rest[..open]);
        let inner = &after[..close];
        let (name, arg) = inner.split_once('|').unwrap_or((inner, ""));
        match Token::parse(name, arg) {
            Some(token) => render_token(out, token, corpus, index, url),
            None => debug!("Dropping unknown token '{}'.", name),
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
}

/// Resolves `relative` to an absolute corpus position.
///
/// The corpus is sorted newest first, so "next" (newer) is one step back.
fn resolve(relative: Relative, index: usize, len: usize) -> usize {
    match relative {
        Relative::Current => index,
        Relative::First => 0,
        Relative::Last => len - 1,
        Relative::Next => (index + len - 1) % len,
        Relative::Prev => (index + 1) % len,
    }
}

fn render_token(out: &mut String, token: Token<'_>, corpus: &Corpus, index: usize, url: Option<&str>) {
    let articles = corpus.articles();
    let article = &articles[index];
    match token {
        Token::Date => {
            let _ = write!(out, "{}", article.time.format("%Y-%m-%d"));
        }
        Token::DateTime => {
            let _ = write!(out, "{}", article.time.format("%Y-%m-%dT%H:%M:%SZ"));
        }
        Token::DateTimeFmt(pattern) => format_time(out, article, pattern),
        Token::Pos => {
            let _ = write!(out, "{}", index + 1);
        }
        Token::Path(relative, field) => {
            let target = &articles[resolve(relative, index, articles.len())];
            out.push_str(match field {
                PathField::Base => &target.base,
                PathField::StripBase => &target.stripbase,
                PathField::StripLangBase => &target.striplangbase,
            });
        }
        Token::Tags(prefix) => render_tag_list(out, article, prefix),
        Token::Title => out.push_str(&article.title),
        Token::TitleText => out.push_str(&article.titletext),
        Token::Author => out.push_str(&article.author),
        Token::AuthorText => out.push_str(&article.authortext),
        Token::Source => out.push_str(&article.source),
        Token::Url => out.push_str(url.unwrap_or_default()),
        Token::Aside => out.push_str(article.aside.as_deref().unwrap_or_default()),
        Token::AsideText => out.push_str(article.asidetext.as_deref().unwrap_or_default()),
        Token::Img => out.push_str(article.img.as_deref().unwrap_or_default()),
    }
}

/// Formats the article time with a strftime pattern.
///
/// An empty pattern or `auto` picks the locale date-and-time (`%c`) or
/// date-only (`%x`) form depending on whether the article carries a time.
fn format_time(out: &mut String, article: &Article, pattern: &str) {
    let pattern = match pattern {
        "" | "auto" if article.is_datetime => "%c",
        "" | "auto" => "%x",
        other => other,
    };
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        debug!("Invalid time format '{}', rendering nothing.", pattern);
        return;
    }
    let _ = write!(out, "{}", article.time.format_with_items(items.iter()));
}
