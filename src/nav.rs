//! Navigation list rendering.
//!
//! A marked `<nav>` element becomes a `<ul>` with one `<li>` per article,
//! either in a fixed default form or by replaying the element's own content
//! as a per-entry template.

use crate::constants::{ATTR_NAV_CONTENT, ATTR_NAV_SIZE, ATTR_NAV_TAG};
use crate::corpus::Corpus;
use crate::markup::{append_close, escape_attr, escape_text, is_truthy};
use crate::substitute::substitute_into;
use crate::tags::tag_contains;
use log::debug;
use std::fmt::Write;

/// Settings read from a marked nav element, plus the content captured
/// between its tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavRequest {
    /// Maximum number of entries, never more than the corpus holds.
    pub count: usize,
    /// Only articles carrying this tag are listed.
    pub tag: Option<String>,
    /// Replay `content` for each entry instead of the default rendering.
    pub use_content: bool,
    pub content: String,
}

impl NavRequest {
    /// Builds a request from the nav element's attributes.
    ///
    /// A missing size means the whole corpus. The size is read as a leading
    /// integer: trailing text is ignored, no digits means zero and a negative
    /// value means the whole corpus.
    pub fn from_attributes<K, V>(attrs: &[(K, V)], corpus_len: usize) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut request = NavRequest { count: corpus_len, ..Default::default() };
        for (key, value) in attrs {
            let (key, value) = (key.as_ref(), value.as_ref());
            if key.eq_ignore_ascii_case(ATTR_NAV_SIZE) {
                request.count = leading_count(value, corpus_len);
            } else if key.eq_ignore_ascii_case(ATTR_NAV_CONTENT) {
                request.use_content = is_truthy(value);
            } else if key.eq_ignore_ascii_case(ATTR_NAV_TAG) {
                request.tag = Some(value.to_string());
            }
        }
        request
    }

    fn uses_template(&self) -> bool {
        self.use_content && !self.content.is_empty()
    }
}

/// Reads the integer prefix of `value`, clamped to `limit`.
fn leading_count(value: &str, limit: usize) -> usize {
    let value = value.trim_start();
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    let end = digits.bytes().position(|b| !b.is_ascii_digit()).unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return 0;
    }
    if negative {
        return if digits.bytes().all(|b| b == b'0') { 0 } else { limit };
    }
    digits.parse::<usize>().map_or(limit, |n| n.min(limit))
}

/// Renders the list for `request` followed by the closing `name` tag.
pub fn render_nav(out: &mut String, request: &NavRequest, corpus: &Corpus, name: &str) {
    let tag = request.tag.as_deref().unwrap_or_default();
    let entries = corpus
        .articles()
        .iter()
        .enumerate()
        .filter(|(_, article)| tag_contains(tag, &article.tags))
        .take(request.count);

    out.push_str("\n<ul>\n");
    let mut rendered = 0;
    for (index, article) in entries {
        out.push_str("<li>\n");
        if request.uses_template() {
            substitute_into(out, &request.content, corpus, index, None);
        } else {
            let _ = writeln!(
                out,
                "{}: <a href=\"{}\">{}</a>",
                article.time.format("%Y-%m-%d"),
                escape_attr(&article.source),
                escape_text(&article.titletext)
            );
        }
        out.push_str("</li>\n");
        rendered += 1;
    }
    out.push_str("</ul>\n");
    append_close(out, name);

    debug!(
        "Rendered {} navigation entr{} ({} mode).",
        rendered,
        if rendered == 1 { "y" } else { "ies" },
        if request.uses_template() { "custom" } else { "default" }
    );
}
