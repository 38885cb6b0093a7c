//! Tag matching and tag-list rendering.

use crate::article::Article;
use crate::markup::escape_text;

/// Finds tag `needle` in the space-separated set `haystack`.
///
/// An empty needle matches everything. Otherwise the needle must appear as
/// a whole token: `"cat"` does not match `"category dog"`.
pub fn tag_contains(needle: &str, haystack: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.match_indices(needle).any(|(at, _)| {
        let before = haystack[..at].chars().next_back();
        let after = haystack[at + needle.len()..].chars().next();
        matches!(before, None | Some(' ')) && matches!(after, None | Some(' '))
    })
}

/// Renders one `<span class="quire-tag">` per tag of `article`.
///
/// With a non-empty `prefix`, only tags strictly longer than and starting
/// with it are listed, and the prefix is stripped from the label. If no tag
/// qualifies, a single `quire-tags-notfound` span is written instead.
pub fn render_tag_list(out: &mut String, article: &Article, prefix: &str) {
    let mut found = false;
    for tag in article.tag_list() {
        let Some(label) = tag.strip_prefix(prefix) else {
            continue;
        };
        if label.is_empty() {
            continue;
        }
        out.push_str("<span class=\"quire-tag\">");
        out.push_str(&escape_text(&label.replace("\\ ", " ")));
        out.push_str("</span>");
        found = true;
    }
    if !found {
        out.push_str("<span class=\"quire-tags-notfound\"></span>");
    }
}
