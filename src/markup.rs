//! Markup escaping and append helpers.
//! Every fragment quire produces is accumulated through these functions so
//! that attribute quoting and void-element handling stay consistent.

use crate::constants::VOID_ELEMENTS;

/// Returns whether `name` is a void element, i.e. one that closes itself.
/// For example, `<p>` is not void; `<link />` is.
pub fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

/// Interprets a marker attribute value: `1` and `true` (any case) are truthy.
pub fn is_truthy(value: &str) -> bool {
    value.eq_ignore_ascii_case("1") || value.eq_ignore_ascii_case("true")
}

/// Escapes an attribute value: `"` and `&` only.
///
/// Angle brackets pass through unchanged. Tag-list rendering uses the
/// stricter [`escape_text`] instead.
pub fn escape_attr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_escaped_attr(&mut out, text);
    out
}

/// Appends `text` to `buf` with [`escape_attr`] semantics.
pub fn push_escaped_attr(buf: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '"' => buf.push_str("&quot;"),
            '&' => buf.push_str("&amp;"),
            _ => buf.push(c),
        }
    }
}

/// Escapes `< > " &` for display inside element content.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '&' => out.push_str("&amp;"),
            _ => out.push(c),
        }
    }
    out
}

/// Appends an opening tag for `name` with the given attributes.
///
/// Attribute values are raw (unescaped) text and get escaped on the way in.
/// Void elements are written in self-closing form.
pub fn append_open<K, V>(buf: &mut String, name: &str, attrs: &[(K, V)])
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    buf.push('<');
    buf.push_str(name);
    for (key, value) in attrs {
        buf.push(' ');
        buf.push_str(key.as_ref());
        buf.push_str("=\"");
        push_escaped_attr(buf, value.as_ref());
        buf.push('"');
    }
    if is_void(name) {
        buf.push_str(" /");
    }
    buf.push('>');
}

/// Appends a closing tag unless `name` is void.
pub fn append_close(buf: &mut String, name: &str) {
    if is_void(name) {
        return;
    }
    buf.push_str("</");
    buf.push_str(name);
    buf.push('>');
}
