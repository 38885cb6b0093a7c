//! The template compositor.
//!
//! A single pass over the template's markup events. Everything is re-emitted
//! as-is except for marked `<article>` elements, which are replaced by the
//! next article body from the corpus, and marked `<nav>` elements, which are
//! replaced by a navigation list.

use crate::constants::{ARTICLE_ELEMENT, ATTR_ARTICLE, ATTR_NAV, ATTR_PERMLINK, NAV_ELEMENT};
use crate::corpus::{Corpus, RenderCursor};
use crate::error::{Error, Result};
use crate::markup::{append_close, append_open, is_truthy};
use crate::nav::{render_nav, NavRequest};
use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;
use std::fmt;
use std::io::Write;
use std::path::Path;

type Attributes = Vec<(String, String)>;

/// What the compositor does with the events it receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Re-emit every event.
    Passthrough,
    /// Accumulate a marked nav element's content.
    NavCapture,
    /// Discard a marked article element: the corpus has nothing left.
    ArticleSkip,
    /// Discard a marked article element whose replacement is already written.
    ArticleEcho,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            State::Passthrough => "document",
            State::NavCapture => "navigation element",
            State::ArticleSkip => "skipped article element",
            State::ArticleEcho => "replaced article element",
        };
        f.write_str(name)
    }
}

/// Scratch state for one composition run.
struct Composition<'a, W: Write> {
    name: &'a str,
    corpus: &'a Corpus,
    cursor: RenderCursor,
    state: State,
    /// Open elements inside the marked element, the marked one included.
    depth: usize,
    /// Unmarked elements open in the document.
    open_elements: usize,
    nav: NavRequest,
    out: W,
}

fn attribute<'v>(attrs: &'v [(String, String)], key: &str) -> Option<&'v str> {
    attrs.iter().find(|(k, _)| k.eq_ignore_ascii_case(key)).map(|(_, v)| v.as_str())
}

fn is_marked(attrs: &[(String, String)], key: &str) -> bool {
    attribute(attrs, key).is_some_and(is_truthy)
}

impl<'a, W: Write> Composition<'a, W> {
    fn write(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    fn open(&mut self, name: &str, attrs: &Attributes) -> Result<()> {
        match self.state {
            State::Passthrough => {
                self.passthrough_open(name, attrs)?;
                if self.state == State::Passthrough {
                    self.open_elements += 1;
                }
                Ok(())
            }
            State::NavCapture => {
                self.depth += 1;
                append_open(&mut self.nav.content, name, attrs);
                Ok(())
            }
            State::ArticleSkip | State::ArticleEcho => {
                self.depth += 1;
                Ok(())
            }
        }
    }

    fn close(&mut self, name: &str) -> Result<()> {
        match self.state {
            State::Passthrough => {
                self.open_elements = self.open_elements.saturating_sub(1);
                let mut buf = String::new();
                append_close(&mut buf, name);
                self.write(&buf)
            }
            State::NavCapture => {
                self.depth -= 1;
                if self.depth > 0 {
                    append_close(&mut self.nav.content, name);
                    return Ok(());
                }
                let nav = std::mem::take(&mut self.nav);
                let mut buf = String::new();
                render_nav(&mut buf, &nav, self.corpus, name);
                self.state = State::Passthrough;
                self.write(&buf)
            }
            State::ArticleSkip | State::ArticleEcho => {
                self.depth -= 1;
                if self.depth == 0 {
                    self.state = State::Passthrough;
                }
                Ok(())
            }
        }
    }

    fn text(&mut self, text: &str) -> Result<()> {
        match self.state {
            State::Passthrough => self.write(text),
            State::NavCapture => {
                self.nav.content.push_str(text);
                Ok(())
            }
            State::ArticleSkip | State::ArticleEcho => Ok(()),
        }
    }

    fn passthrough_open(&mut self, name: &str, attrs: &Attributes) -> Result<()> {
        if name.eq_ignore_ascii_case(NAV_ELEMENT) {
            let mut buf = String::new();
            append_open(&mut buf, name, attrs);
            self.write(&buf)?;
            if is_marked(attrs, ATTR_NAV) {
                self.nav = NavRequest::from_attributes(attrs, self.corpus.len());
                self.depth = 1;
                self.state = State::NavCapture;
            }
            return Ok(());
        }

        if !name.eq_ignore_ascii_case(ARTICLE_ELEMENT) || !is_marked(attrs, ATTR_ARTICLE) {
            let mut buf = String::new();
            append_open(&mut buf, name, attrs);
            return self.write(&buf);
        }

        self.depth = 1;
        let corpus = self.corpus;
        let Some((index, article)) = corpus.select_next(&mut self.cursor) else {
            debug!("No articles left, dropping article element.");
            self.state = State::ArticleSkip;
            return Ok(());
        };

        debug!("Injecting article {} '{}'.", index + 1, article.source);
        self.state = State::ArticleEcho;
        self.write(&article.body)?;
        if attribute(attrs, ATTR_PERMLINK).is_some_and(|v| !is_truthy(v)) {
            return Ok(());
        }
        let mut buf = String::new();
        append_open(&mut buf, "div", &[(ATTR_PERMLINK, "1")]);
        append_open(&mut buf, "a", &[("href", article.source.as_str())]);
        buf.push_str("permanent link");
        append_close(&mut buf, "a");
        append_close(&mut buf, "div");
        self.write(&buf)
    }
}

fn lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Converts a byte offset into the template into a 1-based line and column.
fn location(template: &str, offset: usize) -> (usize, usize) {
    let before = &template.as_bytes()[..offset.min(template.len())];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let column = match before.iter().rposition(|&b| b == b'\n') {
        Some(newline) => before.len() - newline,
        None => before.len() + 1,
    };
    (line, column)
}

fn parse_error(name: &str, template: &str, offset: usize, message: String) -> Error {
    let (line, column) = location(template, offset);
    Error::ParseError { name: name.to_string(), line, column, message }
}

fn element(start: &BytesStart<'_>) -> std::result::Result<(String, Attributes), String> {
    let name = lossy(start.name().as_ref()).into_owned();
    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let key = lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(|e| e.to_string())?.into_owned();
        attrs.push((key, value));
    }
    Ok((name, attrs))
}

/// Composes `template` against `corpus`, writing the result to `out`.
///
/// `name` identifies the template in error messages. When `force` names an
/// article in the corpus, only that article is injected; an unknown name is
/// ignored and the whole corpus is used.
///
/// # Errors
/// * `Error::ParseError` if the template is not well-formed markup
/// * `Error::UnbalancedTemplateError` if input ends with an element still open
/// * `Error::IoError` if writing to `out` fails
///
/// Output written before an error is incomplete and should be discarded.
pub fn compose<W: Write>(
    name: &str,
    template: &str,
    corpus: &Corpus,
    force: Option<&str>,
    out: W,
) -> Result<()> {
    let mut cursor = corpus.cursor();
    if let Some(id) = force {
        corpus.force_single(&mut cursor, id);
    }

    let mut ctx = Composition {
        name,
        corpus,
        cursor,
        state: State::Passthrough,
        depth: 0,
        open_elements: 0,
        nav: NavRequest::default(),
        out,
    };

    debug!("Composing template '{}'.", name);
    let mut reader = Reader::from_str(template);

    loop {
        let event = reader.read_event().map_err(|e| {
            parse_error(name, template, reader.error_position() as usize, e.to_string())
        })?;
        let position = reader.buffer_position() as usize;
        match event {
            Event::Start(e) => {
                let (tag, attrs) =
                    element(&e).map_err(|msg| parse_error(name, template, position, msg))?;
                ctx.open(&tag, &attrs)?;
            }
            Event::Empty(e) => {
                let (tag, attrs) =
                    element(&e).map_err(|msg| parse_error(name, template, position, msg))?;
                ctx.open(&tag, &attrs)?;
                ctx.close(&tag)?;
            }
            Event::End(e) => ctx.close(&lossy(e.name().as_ref()))?,
            Event::Text(e) => ctx.text(&lossy(&e))?,
            Event::CData(e) => ctx.text(&format!("<![CDATA[{}]]>", lossy(&e)))?,
            Event::Comment(e) => ctx.text(&format!("<!--{}-->", lossy(&e)))?,
            Event::Decl(e) => ctx.text(&format!("<?{}?>", lossy(&e)))?,
            Event::PI(e) => ctx.text(&format!("<?{}?>", lossy(&e)))?,
            Event::DocType(e) => ctx.text(&format!("<!DOCTYPE {}>", lossy(&e)))?,
            Event::Eof => break,
        }
    }

    if ctx.state != State::Passthrough || ctx.open_elements > 0 {
        return Err(Error::UnbalancedTemplateError {
            name: ctx.name.to_string(),
            state: ctx.state.to_string(),
        });
    }

    debug!("Injected {} article(s) into '{}'.", ctx.cursor.emitted(), name);
    ctx.write("\n")?;
    ctx.out.flush()?;
    Ok(())
}

/// Reads a template file fully into memory.
///
/// # Errors
/// * `Error::TemplateDoesNotExistsError` if `path` is missing or not a file
/// * `Error::IoError` if reading fails
pub fn read_template<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::TemplateDoesNotExistsError { template: path.display().to_string() });
    }
    debug!("Loading template from {}", path.display());
    Ok(std::fs::read_to_string(path)?)
}
