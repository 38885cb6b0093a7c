//! The sorted article collection and the cursor used to hand articles out
//! to a template one at a time.

use crate::article::Article;
use log::debug;
use std::cmp::Ordering;

/// Ordering policy applied once when the corpus is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SortOrder {
    /// Newest first.
    #[default]
    Date,
    /// Ascending by source identifier.
    Filename,
}

fn class_order(a: &Article, b: &Article) -> Ordering {
    a.sort.cmp(&b.sort)
}

/// Stable sort by sort class, then by the chosen policy within a class.
pub fn sort_articles(articles: &mut [Article], order: SortOrder) {
    match order {
        SortOrder::Date => articles.sort_by(|a, b| {
            class_order(a, b).then_with(|| b.time.cmp(&a.time))
        }),
        SortOrder::Filename => {
            articles.sort_by(|a, b| class_order(a, b).then_with(|| a.source.cmp(&b.source)))
        }
    }
}

/// Position within the corpus for article injection.
///
/// `end` is exclusive, so narrowing to a single article is `pos..pos + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderCursor {
    pos: usize,
    end: usize,
    emitted: usize,
}

impl RenderCursor {
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.end
    }

    /// Number of articles handed out so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

/// An owned, sorted collection of articles.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    articles: Vec<Article>,
}

impl Corpus {
    /// Sorts `articles` and takes ownership of them.
    pub fn new(mut articles: Vec<Article>, order: SortOrder) -> Self {
        sort_articles(&mut articles, order);
        debug!("Corpus holds {} article(s).", articles.len());
        Self { articles }
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Article> {
        self.articles.get(index)
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn position(&self, source: &str) -> Option<usize> {
        self.articles.iter().position(|a| a.source == source)
    }

    /// A cursor covering the whole corpus.
    pub fn cursor(&self) -> RenderCursor {
        RenderCursor { pos: 0, end: self.articles.len(), emitted: 0 }
    }

    /// Narrows `cursor` to the single article whose source is `id`.
    ///
    /// An unknown `id` leaves the cursor untouched, so the full set is shown.
    pub fn force_single(&self, cursor: &mut RenderCursor, id: &str) {
        match self.position(id) {
            Some(index) => {
                debug!("Forcing single article '{}' at position {}.", id, index);
                cursor.pos = index;
                cursor.end = index + 1;
            }
            None => debug!("Forced article '{}' not in corpus, showing all.", id),
        }
    }

    /// Returns the article under the cursor and advances it, or `None` once
    /// the cursor is exhausted.
    pub fn select_next(&self, cursor: &mut RenderCursor) -> Option<(usize, &Article)> {
        if cursor.is_exhausted() {
            return None;
        }
        let index = cursor.pos;
        let article = self.articles.get(index)?;
        cursor.pos += 1;
        cursor.emitted += 1;
        Some((index, article))
    }
}
