//! quire is a streaming article compositor for static blogs.
//! It re-emits a markup template while injecting article bodies into marked
//! `<article>` elements, building navigation lists in marked `<nav>` elements
//! and expanding `${name}` tokens against the current article.

/// Article records and path helpers
pub mod article;

/// Command-line interface module for the quire application
pub mod cli;

/// The template pass itself
pub mod compositor;

/// Marker attribute names, element names and manifest file names
pub mod constants;

/// Sorted article collection and render cursor
pub mod corpus;

/// Error types and handling for the quire application
pub mod error;

/// Article manifest loading
/// Supports JSON and YAML formats (quire.json, quire.yml, quire.yaml)
pub mod loader;

/// Attribute escaping and tag append helpers
pub mod markup;

/// Navigation list rendering
pub mod nav;

/// `${name|arg}` token expansion
pub mod substitute;

/// Tag matching and tag-list rendering
pub mod tags;
