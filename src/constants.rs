//! Common constants used throughout the quire application.

/// Supported article manifest file names, tried in order when the
/// manifest argument is a directory
pub const MANIFEST_FILES: [&str; 3] = ["quire.json", "quire.yml", "quire.yaml"];

/// Element that receives injected article bodies.
pub const ARTICLE_ELEMENT: &str = "article";

/// Element that receives the navigation list.
pub const NAV_ELEMENT: &str = "nav";

pub const ATTR_ARTICLE: &str = "data-quire-article";
pub const ATTR_PERMLINK: &str = "data-quire-permlink";
pub const ATTR_NAV: &str = "data-quire-nav";
pub const ATTR_NAV_SIZE: &str = "data-quire-navsz";
pub const ATTR_NAV_CONTENT: &str = "data-quire-navcontent";
pub const ATTR_NAV_TAG: &str = "data-quire-navtag";

/// All elements that close themselves (e.g. `<br />`).
pub const VOID_ELEMENTS: [&str; 16] = [
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "track", "wbr",
];
