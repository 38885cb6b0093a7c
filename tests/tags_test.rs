use chrono::Utc;
use quire::article::Article;
use quire::tags::{render_tag_list, tag_contains};

fn tagged(tags: &str) -> Article {
    let mut article = Article::new("a.html", Utc::now());
    article.tags = tags.to_string();
    article
}

fn tag_list(tags: &str, prefix: &str) -> String {
    let mut out = String::new();
    render_tag_list(&mut out, &tagged(tags), prefix);
    out
}

#[test]
fn test_tag_contains_whole_tokens_only() {
    assert!(!tag_contains("cat", "category dog"));
    assert!(tag_contains("cat", "cat dog"));
    assert!(tag_contains("dog", "cat dog"));
    assert!(!tag_contains("dog", "cat hotdog"));
    assert!(tag_contains("dog", "hotdog dog"));
    assert!(!tag_contains("cat", ""));
}

#[test]
fn test_tag_contains_empty_needle_matches() {
    assert!(tag_contains("", "anything"));
    assert!(tag_contains("", ""));
}

#[test]
fn test_render_all_tags() {
    assert_eq!(
        tag_list("rust cli", ""),
        "<span class=\"quire-tag\">rust</span><span class=\"quire-tag\">cli</span>"
    );
}

#[test]
fn test_render_strips_prefix_and_unescapes_space() {
    assert_eq!(
        tag_list("place:new\\ york misc place:", "place:"),
        "<span class=\"quire-tag\">new york</span>"
    );
}

#[test]
fn test_render_escapes_markup() {
    assert_eq!(
        tag_list("<script>", ""),
        "<span class=\"quire-tag\">&lt;script&gt;</span>"
    );
    assert_eq!(tag_list("a\"&b", ""), "<span class=\"quire-tag\">a&quot;&amp;b</span>");
}

#[test]
fn test_render_not_found_placeholder() {
    assert_eq!(tag_list("", ""), "<span class=\"quire-tags-notfound\"></span>");
    assert_eq!(tag_list("rust", "lang:"), "<span class=\"quire-tags-notfound\"></span>");
}
