use chrono::{TimeZone, Utc};
use quire::article::SortClass;
use quire::error::Error;
use quire::loader::{parse_manifest, parse_time, ArticleLoader, ManifestLoader};
use tempfile::TempDir;

#[test]
fn test_parse_time() {
    let (time, is_datetime) = parse_time("2024-05-06T07:08:09+02:00").unwrap();
    assert_eq!(time, Utc.with_ymd_and_hms(2024, 5, 6, 5, 8, 9).unwrap());
    assert!(is_datetime);

    let (time, is_datetime) = parse_time("2024-05-06").unwrap();
    assert_eq!(time, Utc.with_ymd_and_hms(2024, 5, 6, 0, 0, 0).unwrap());
    assert!(!is_datetime);

    assert!(parse_time("yesterday").is_none());
}

#[test]
fn test_json_manifest_with_inline_body() {
    let content = r#"{
        "articles": [
            {
                "source": "posts/hello.en.html",
                "time": "2024-01-02",
                "sort": "first",
                "tags": "rust cli",
                "title": "<i>Hello</i>",
                "titletext": "Hello",
                "author": "Jo",
                "aside": "short",
                "img": "hello.png",
                "body": "<article>hi</article>"
            }
        ]
    }"#;
    let articles = parse_manifest(content, ".").unwrap();
    assert_eq!(articles.len(), 1);

    let article = &articles[0];
    assert_eq!(article.source, "posts/hello.en.html");
    assert_eq!(article.sort, SortClass::First);
    assert_eq!(article.base, "hello.en.html");
    assert_eq!(article.stripbase, "posts/hello.en");
    assert_eq!(article.striplangbase, "posts/hello");
    assert_eq!(article.title, "<i>Hello</i>");
    assert_eq!(article.titletext, "Hello");
    assert_eq!(article.authortext, "Jo");
    assert_eq!(article.asidetext.as_deref(), Some("short"));
    assert_eq!(article.img.as_deref(), Some("hello.png"));
    assert_eq!(article.body, "<article>hi</article>");
}

#[test]
fn test_yaml_manifest_reads_bodies_from_files() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("one.html"), "<article>one</article>").unwrap();
    std::fs::create_dir(temp_dir.path().join("parts")).unwrap();
    std::fs::write(temp_dir.path().join("parts/two.html"), "<article>two</article>").unwrap();
    std::fs::write(
        temp_dir.path().join("quire.yml"),
        "articles:\n\
         \x20 - source: one.html\n\
         \x20   time: 2024-01-01T10:00:00Z\n\
         \x20 - source: two.html\n\
         \x20   time: 2024-01-02\n\
         \x20   body_path: parts/two.html\n",
    )
    .unwrap();

    let articles = ManifestLoader::new(temp_dir.path()).load().unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].body, "<article>one</article>");
    assert!(articles[0].is_datetime);
    assert_eq!(articles[0].sort, SortClass::Normal);
    assert_eq!(articles[1].body, "<article>two</article>");
    assert!(!articles[1].is_datetime);
}

#[test]
fn test_missing_manifest_in_directory() {
    let temp_dir = TempDir::new().unwrap();
    let err = ManifestLoader::new(temp_dir.path()).load().unwrap_err();
    assert!(matches!(err, Error::ManifestError(_)));
}

#[test]
fn test_missing_body_file() {
    let temp_dir = TempDir::new().unwrap();
    let content = r#"{"articles": [{"source": "gone.html", "time": "2024-01-01"}]}"#;
    let err = parse_manifest(content, temp_dir.path()).unwrap_err();
    match err {
        Error::ArticleError { article, .. } => assert_eq!(article, "gone.html"),
        other => panic!("Expected ArticleError, got {other:?}"),
    }
}

#[test]
fn test_invalid_entries() {
    let bad_time = r#"{"articles": [{"source": "a.html", "time": "soon", "body": ""}]}"#;
    assert!(matches!(parse_manifest(bad_time, "."), Err(Error::ArticleError { .. })));

    let empty_source = r#"{"articles": [{"source": " ", "time": "2024-01-01", "body": ""}]}"#;
    assert!(matches!(parse_manifest(empty_source, "."), Err(Error::ManifestError(_))));

    let duplicate = r#"{"articles": [
        {"source": "a.html", "time": "2024-01-01", "body": ""},
        {"source": "a.html", "time": "2024-01-02", "body": ""}
    ]}"#;
    assert!(matches!(parse_manifest(duplicate, "."), Err(Error::ManifestError(_))));

    assert!(matches!(parse_manifest("articles: [", "."), Err(Error::ManifestError(_))));
}
