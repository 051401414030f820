//! End-to-end tests for engblog.
//!
//! These build a small site in a temporary directory, from configuration files
//! through to the site data export.

use std::{fs, path::Path};

use engblog_core::{Authors, ConfigResolver, EnvVars};
use engblog_generator::{Builder, build::SITE_DATA_FILE};
use serde_json::{Value, json};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn sample_site() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(root, "config.json5", "{ baseUrl: 'http://a.test' }");
    write(root, "config-prod.json5", "// production\n{ baseUrl: 'https://eng.example.com', }");
    write(
        root,
        "src/index.njk",
        "---\ntitle: Home\neleventyNavigation:\n  key: Home\n---\n{{ metadata.title }}",
    );
    write(
        root,
        "src/posts/first.md",
        &format!(
            "---\ntitle: First\nauthor: nathan\ntags: [payments, nav]\n---\n{}",
            vec!["word"; 600].join(" ")
        ),
    );
    write(
        root,
        "src/posts/second.md",
        "---\ntitle: Second\nauthor: somebody-else\n---\nA short note.",
    );
    write(root, "src/favicon.ico", "icon");
    dir
}

fn vars(env: &str) -> EnvVars {
    [("ENV".to_string(), env.to_string())].into_iter().collect()
}

fn export(root: &Path) -> Value {
    let raw = fs::read_to_string(root.join("dist").join(SITE_DATA_FILE)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test]
async fn test_production_build() {
    let site = sample_site();
    let config = ConfigResolver::new(site.path())
        .with_vars(vars("prod"))
        .load()
        .expect("config");
    assert_eq!(config.base_url.as_deref(), Some("https://eng.example.com"));

    let stats = Builder::new(config, Authors::builtin(), site.path())
        .build()
        .await
        .expect("build");

    assert_eq!(stats.items, 3);
    assert_eq!(stats.timed, 2);
    assert_eq!(stats.unresolved_authors, 1);
    assert_eq!(stats.passthrough, 1);
    assert!(site.path().join("dist/favicon.ico").exists());

    let data = export(site.path());
    assert_eq!(data["config"]["env"], "prod");
    assert_eq!(data["metadata"]["url"], "https://eng.example.com/");
    assert_eq!(
        data["metadata"]["jsonfeed"]["url"],
        "https://eng.example.com/feed/feed.json"
    );
    assert_eq!(data["collections"]["tagList"], json!(["posts", "nav"]));
    assert_eq!(data["settings"]["dataTemplateEngine"], false);

    let items = data["items"].as_array().unwrap();
    let first = items.iter().find(|i| i["url"] == "/posts/first/").unwrap();
    assert_eq!(first["readingTime"], 3);
    assert_eq!(first["author"]["twitterUrl"], "https://twitter.com/_ncjones");
    assert_eq!(first["data"]["tags"], json!(["posts", "payments", "nav"]));

    let second = items.iter().find(|i| i["url"] == "/posts/second/").unwrap();
    assert_eq!(second["readingTime"], 1);
    assert!(second.get("author").is_none());

    let home = items.iter().find(|i| i["url"] == "/").unwrap();
    assert!(home.get("readingTime").is_none());
}

#[tokio::test]
async fn test_local_build_uses_base_config() {
    let site = sample_site();
    let config = ConfigResolver::new(site.path())
        .with_vars(EnvVars::new())
        .load()
        .expect("config");

    Builder::new(config, Authors::builtin(), site.path())
        .build()
        .await
        .expect("build");

    let data = export(site.path());
    assert_eq!(data["config"]["env"], "local");
    assert_eq!(data["metadata"]["url"], "http://a.test/");
    assert_eq!(data["metadata"]["feed"]["id"], "http://a.test");
}

#[tokio::test]
async fn test_invalid_overlay_stops_before_build() {
    let site = sample_site();
    write(site.path(), "config-broken.json5", "{ baseUrl: 'x', theme: 'dark' }");

    let err = ConfigResolver::new(site.path())
        .with_vars(vars("broken"))
        .load()
        .unwrap_err();
    assert!(err.is_validation());
    assert!(!site.path().join("dist").exists());
}
