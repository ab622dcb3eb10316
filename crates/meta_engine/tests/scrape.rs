use std::sync::Arc;

use meta_core::{
    BaseMetadata, OpenGraphMetadata, PartialScraperOptions, ScraperOptions, TwitterMetadata,
};
use meta_engine::{
    plugin_fn, FailureKind, FetchError, FetchOutput, FetchSettings, Fetcher, MetaScraper,
    MetadataFragment, Plugin, PluginError, ScrapeCause,
};
use pretty_assertions::assert_eq;
use url::Url;

fn init_logging() {
    scrape_logging::initialize_for_tests();
}

fn titled_og(title: &'static str) -> Box<dyn Plugin> {
    Box::new(plugin_fn("og-title", move |_, _| {
        Ok(MetadataFragment::with_open_graph(OpenGraphMetadata {
            title: Some(title.to_string()),
            ..OpenGraphMetadata::default()
        }))
    }))
}

#[tokio::test]
async fn bare_html_yields_total_empty_record() {
    init_logging();
    let scraper = MetaScraper::with_default_plugins();
    let metadata = scraper
        .scrape_default("<html><head></head><body></body></html>")
        .await
        .unwrap();

    assert_eq!(
        metadata.base,
        BaseMetadata {
            title: Some(String::new()),
            description: Some(String::new()),
            author: Some(String::new()),
            keywords: Some(Vec::new()),
            ..BaseMetadata::default()
        }
    );
    assert_eq!(
        metadata.open_graph,
        OpenGraphMetadata {
            title: Some(String::new()),
            ..OpenGraphMetadata::default()
        }
    );
    assert_eq!(
        metadata.twitter,
        TwitterMetadata {
            title: Some(String::new()),
            ..TwitterMetadata::default()
        }
    );
    assert!(metadata.json_ld.is_empty());
    assert!(metadata.raw.is_none());
}

#[tokio::test]
async fn no_plugins_returns_skeleton() {
    let scraper = MetaScraper::new(Vec::new());
    let options = PartialScraperOptions {
        extract_raw: Some(true),
        ..PartialScraperOptions::default()
    };
    let metadata = scraper.scrape("<p>hi</p>", &options).await.unwrap();
    assert_eq!(metadata.base, BaseMetadata::default());
    assert_eq!(metadata.raw, Some(Default::default()));
}

#[tokio::test]
async fn later_plugin_wins_key_conflict() {
    let scraper = MetaScraper::new(vec![titled_og("first"), titled_og("second")]);
    let metadata = scraper.scrape_default("<html></html>").await.unwrap();
    assert_eq!(metadata.open_graph.title.as_deref(), Some("second"));
}

#[tokio::test]
async fn base_is_post_processed_after_merge() {
    let html = format!(
        "<html><head><title>  Spaced \n\n Title </title>\
         <meta name=\"description\" content=\"{}\"></head></html>",
        "word  ".repeat(60)
    );
    let custom = plugin_fn("custom", |_, _| {
        Ok(MetadataFragment::with_custom(Default::default()))
    });
    let scraper = MetaScraper::new(vec![
        Box::new(meta_engine::MetaTagsPlugin),
        Box::new(custom),
    ]);
    let options = PartialScraperOptions {
        max_description_length: Some(30),
        ..PartialScraperOptions::default()
    };
    let metadata = scraper.scrape(&html, &options).await.unwrap();

    assert_eq!(metadata.base.title.as_deref(), Some("Spaced Title"));
    let description = metadata.base.description.unwrap();
    assert_eq!(description, "word word word word word word...");
    assert_eq!(metadata.custom, Some(Default::default()));
}

#[tokio::test]
async fn base_image_upgraded_once() {
    let with_image = plugin_fn("base-image", |_, _| {
        Ok(MetadataFragment::with_base(BaseMetadata {
            image: Some("http://img.test/a.png?src=http://origin".into()),
            ..BaseMetadata::default()
        }))
    });
    let scraper = MetaScraper::new(vec![Box::new(with_image)]);
    let metadata = scraper.scrape_default("<html></html>").await.unwrap();
    assert_eq!(
        metadata.base.image.as_deref(),
        Some("https://img.test/a.png?src=http://origin")
    );
}

#[tokio::test]
async fn open_graph_description_is_not_renormalized() {
    let html = r#"<html><head><meta property="og:description" content="two   spaces"></head></html>"#;
    let metadata = MetaScraper::with_default_plugins()
        .scrape_default(html)
        .await
        .unwrap();
    assert_eq!(metadata.open_graph.description.as_deref(), Some("two   spaces"));
}

struct UnreachableFetcher;

#[async_trait::async_trait]
impl Fetcher for UnreachableFetcher {
    async fn fetch(&self, _url: &Url, _settings: &FetchSettings) -> Result<FetchOutput, FetchError> {
        Err(FetchError {
            kind: FailureKind::Network,
            message: "connection refused".into(),
        })
    }
}

/// Follows a linked page with its own scraper and reports that scrape's failure.
struct LinkedPagePlugin {
    inner: MetaScraper,
}

#[async_trait::async_trait]
impl Plugin for LinkedPagePlugin {
    fn name(&self) -> &'static str {
        "linked-page"
    }

    async fn extract(
        &self,
        _html: &str,
        _options: &ScraperOptions,
    ) -> Result<MetadataFragment, PluginError> {
        let linked = self.inner.scrape_default("https://linked.test/").await?;
        Ok(MetadataFragment::with_base(linked.base))
    }
}

#[tokio::test]
async fn nested_scrape_failure_is_not_wrapped_twice() {
    let inner = MetaScraper::with_default_plugins().with_fetcher(Arc::new(UnreachableFetcher));
    let scraper = MetaScraper::new(vec![Box::new(LinkedPagePlugin { inner })]);
    let err = scraper.scrape_default("<html></html>").await.unwrap_err();

    assert_eq!(err.message(), "failed to fetch URL: https://linked.test/");
    assert_eq!(err.fetch_failure(), Some(&FailureKind::Network));
    assert!(matches!(err.cause(), ScrapeCause::Fetch(_)));
}

#[tokio::test]
async fn plugin_failure_aborts_scrape_with_wrapped_cause() {
    let failing = plugin_fn("broken", |_, _| Err(PluginError::failed("broken", "boom")));
    let scraper = MetaScraper::new(vec![titled_og("ok"), Box::new(failing)]);
    let err = scraper.scrape_default("<html></html>").await.unwrap_err();

    assert_eq!(err.message(), "failed to scrape metadata");
    assert!(matches!(err.cause(), ScrapeCause::Plugin(_)));
    assert!(!err.is_timeout());
    let source = std::error::Error::source(&err).unwrap();
    assert!(source.to_string().contains("boom"));
}

#[tokio::test]
async fn malformed_json_ld_does_not_fail_scrape() {
    let html = r#"<html><head>
        <script type="application/ld+json">{"@context":"https://schema.org","@type":"WebSite"}</script>
        <script type="application/ld+json">{ nope</script>
    </head></html>"#;
    let metadata = MetaScraper::with_default_plugins()
        .scrape_default(html)
        .await
        .unwrap();
    assert_eq!(metadata.json_ld.len(), 1);
    assert_eq!(metadata.json_ld[0]["@type"], "WebSite");
}

#[tokio::test]
async fn raw_bucket_filled_when_requested() {
    let html = r#"<html><head><title>T</title><meta property="og:title" content="X"></head></html>"#;
    let options = PartialScraperOptions {
        extract_raw: Some(true),
        ..PartialScraperOptions::default()
    };
    let metadata = MetaScraper::with_default_plugins()
        .scrape(html, &options)
        .await
        .unwrap();
    let raw = metadata.raw.unwrap();
    assert_eq!(raw.title.as_deref(), Some("T"));
    assert_eq!(raw.meta["og:title"], "X");
}

#[tokio::test]
async fn default_plugin_order_is_stable() {
    assert_eq!(
        MetaScraper::default().plugin_names(),
        vec!["meta-tags", "open-graph", "twitter", "json-ld", "raw"]
    );
}
