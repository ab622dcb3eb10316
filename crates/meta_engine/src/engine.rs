use std::sync::Arc;

use futures_util::future::try_join_all;
use meta_core::{
    is_http_url, merge_all, parse_http_url, post_process, Metadata, PartialScraperOptions,
    ScraperOptions,
};
use scrape_logging::{scrape_debug, scrape_warn};
use url::Url;

use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::plugins::{default_plugins, Plugin};
use crate::{FailureKind, ScrapeError};

/// Runs a fixed, ordered set of plugins over HTML or a fetched page.
///
/// Holds no per-call state; one instance can serve any number of concurrent
/// scrapes.
pub struct MetaScraper {
    plugins: Vec<Box<dyn Plugin>>,
    fetcher: Arc<dyn Fetcher>,
}

impl MetaScraper {
    pub fn new(plugins: Vec<Box<dyn Plugin>>) -> Self {
        Self {
            plugins,
            fetcher: Arc::new(ReqwestFetcher),
        }
    }

    pub fn with_default_plugins() -> Self {
        Self::new(default_plugins())
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    pub async fn scrape_default(&self, input: &str) -> Result<Metadata, ScrapeError> {
        self.scrape(input, &PartialScraperOptions::default()).await
    }

    /// Scrapes `input`, which is either literal HTML or an `http(s)://` URL.
    ///
    /// Either the complete record comes back or a single [`ScrapeError`];
    /// nothing partial is returned on failure.
    pub async fn scrape(
        &self,
        input: &str,
        overrides: &PartialScraperOptions,
    ) -> Result<Metadata, ScrapeError> {
        let options = ScraperOptions::merged(overrides);
        let result = self.run(input, &options).await;
        if let Err(err) = &result {
            scrape_warn!("scrape failed: {err}");
        }
        result
    }

    async fn run(&self, input: &str, options: &ScraperOptions) -> Result<Metadata, ScrapeError> {
        let html = self.resolve_html(input, options).await?;

        let fragments = try_join_all(
            self.plugins
                .iter()
                .map(|plugin| plugin.extract(&html, options)),
        )
        .await?;

        let metadata = merge_all(Metadata::skeleton(options.extract_raw), fragments);
        Ok(post_process(metadata, options))
    }

    async fn resolve_html(
        &self,
        input: &str,
        options: &ScraperOptions,
    ) -> Result<String, ScrapeError> {
        if !is_http_url(input) {
            scrape_debug!("treating {} bytes of input as literal html", input.len());
            return Ok(input.to_string());
        }

        let url = if options.validate_urls {
            parse_http_url(input)?
        } else {
            Url::parse(input).map_err(|err| {
                ScrapeError::new(
                    format!("failed to fetch URL: {input}"),
                    crate::FetchError::new(FailureKind::InvalidUrl, err.to_string()),
                )
            })?
        };

        scrape_debug!("fetching {url}");
        let settings = FetchSettings::from_options(options);
        self.fetcher
            .fetch(&url, &settings)
            .await
            .map(|output| output.html)
            .map_err(|err| match err.kind {
                FailureKind::Timeout => ScrapeError::timeout(settings.timeout.as_millis(), err),
                _ => ScrapeError::new(format!("failed to fetch URL: {input}"), err),
            })
    }
}

impl Default for MetaScraper {
    fn default() -> Self {
        Self::with_default_plugins()
    }
}
