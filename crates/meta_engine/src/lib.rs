//! Metascrape engine: DOM access, extraction plugins, fetching, and the scrape orchestrator.
mod decode;
mod dom;
mod engine;
mod error;
mod fetch;
mod plugins;

pub use decode::{decode_html, DecodedHtml};
pub use dom::{element_attr, element_text, DomError, HtmlDocument};
pub use engine::MetaScraper;
pub use error::{FailureKind, FetchError, PluginError, ScrapeCause, ScrapeError};
pub use fetch::{FetchOutput, FetchSettings, Fetcher, ReqwestFetcher, ACCEPT_HTML};
pub use plugins::{
    default_plugins, parse_json_ld, plugin_fn, FnPlugin, JsonLdPlugin, MetaTagsPlugin,
    OpenGraphPlugin, Plugin, RawTagsPlugin, TwitterPlugin,
};

pub use meta_core::{Metadata, MetadataFragment, PartialScraperOptions, ScraperOptions};
