//! Metascrape core: metadata model, options, and the pure merge/post-process pipeline.
mod fragment;
mod metadata;
mod options;
mod process;
mod text;
mod urls;

pub use fragment::{merge_all, merge_fragment, MetadataFragment};
pub use metadata::{
    AlternatesMetadata, BaseMetadata, ImageMetadata, JsonLdMetadata, Metadata, OpenGraphMetadata,
    RawLink, RawMetadata, TwitterMetadata, VideoMetadata,
};
pub use options::{
    PartialScraperOptions, ScraperOptions, DEFAULT_MAX_DESCRIPTION_LENGTH, DEFAULT_TIMEOUT,
    DEFAULT_USER_AGENT,
};
pub use process::post_process;
pub use text::{to_normalized_text, to_truncated_text};
pub use urls::{is_http_url, parse_http_url, to_secure_url, upgrade_scheme, UrlError};
