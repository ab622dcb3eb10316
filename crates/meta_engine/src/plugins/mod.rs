//! Extraction plugins: one per metadata family.
//!
//! Each plugin parses the HTML on its own and returns a fragment that touches
//! only its own top-level key. Plugins never see each other's output.
mod json_ld;
mod meta_tags;
mod open_graph;
mod raw;
mod twitter;

use std::collections::HashMap;

use meta_core::{ImageMetadata, MetadataFragment, ScraperOptions};

use crate::dom::{element_attr, HtmlDocument};
use crate::PluginError;

pub use json_ld::{parse_json_ld, JsonLdPlugin};
pub use meta_tags::MetaTagsPlugin;
pub use open_graph::OpenGraphPlugin;
pub use raw::RawTagsPlugin;
pub use twitter::TwitterPlugin;

#[async_trait::async_trait]
pub trait Plugin: Send + Sync {
    /// Short identifier used in logs and errors.
    fn name(&self) -> &'static str;

    async fn extract(
        &self,
        html: &str,
        options: &ScraperOptions,
    ) -> Result<MetadataFragment, PluginError>;
}

/// Adapts a plain function or closure into a [`Plugin`].
pub struct FnPlugin<F> {
    name: &'static str,
    func: F,
}

pub fn plugin_fn<F>(name: &'static str, func: F) -> FnPlugin<F>
where
    F: Fn(&str, &ScraperOptions) -> Result<MetadataFragment, PluginError> + Send + Sync,
{
    FnPlugin { name, func }
}

#[async_trait::async_trait]
impl<F> Plugin for FnPlugin<F>
where
    F: Fn(&str, &ScraperOptions) -> Result<MetadataFragment, PluginError> + Send + Sync,
{
    fn name(&self) -> &'static str {
        self.name
    }

    async fn extract(
        &self,
        html: &str,
        options: &ScraperOptions,
    ) -> Result<MetadataFragment, PluginError> {
        (self.func)(html, options)
    }
}

/// The standard plugin set in merge order.
pub fn default_plugins() -> Vec<Box<dyn Plugin>> {
    vec![
        Box::new(MetaTagsPlugin),
        Box::new(OpenGraphPlugin),
        Box::new(TwitterPlugin),
        Box::new(JsonLdPlugin),
        Box::new(RawTagsPlugin),
    ]
}

/// `(key, content)` pairs for every element whose `attr` starts with `prefix`,
/// in document order, prefix stripped. Elements without a non-empty
/// `content` are skipped.
pub(crate) fn prefixed_tags(
    doc: &HtmlDocument,
    selector: &str,
    attr: &str,
    prefix: &str,
) -> Result<Vec<(String, String)>, crate::dom::DomError> {
    Ok(doc
        .select_all(selector)?
        .iter()
        .filter_map(|el| {
            let key = element_attr(el, attr)?;
            let content = element_attr(el, "content").filter(|c| !c.is_empty())?;
            let key = key.strip_prefix(prefix).unwrap_or(&key).to_string();
            Some((key, content))
        })
        .collect())
}

/// Collapses ordered pairs into a map where the last occurrence of a key wins.
pub(crate) fn last_values(tags: &[(String, String)]) -> HashMap<&str, &str> {
    tags.iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}

/// Groups `image`, `image:url` and their `image:*` detail tags into a list.
///
/// A detail tag attaches to the most recent image; details that arrive before
/// any image are dropped.
pub(crate) fn collect_images(
    tags: &[(String, String)],
    secure_images: bool,
) -> Option<Vec<ImageMetadata>> {
    let mut images: Vec<ImageMetadata> = Vec::new();
    for (key, value) in tags {
        match key.as_str() {
            "image" | "image:url" | "image:src" => images.push(ImageMetadata {
                url: secure_if(secure_images, value),
                ..ImageMetadata::default()
            }),
            "image:alt" => {
                if let Some(last) = images.last_mut() {
                    last.alt = Some(value.clone());
                }
            }
            "image:width" => {
                if let Some(last) = images.last_mut() {
                    last.width = value.parse().ok();
                }
            }
            "image:height" => {
                if let Some(last) = images.last_mut() {
                    last.height = value.parse().ok();
                }
            }
            "image:type" => {
                if let Some(last) = images.last_mut() {
                    last.mime_type = Some(value.clone());
                }
            }
            _ => {}
        }
    }
    (!images.is_empty()).then_some(images)
}

pub(crate) fn secure_if(secure_images: bool, url: &str) -> String {
    if secure_images {
        meta_core::to_secure_url(Some(url)).unwrap_or_else(|| url.to_string())
    } else {
        url.to_string()
    }
}
