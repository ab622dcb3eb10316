use meta_core::{MetadataFragment, RawLink, RawMetadata, ScraperOptions};

use crate::dom::{element_attr, DomError, HtmlDocument};
use crate::plugins::Plugin;
use crate::PluginError;

const NAME: &str = "raw";
const META_KEY_ATTRS: [&str; 4] = ["name", "property", "http-equiv", "itemprop"];

/// Verbatim capture of `<meta>` and `<link>` tags into `raw`.
///
/// Contributes nothing unless raw extraction is enabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawTagsPlugin;

#[async_trait::async_trait]
impl Plugin for RawTagsPlugin {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn extract(
        &self,
        html: &str,
        options: &ScraperOptions,
    ) -> Result<MetadataFragment, PluginError> {
        if !options.extract_raw {
            return Ok(MetadataFragment::empty());
        }
        let raw = extract_raw(html).map_err(|err| PluginError::dom(NAME, err))?;
        Ok(MetadataFragment::with_raw(raw))
    }
}

fn extract_raw(html: &str) -> Result<RawMetadata, DomError> {
    let doc = HtmlDocument::parse(html);
    let mut raw = RawMetadata {
        title: Some(doc.text("title")?).filter(|t| !t.is_empty()),
        ..RawMetadata::default()
    };

    for meta in doc.select_all("meta[content]")? {
        let key = META_KEY_ATTRS
            .iter()
            .find_map(|attr| element_attr(&meta, attr).filter(|k| !k.is_empty()));
        if let (Some(key), Some(content)) = (key, element_attr(&meta, "content")) {
            raw.meta.insert(key, content);
        }
    }

    for link in doc.select_all("link[rel][href]")? {
        let mut rel = String::new();
        let mut href = String::new();
        let mut attributes = std::collections::BTreeMap::new();
        for (name, value) in link.value().attrs() {
            match name {
                "rel" => rel = value.trim().to_string(),
                "href" => href = value.trim().to_string(),
                _ => {
                    attributes.insert(name.to_string(), value.trim().to_string());
                }
            }
        }
        raw.links.push(RawLink {
            rel,
            href,
            attributes,
        });
    }

    Ok(raw)
}
