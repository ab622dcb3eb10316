use meta_core::{to_truncated_text, MetadataFragment, ScraperOptions, TwitterMetadata};

use crate::dom::{DomError, HtmlDocument};
use crate::plugins::{collect_images, last_values, prefixed_tags, secure_if, Plugin};
use crate::PluginError;

const NAME: &str = "twitter";

#[derive(Debug, Default, Clone, Copy)]
pub struct TwitterPlugin;

#[async_trait::async_trait]
impl Plugin for TwitterPlugin {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn extract(
        &self,
        html: &str,
        options: &ScraperOptions,
    ) -> Result<MetadataFragment, PluginError> {
        let twitter =
            extract_twitter(html, options).map_err(|err| PluginError::dom(NAME, err))?;
        Ok(MetadataFragment::with_twitter(twitter))
    }
}

fn extract_twitter(html: &str, options: &ScraperOptions) -> Result<TwitterMetadata, DomError> {
    let doc = HtmlDocument::parse(html);
    let tags = prefixed_tags(&doc, r#"meta[name^="twitter:"]"#, "name", "twitter:")?;
    let card = last_values(&tags);
    let get = |key: &str| card.get(key).map(|v| v.to_string());

    let description = match (get("description"), options.description_limit()) {
        (Some(text), Some(limit)) => Some(to_truncated_text(&text, limit)),
        (text, _) => text,
    };

    Ok(TwitterMetadata {
        title: Some(get("title").unwrap_or_default()),
        description,
        image: card
            .get("image")
            .map(|url| secure_if(options.secure_images, url)),
        card: get("card"),
        site: get("site"),
        creator: get("creator"),
        images: collect_images(&tags, options.secure_images),
    })
}
