use meta_core::{
    to_truncated_text, MetadataFragment, OpenGraphMetadata, ScraperOptions, VideoMetadata,
};

use crate::dom::{DomError, HtmlDocument};
use crate::plugins::{collect_images, last_values, prefixed_tags, secure_if, Plugin};
use crate::PluginError;

const NAME: &str = "open-graph";

#[derive(Debug, Default, Clone, Copy)]
pub struct OpenGraphPlugin;

#[async_trait::async_trait]
impl Plugin for OpenGraphPlugin {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn extract(
        &self,
        html: &str,
        options: &ScraperOptions,
    ) -> Result<MetadataFragment, PluginError> {
        let open_graph =
            extract_open_graph(html, options).map_err(|err| PluginError::dom(NAME, err))?;
        Ok(MetadataFragment::with_open_graph(open_graph))
    }
}

fn extract_open_graph(html: &str, options: &ScraperOptions) -> Result<OpenGraphMetadata, DomError> {
    let doc = HtmlDocument::parse(html);
    let tags = prefixed_tags(&doc, r#"meta[property^="og:"]"#, "property", "og:")?;
    let og = last_values(&tags);
    let get = |key: &str| og.get(key).map(|v| v.to_string());

    let description = match (get("description"), options.description_limit()) {
        (Some(text), Some(limit)) => Some(to_truncated_text(&text, limit)),
        (text, _) => text,
    };

    Ok(OpenGraphMetadata {
        title: Some(get("title").unwrap_or_default()),
        description,
        image: og
            .get("image")
            .map(|url| secure_if(options.secure_images, url)),
        url: get("url"),
        og_type: get("type"),
        site_name: get("site_name"),
        locale: get("locale"),
        images: collect_images(&tags, options.secure_images),
        videos: collect_videos(&tags),
    })
}

fn collect_videos(tags: &[(String, String)]) -> Option<Vec<VideoMetadata>> {
    let mut videos: Vec<VideoMetadata> = Vec::new();
    for (key, value) in tags {
        match key.as_str() {
            "video" | "video:url" => videos.push(VideoMetadata {
                url: value.clone(),
                ..VideoMetadata::default()
            }),
            "video:type" => {
                if let Some(last) = videos.last_mut() {
                    last.mime_type = Some(value.clone());
                }
            }
            "video:width" => {
                if let Some(last) = videos.last_mut() {
                    last.width = value.parse().ok();
                }
            }
            "video:height" => {
                if let Some(last) = videos.last_mut() {
                    last.height = value.parse().ok();
                }
            }
            _ => {}
        }
    }
    (!videos.is_empty()).then_some(videos)
}
