use meta_core::{AlternatesMetadata, BaseMetadata, MetadataFragment, ScraperOptions};

use crate::dom::{element_attr, DomError, HtmlDocument};
use crate::plugins::{secure_if, Plugin};
use crate::PluginError;

const NAME: &str = "meta-tags";

/// Reads `<title>`, standard `<meta name>` tags and `<link>` relations into `base`.
///
/// Title, description, author and keywords are always filled (empty when the
/// page lacks them); everything else stays absent unless present.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetaTagsPlugin;

#[async_trait::async_trait]
impl Plugin for MetaTagsPlugin {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn extract(
        &self,
        html: &str,
        options: &ScraperOptions,
    ) -> Result<MetadataFragment, PluginError> {
        let base = extract_base(html, options.secure_images)
            .map_err(|err| PluginError::dom(NAME, err))?;
        Ok(MetadataFragment::with_base(base))
    }
}

fn extract_base(html: &str, secure_images: bool) -> Result<BaseMetadata, DomError> {
    let doc = HtmlDocument::parse(html);
    let meta = |name: &str| -> Result<Option<String>, DomError> {
        Ok(doc
            .attr(&format!(r#"meta[name="{name}"]"#), "content")?
            .filter(|v| !v.is_empty()))
    };

    let keywords: Vec<String> = meta("keywords")?
        .map(|content| {
            content
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let canonical_url = doc
        .attr(r#"link[rel="canonical"]"#, "href")?
        .filter(|v| !v.is_empty());

    let favicon = doc
        .attr(r#"link[rel="icon"], link[rel="shortcut icon"]"#, "href")?
        .filter(|v| !v.is_empty())
        .map(|href| secure_if(secure_images, &href));

    let alternates = extract_alternates(&doc, canonical_url.as_deref())?;

    Ok(BaseMetadata {
        title: Some(doc.text("title")?),
        description: Some(meta("description")?.unwrap_or_default()),
        author: Some(meta("author")?.unwrap_or_default()),
        keywords: Some(keywords),
        canonical_url,
        favicon,
        theme_color: meta("theme-color")?,
        viewport: meta("viewport")?,
        robots: meta("robots")?,
        alternates,
        ..BaseMetadata::default()
    })
}

fn extract_alternates(
    doc: &HtmlDocument,
    canonical: Option<&str>,
) -> Result<Option<AlternatesMetadata>, DomError> {
    let mut alternates = AlternatesMetadata::default();
    for link in doc.select_all(r#"link[rel="alternate"][href]"#)? {
        let Some(href) = element_attr(&link, "href").filter(|h| !h.is_empty()) else {
            continue;
        };
        if let Some(lang) = element_attr(&link, "hreflang") {
            alternates.languages.insert(lang, href);
        } else if let Some(media) = element_attr(&link, "media") {
            alternates.media.insert(media, href);
        } else if let Some(kind) = element_attr(&link, "type") {
            alternates.types.insert(kind, href);
        }
    }
    if alternates.is_empty() {
        return Ok(None);
    }
    alternates.canonical = canonical.map(str::to_string);
    Ok(Some(alternates))
}
