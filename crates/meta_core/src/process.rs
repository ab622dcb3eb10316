use crate::metadata::Metadata;
use crate::options::ScraperOptions;
use crate::text::{to_normalized_text, to_truncated_text};
use crate::urls::upgrade_scheme;

/// Post-merge pass over the `base` bucket only.
///
/// Normalizes the title, normalizes then truncates the description, and
/// upgrades an `http:` image URL when secure images are on. OpenGraph and
/// Twitter values are left exactly as their plugins produced them.
pub fn post_process(mut metadata: Metadata, options: &ScraperOptions) -> Metadata {
    let base = &mut metadata.base;

    if let Some(title) = base.title.as_mut().filter(|t| !t.is_empty()) {
        *title = to_normalized_text(title);
    }

    if let (Some(description), Some(limit)) = (
        base.description.as_mut().filter(|d| !d.is_empty()),
        options.description_limit(),
    ) {
        *description = to_truncated_text(&to_normalized_text(description), limit);
    }

    if options.secure_images {
        if let Some(image) = base.image.as_mut().filter(|i| i.starts_with("http:")) {
            *image = upgrade_scheme(image);
        }
    }

    metadata
}
