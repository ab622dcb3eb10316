use std::fs;
use std::path::Path;

use anyhow::Context;
use meta_core::PartialScraperOptions;
use ron::extensions::Extensions;
use scrape_logging::scrape_info;

/// Reads scraper option overrides from a RON file.
///
/// Values may be written bare (`timeout: 5000`) rather than as `Some(5000)`.
pub fn load_options(path: &Path) -> anyhow::Result<PartialScraperOptions> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let options: PartialScraperOptions = ron::Options::default()
        .with_default_extension(Extensions::IMPLICIT_SOME)
        .from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    scrape_info!("Loaded scraper options from {:?}", path);
    Ok(options)
}
