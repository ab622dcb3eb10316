use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use meta_core::PartialScraperOptions;

use crate::config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Off,
    Terminal,
    File,
    Both,
}

/// Extract title, description, OpenGraph, Twitter card and JSON-LD metadata
/// from a web page and print it as JSON.
#[derive(Debug, Parser)]
#[command(name = "metascrape", version)]
pub struct Cli {
    /// An http(s) URL, a path to an HTML file, or `-` to read HTML from stdin.
    pub input: String,

    /// RON file with scraper options, e.g. `(maxDescriptionLength: 120, timeout: 5000)`.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "CHARS")]
    pub max_description_length: Option<usize>,

    /// Keep `http:` image and favicon URLs as found.
    #[arg(long)]
    pub insecure_images: bool,

    /// Fetch deadline in milliseconds.
    #[arg(long, value_name = "MS")]
    pub timeout: Option<u64>,

    #[arg(long)]
    pub user_agent: Option<String>,

    /// Treat 3xx responses as failures instead of following them.
    #[arg(long)]
    pub no_redirects: bool,

    #[arg(long)]
    pub skip_url_validation: bool,

    /// Include the verbatim `raw` meta/link capture.
    #[arg(long)]
    pub raw: bool,

    /// Print single-line JSON.
    #[arg(long)]
    pub compact: bool,

    #[arg(long, value_enum, default_value_t = LogTarget::Off)]
    pub log: LogTarget,

    #[arg(long, default_value = "metascrape.log", value_name = "FILE")]
    pub log_file: PathBuf,

    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Options from the config file (if any) with command-line flags layered on top.
    pub fn scraper_options(&self) -> anyhow::Result<PartialScraperOptions> {
        let from_file = match &self.config {
            Some(path) => config::load_options(path)?,
            None => PartialScraperOptions::default(),
        };
        Ok(from_file.overlay(self.flag_options()))
    }

    fn flag_options(&self) -> PartialScraperOptions {
        PartialScraperOptions {
            max_description_length: self.max_description_length,
            secure_images: self.insecure_images.then_some(false),
            timeout: self.timeout,
            user_agent: self.user_agent.clone(),
            follow_redirects: self.no_redirects.then_some(false),
            validate_urls: self.skip_url_validation.then_some(false),
            extract_raw: self.raw.then_some(true),
        }
    }
}
