mod cli;
mod config;
mod input;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use meta_engine::MetaScraper;
use scrape_logging::{scrape_debug, LogDestination};

use crate::cli::{Cli, LogTarget};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let options = cli.scraper_options()?;
    let input = input::load(&cli.input)?;

    let scraper = MetaScraper::with_default_plugins();
    scrape_debug!("running plugins {:?}", scraper.plugin_names());
    let metadata = scraper
        .scrape(&input, &options)
        .await
        .with_context(|| format!("could not scrape {}", cli.input))?;

    let json = if cli.compact {
        serde_json::to_string(&metadata)?
    } else {
        serde_json::to_string_pretty(&metadata)?
    };
    println!("{json}");
    Ok(())
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let destination = match cli.log {
        LogTarget::Off => return,
        LogTarget::Terminal => LogDestination::Terminal,
        LogTarget::File => LogDestination::File(cli.log_file.clone()),
        LogTarget::Both => LogDestination::Both(cli.log_file.clone()),
    };
    scrape_logging::initialize(destination, level);
}
