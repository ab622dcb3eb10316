use std::fs;
use std::io::{self, Read};

use anyhow::Context;
use meta_core::is_http_url;

/// Turns the positional argument into scraper input: URLs pass through,
/// `-` reads stdin, anything else is read as a file path.
pub fn load(arg: &str) -> anyhow::Result<String> {
    if is_http_url(arg) {
        return Ok(arg.to_string());
    }
    if arg == "-" {
        let mut html = String::new();
        io::stdin()
            .read_to_string(&mut html)
            .context("failed to read HTML from stdin")?;
        return Ok(html);
    }
    fs::read_to_string(arg).with_context(|| format!("failed to read HTML file {arg}"))
}
