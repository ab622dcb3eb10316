use std::time::Duration;

use futures_util::StreamExt;
use meta_core::ScraperOptions;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use scrape_logging::{scrape_debug, scrape_info};
use url::Url;

use crate::decode::decode_html;
use crate::{FailureKind, FetchError};

pub const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const DEFAULT_MAX_BYTES: u64 = 5 * 1024 * 1024;
const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    /// Hard deadline covering connect, headers and body.
    pub timeout: Duration,
    pub user_agent: String,
    pub follow_redirects: bool,
    pub max_bytes: u64,
}

impl FetchSettings {
    pub fn from_options(options: &ScraperOptions) -> Self {
        Self {
            timeout: options.request_timeout(),
            user_agent: options.user_agent.clone(),
            follow_redirects: options.follow_redirects,
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self::from_options(&ScraperOptions::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub html: String,
    pub final_url: String,
    pub content_type: String,
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url, settings: &FetchSettings) -> Result<FetchOutput, FetchError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ReqwestFetcher;

impl ReqwestFetcher {
    fn build_client(&self, settings: &FetchSettings) -> Result<reqwest::Client, FetchError> {
        let policy = if settings.follow_redirects {
            reqwest::redirect::Policy::limited(MAX_REDIRECTS)
        } else {
            reqwest::redirect::Policy::none()
        };

        reqwest::Client::builder()
            .connect_timeout(settings.timeout)
            .redirect(policy)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    async fn fetch_inner(
        &self,
        url: &Url,
        settings: &FetchSettings,
    ) -> Result<FetchOutput, FetchError> {
        let client = self.build_client(settings)?;

        let response = client
            .get(url.clone())
            .header(ACCEPT, ACCEPT_HTML)
            .header(USER_AGENT, settings.user_agent.as_str())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("HTTP error! status: {}", status.as_u16()),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let content_type = match content_type {
            Some(ct) if ct.to_ascii_lowercase().contains("text/html") => ct,
            other => {
                return Err(FetchError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: other.clone(),
                    },
                    format!("Invalid content type: {}", other.as_deref().unwrap_or("none")),
                ));
            }
        };

        if let Some(content_len) = response.content_length() {
            if content_len > settings.max_bytes {
                return Err(too_large(settings.max_bytes, content_len));
            }
        }

        let final_url = response.url().to_string();
        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > settings.max_bytes {
                return Err(too_large(settings.max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        let decoded = decode_html(&bytes, Some(&content_type));
        scrape_debug!(
            "decoded {} bytes from {} as {}",
            bytes.len(),
            final_url,
            decoded.encoding_label
        );

        Ok(FetchOutput {
            html: decoded.html,
            final_url,
            content_type,
        })
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &Url, settings: &FetchSettings) -> Result<FetchOutput, FetchError> {
        match tokio::time::timeout(settings.timeout, self.fetch_inner(url, settings)).await {
            Ok(result) => {
                if let Ok(output) = &result {
                    scrape_info!("fetched {} ({})", output.final_url, output.content_type);
                }
                result
            }
            Err(_) => Err(FetchError::new(
                FailureKind::Timeout,
                format!("no complete response within {}ms", settings.timeout.as_millis()),
            )),
        }
    }
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
