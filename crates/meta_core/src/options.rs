use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_DESCRIPTION_LENGTH: usize = 200;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; MetaScraper/1.0;)";

/// Resolved configuration for one scrape call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperOptions {
    /// Description truncation threshold in characters. `0` disables truncation.
    pub max_description_length: usize,
    /// Upgrade `http:` and protocol-relative image/favicon URLs to `https:`.
    pub secure_images: bool,
    /// Hard deadline for the network fetch. Zero means the default.
    pub timeout: Duration,
    pub user_agent: String,
    pub follow_redirects: bool,
    /// Reject URL inputs that do not parse as http(s) before any network access.
    pub validate_urls: bool,
    /// Allocate and fill the `raw` bucket.
    pub extract_raw: bool,
}

impl Default for ScraperOptions {
    fn default() -> Self {
        Self {
            max_description_length: DEFAULT_MAX_DESCRIPTION_LENGTH,
            secure_images: true,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            follow_redirects: true,
            validate_urls: true,
            extract_raw: false,
        }
    }
}

impl ScraperOptions {
    /// Applies caller overrides over the defaults, one level deep.
    pub fn merged(overrides: &PartialScraperOptions) -> Self {
        Self::default().with_overrides(overrides)
    }

    /// Replaces every field that `overrides` sets; unset fields keep `self`'s value.
    pub fn with_overrides(self, overrides: &PartialScraperOptions) -> Self {
        Self {
            max_description_length: overrides
                .max_description_length
                .unwrap_or(self.max_description_length),
            secure_images: overrides.secure_images.unwrap_or(self.secure_images),
            timeout: overrides
                .timeout
                .map(Duration::from_millis)
                .unwrap_or(self.timeout),
            user_agent: overrides
                .user_agent
                .clone()
                .unwrap_or(self.user_agent),
            follow_redirects: overrides.follow_redirects.unwrap_or(self.follow_redirects),
            validate_urls: overrides.validate_urls.unwrap_or(self.validate_urls),
            extract_raw: overrides.extract_raw.unwrap_or(self.extract_raw),
        }
    }

    /// Fetch deadline; a zero timeout falls back to [`DEFAULT_TIMEOUT`].
    pub fn request_timeout(&self) -> Duration {
        if self.timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            self.timeout
        }
    }

    /// Truncation limit, or `None` when truncation is disabled.
    pub fn description_limit(&self) -> Option<usize> {
        (self.max_description_length > 0).then_some(self.max_description_length)
    }
}

/// Caller-supplied overrides. Loadable from config files; `timeout` is in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct PartialScraperOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_description_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure_images: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_redirects: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate_urls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extract_raw: Option<bool>,
}

impl PartialScraperOptions {
    /// Shallow merge: every field `other` sets wins over `self`.
    pub fn overlay(self, other: PartialScraperOptions) -> Self {
        Self {
            max_description_length: other.max_description_length.or(self.max_description_length),
            secure_images: other.secure_images.or(self.secure_images),
            timeout: other.timeout.or(self.timeout),
            user_agent: other.user_agent.or(self.user_agent),
            follow_redirects: other.follow_redirects.or(self.follow_redirects),
            validate_urls: other.validate_urls.or(self.validate_urls),
            extract_raw: other.extract_raw.or(self.extract_raw),
        }
    }
}
