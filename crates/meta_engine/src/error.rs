use std::fmt;

use meta_core::UrlError;

use crate::dom::DomError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: Option<String> },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => match content_type {
                Some(ct) => write!(f, "invalid content type {ct}"),
                None => write!(f, "missing content type"),
            },
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Failure raised by a plugin that it could not recover from locally.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("plugin {plugin}: {source}")]
    Dom {
        plugin: &'static str,
        #[source]
        source: DomError,
    },
    #[error("plugin {plugin}: {message}")]
    Failed {
        plugin: &'static str,
        message: String,
    },
    /// A scrape run from inside a plugin failed; the outer scrape returns it unchanged.
    #[error(transparent)]
    Nested(Box<ScrapeError>),
}

impl PluginError {
    pub fn dom(plugin: &'static str, source: DomError) -> Self {
        Self::Dom { plugin, source }
    }

    pub fn failed(plugin: &'static str, message: impl Into<String>) -> Self {
        Self::Failed {
            plugin,
            message: message.into(),
        }
    }
}

/// What went wrong underneath a [`ScrapeError`].
#[derive(Debug, thiserror::Error)]
pub enum ScrapeCause {
    #[error(transparent)]
    InvalidInput(#[from] UrlError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Plugin(#[from] PluginError),
}

/// The single error type a scrape returns.
///
/// Every lower-level failure is wrapped exactly once, keeping the original as
/// the `source()` of this error. A `ScrapeError` surfacing from a plugin is
/// passed through, not wrapped again.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ScrapeError {
    message: String,
    #[source]
    cause: ScrapeCause,
}

impl ScrapeError {
    pub(crate) fn new(message: impl Into<String>, cause: impl Into<ScrapeCause>) -> Self {
        Self {
            message: message.into(),
            cause: cause.into(),
        }
    }

    pub(crate) fn timeout(timeout_ms: u128, cause: FetchError) -> Self {
        Self::new(format!("request timeout after {timeout_ms}ms"), cause)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> &ScrapeCause {
        &self.cause
    }

    /// True when the fetch deadline elapsed before the response completed.
    pub fn is_timeout(&self) -> bool {
        matches!(
            &self.cause,
            ScrapeCause::Fetch(FetchError {
                kind: FailureKind::Timeout,
                ..
            })
        )
    }

    pub fn fetch_failure(&self) -> Option<&FailureKind> {
        match &self.cause {
            ScrapeCause::Fetch(err) => Some(&err.kind),
            _ => None,
        }
    }
}

impl From<UrlError> for ScrapeError {
    fn from(err: UrlError) -> Self {
        Self::new("failed to scrape metadata", err)
    }
}

impl From<ScrapeError> for PluginError {
    fn from(err: ScrapeError) -> Self {
        Self::Nested(Box::new(err))
    }
}

impl From<PluginError> for ScrapeError {
    fn from(err: PluginError) -> Self {
        match err {
            PluginError::Nested(inner) => *inner,
            other => Self::new("failed to scrape metadata", other),
        }
    }
}
