use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("invalid url: {0}")]
    Invalid(String),
    #[error("only HTTP(S) protocols are supported, got {0}")]
    UnsupportedProtocol(String),
}

/// True when `input` should be fetched rather than parsed as literal HTML.
pub fn is_http_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Parses `input` and rejects anything whose scheme is not http or https.
pub fn parse_http_url(input: &str) -> Result<Url, UrlError> {
    let url = Url::parse(input).map_err(|err| UrlError::Invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(UrlError::UnsupportedProtocol(format!("{other}:"))),
    }
}

/// Upgrades a URL to HTTPS.
///
/// `//host/path` becomes `https://host/path`, `http:` becomes `https:`, and
/// anything else comes back unchanged. `None` and empty input yield `None`.
pub fn to_secure_url(url: Option<&str>) -> Option<String> {
    let url = url.filter(|u| !u.is_empty())?;
    if url.starts_with("//") {
        return Some(format!("https:{url}"));
    }
    if url.starts_with("http:") {
        return Some(upgrade_scheme(url));
    }
    Some(url.to_string())
}

/// Single-shot replacement of the first `http:` with `https:`.
pub fn upgrade_scheme(url: &str) -> String {
    url.replacen("http:", "https:", 1)
}
