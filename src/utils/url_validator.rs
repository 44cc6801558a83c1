//! URL 验证模块
//!
//! Only absolute `http`/`https` URLs with a host are accepted as redirect targets.

use url::Url;

/// URL 验证错误
#[derive(Debug, PartialEq, Eq)]
pub enum UrlValidationError {
    EmptyUrl,
    InvalidProtocol(String),
    MissingHost,
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "URL cannot be empty"),
            Self::InvalidProtocol(proto) => write!(
                f,
                "Invalid protocol: {}. Only http:// and https:// are allowed",
                proto
            ),
            Self::MissingHost => write!(f, "URL has no host"),
            Self::InvalidFormat(msg) => write!(f, "Invalid URL format: {}", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// 验证 URL
///
/// The candidate is checked as-is: surrounding whitespace makes it invalid,
/// because the stored redirect URL must equal the submitted string.
pub fn validate_url(candidate: &str) -> Result<(), UrlValidationError> {
    if candidate.trim().is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }
    if candidate.trim() != candidate {
        return Err(UrlValidationError::InvalidFormat(
            "leading or trailing whitespace".to_string(),
        ));
    }

    // the parser strips tabs and newlines, but they cannot go in a Location header
    if candidate.chars().any(|c| c.is_ascii_control()) {
        return Err(UrlValidationError::InvalidFormat(
            "control characters are not allowed".to_string(),
        ));
    }

    // relative paths ("/a/b", "abcd") fail here with RelativeUrlWithoutBase
    let parsed =
        Url::parse(candidate).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(UrlValidationError::InvalidProtocol(format!("{}:", other))),
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}

/// `true` when the candidate is an absolute http(s) URL with a host
#[inline]
pub fn is_valid(candidate: &str) -> bool {
    validate_url(candidate).is_ok()
}

/// 获取 URL 验证错误的用户友好消息
pub fn validation_error_message(error: &UrlValidationError) -> &'static str {
    match error {
        UrlValidationError::EmptyUrl => "url is required",
        UrlValidationError::InvalidProtocol(_) => "url must start with http:// or https://",
        UrlValidationError::MissingHost => "url must contain a host",
        UrlValidationError::InvalidFormat(_) => "invalid url",
    }
}
