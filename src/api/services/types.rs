//! Request and response bodies of the HTTP API

use serde::{Deserialize, Serialize};

use crate::storage::UrlRecord;

/// `POST /url` body
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUrlRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// `{ "shortUrl": UrlRecord }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortUrlResponse {
    pub short_url: UrlRecord,
}

/// `{ "error": string }`, the body of every failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// `{ "message": string }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
