//! `GET /`: self-describing API index

use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde_json::json;

/// Settings for the API index page
#[derive(Debug, Clone, Default)]
pub struct ApiIndexSettings {
    /// Public base URL; derived from the request when `None`
    pub base_url: Option<String>,
}

pub struct ApiIndexService;

impl ApiIndexService {
    pub async fn index(
        req: HttpRequest,
        settings: Option<web::Data<ApiIndexSettings>>,
    ) -> impl Responder {
        let base_url = settings
            .and_then(|s| s.base_url.clone())
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| {
                let conn = req.connection_info();
                format!("{}://{}", conn.scheme(), conn.host())
            });

        HttpResponse::Ok().json(Self::describe(&base_url))
    }

    fn describe(base_url: &str) -> serde_json::Value {
        json!({
            "name": "urlmini - URL Shortener API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "A simple URL shortener service with analytics",
            "baseUrl": base_url,
            "endpoints": {
                "health": {
                    "method": "GET",
                    "path": "/check",
                    "description": "Check API health status",
                    "example": format!("{}/check", base_url),
                    "response": { "success": { "message": "api is healthy" } }
                },
                "createShortUrl": {
                    "method": "POST",
                    "path": "/url",
                    "description": "Create a new short URL",
                    "example": format!("{}/url", base_url),
                    "headers": { "Content-Type": "application/json" },
                    "body": { "url": "https://example.com" },
                    "response": {
                        "success": { "shortUrl": "UrlRecord" },
                        "error": { "error": "url is required/invalid" }
                    }
                },
                "redirect": {
                    "method": "GET",
                    "path": "/url/{shortId}",
                    "description": "Redirect to original URL using short ID",
                    "example": format!("{}/url/abc12345", base_url),
                    "response": "302 redirect to original URL"
                },
                "analytics": {
                    "method": "GET",
                    "path": "/url/analytics/{shortId}",
                    "description": "Get analytics for a short URL",
                    "example": format!("{}/url/analytics/abc12345", base_url),
                    "response": {
                        "success": { "shortUrl": "UrlRecord with visitCount and visitHistory" },
                        "error": { "error": "short url not found" }
                    }
                }
            },
            "status": "online",
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })
    }
}

pub fn index_routes() -> actix_web::Resource {
    web::resource("/").route(web::get().to(ApiIndexService::index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_uses_base_url() {
        let doc = ApiIndexService::describe("https://s.example");
        assert_eq!(doc["baseUrl"], "https://s.example");
        assert_eq!(doc["endpoints"]["health"]["example"], "https://s.example/check");
        assert_eq!(doc["status"], "online");
    }
}
