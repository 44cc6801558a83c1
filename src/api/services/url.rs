//! `/url` endpoints: create, redirect, analytics

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, Responder, web};
use tracing::{debug, trace};

use super::helpers::{error_from_urlmini, error_response};
use super::types::{CreateUrlRequest, ShortUrlResponse};
use crate::errors::UrlMiniError;
use crate::services::{LinkService, RedirectService};
use crate::utils::is_valid_short_id;

pub struct UrlService;

impl UrlService {
    /// `POST /url`
    ///
    /// The body is parsed by hand so a missing or malformed body still gets a
    /// JSON `400` instead of the framework's plain-text rejection.
    pub async fn create(body: web::Bytes, links: web::Data<LinkService>) -> impl Responder {
        let request: CreateUrlRequest = match serde_json::from_slice(&body) {
            Ok(request) => request,
            Err(e) => {
                debug!("Rejected create request body: {}", e);
                let message = if body.is_empty() {
                    "url is required"
                } else {
                    "invalid request body"
                };
                return error_response(StatusCode::BAD_REQUEST, message);
            }
        };

        let raw_url = request.url.unwrap_or_default();
        match links.create_short_url(&raw_url).await {
            Ok(record) => HttpResponse::Ok().json(ShortUrlResponse { short_url: record }),
            Err(e) => error_from_urlmini(&e),
        }
    }

    /// `GET /url/{shortId}`
    pub async fn redirect(
        path: web::Path<String>,
        redirects: web::Data<RedirectService>,
    ) -> impl Responder {
        let short_id = path.into_inner();

        if short_id.is_empty() {
            return Self::missing_short_id().await;
        }
        if !is_valid_short_id(&short_id) {
            // 非法短 ID 直接 404，不查存储
            trace!("Malformed short id rejected: {}", short_id);
            return error_from_urlmini(&UrlMiniError::not_found(short_id));
        }

        match redirects.resolve(&short_id).await {
            Ok(destination) => HttpResponse::Found()
                .insert_header((header::LOCATION, destination))
                .finish(),
            Err(e) => error_from_urlmini(&e),
        }
    }

    /// `GET /url/analytics/{shortId}`
    pub async fn analytics(
        path: web::Path<String>,
        redirects: web::Data<RedirectService>,
    ) -> impl Responder {
        let short_id = path.into_inner();

        if !is_valid_short_id(&short_id) {
            return error_from_urlmini(&UrlMiniError::not_found(short_id));
        }

        match redirects.get_analytics(&short_id).await {
            Ok(record) => HttpResponse::Ok().json(ShortUrlResponse { short_url: record }),
            Err(e) => error_from_urlmini(&e),
        }
    }

    /// `GET /url/` with no short id
    pub async fn missing_short_id() -> HttpResponse {
        error_response(StatusCode::BAD_REQUEST, "short id is required")
    }

    /// Anything else under `/url`
    pub async fn unknown_route() -> HttpResponse {
        error_response(StatusCode::NOT_FOUND, "not found")
    }
}

/// `/url` 路由配置
pub fn url_routes() -> actix_web::Scope {
    web::scope("/url")
        .route("", web::post().to(UrlService::create))
        .route("", web::get().to(UrlService::missing_short_id))
        .route("/", web::post().to(UrlService::create))
        .route("/", web::get().to(UrlService::missing_short_id))
        .route("/analytics/{short_id}", web::get().to(UrlService::analytics))
        .route("/{short_id}", web::get().to(UrlService::redirect))
        .default_service(web::to(UrlService::unknown_route))
}
