//! HTTP API tests
//!
//! Drives the full route table with actix's test service over an in-memory
//! store.

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::Value;

use urlmini::api::configure_routes;
use urlmini::api::services::ApiIndexSettings;
use urlmini::api::services::types::ShortUrlResponse;
use urlmini::config::StaticConfig;
use urlmini::runtime::lifetime::startup::{StartupContext, build_context};
use urlmini::runtime::modes::server::cors;
use urlmini::storage::{MappingStore, MemoryStore};

fn test_context() -> StartupContext {
    let store: Arc<dyn MappingStore> = Arc::new(MemoryStore::new());
    build_context(store, &StaticConfig::default())
}

macro_rules! test_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .wrap(cors())
                .app_data(web::Data::from($ctx.link_service.clone()))
                .app_data(web::Data::from($ctx.redirect_service.clone()))
                .app_data(web::Data::new(ApiIndexSettings {
                    base_url: Some("https://s.example/".to_string()),
                }))
                .configure(configure_routes),
        )
        .await
    };
}

fn create_request(url: &str) -> TestRequest {
    TestRequest::post()
        .uri("/url")
        .set_json(serde_json::json!({ "url": url }))
}

// =============================================================================
// Health and index
// =============================================================================

#[actix_rt::test]
async fn test_health_check() {
    let ctx = test_context();
    let app = test_app!(ctx);

    let resp = test::call_service(&app, TestRequest::get().uri("/check").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "api is healthy");
}

#[actix_rt::test]
async fn test_api_index_uses_configured_base_url() {
    let ctx = test_context();
    let app = test_app!(ctx);

    let resp = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["baseUrl"], "https://s.example");
    assert_eq!(body["endpoints"]["createShortUrl"]["path"], "/url");
}

// =============================================================================
// POST /url
// =============================================================================

#[actix_rt::test]
async fn test_create_short_url() {
    let ctx = test_context();
    let app = test_app!(ctx);

    let resp = test::call_service(&app, create_request("https://example.com/a").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let record = &body["shortUrl"];
    assert_eq!(record["redirectUrl"], "https://example.com/a");
    assert_eq!(record["visitCount"], 0);
    assert_eq!(record["visitHistory"], serde_json::json!([]));
    assert_eq!(record["shortId"].as_str().unwrap().len(), 8);
    assert!(record["id"].is_string());
    assert!(
        chrono::DateTime::parse_from_rfc3339(record["createdAt"].as_str().unwrap()).is_ok()
    );
}

#[actix_rt::test]
async fn test_create_rejects_bad_urls() {
    let ctx = test_context();
    let app = test_app!(ctx);

    let cases = [
        ("", "url is required"),
        ("abcd", "invalid url"),
        ("ftp://example.com/file", "url must start with http:// or https://"),
    ];
    for (url, expected) in cases {
        let resp = test::call_service(&app, create_request(url).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{:?}", url);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], expected, "{:?}", url);
    }

    assert_eq!(ctx.store.count().await.unwrap(), 0);
}

#[actix_rt::test]
async fn test_create_rejects_control_characters() {
    let ctx = test_context();
    let app = test_app!(ctx);

    let resp = test::call_service(
        &app,
        create_request("http://example.com/a\tb\nc").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid url");

    assert_eq!(ctx.store.count().await.unwrap(), 0);
}

#[actix_rt::test]
async fn test_create_with_missing_field_or_body() {
    let ctx = test_context();
    let app = test_app!(ctx);

    let req = TestRequest::post()
        .uri("/url")
        .set_json(serde_json::json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "url is required");

    let req = TestRequest::post().uri("/url").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "url is required");

    let req = TestRequest::post()
        .uri("/url")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

// =============================================================================
// GET /url/{shortId}
// =============================================================================

#[actix_rt::test]
async fn test_redirect_and_analytics_flow() {
    let ctx = test_context();
    let app = test_app!(ctx);

    let resp = test::call_service(&app, create_request("https://example.com/b").to_request()).await;
    let created: ShortUrlResponse = test::read_body_json(resp).await;
    let short_id = created.short_url.short_id;

    for _ in 0..3 {
        let req = TestRequest::get()
            .uri(&format!("/url/{}", short_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "https://example.com/b"
        );
    }

    ctx.recorder.wait_idle().await;

    let req = TestRequest::get()
        .uri(&format!("/url/analytics/{}", short_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let analytics: ShortUrlResponse = test::read_body_json(resp).await;
    assert_eq!(analytics.short_url.short_id, short_id);
    assert_eq!(analytics.short_url.id, created.short_url.id);
    assert_eq!(analytics.short_url.visit_count, 3);
    assert_eq!(analytics.short_url.visit_history.len(), 3);
}

#[actix_rt::test]
async fn test_redirect_bun_sh() {
    let ctx = test_context();
    let app = test_app!(ctx);

    let resp = test::call_service(&app, create_request("http://bun.sh").to_request()).await;
    let created: ShortUrlResponse = test::read_body_json(resp).await;

    let req = TestRequest::get()
        .uri(&format!("/url/{}", created.short_url.short_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "http://bun.sh");
}

#[actix_rt::test]
async fn test_redirect_unknown_short_id() {
    let ctx = test_context();
    let app = test_app!(ctx);

    for uri in ["/url/nothere0", "/url/bad!id", "/url/analytics/nothere0"] {
        let resp = test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "short url not found");
    }

    ctx.recorder.wait_idle().await;
    assert_eq!(ctx.store.count().await.unwrap(), 0);
}

#[actix_rt::test]
async fn test_redirect_without_short_id() {
    let ctx = test_context();
    let app = test_app!(ctx);

    let resp = test::call_service(&app, TestRequest::get().uri("/url/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_rt::test]
async fn test_unmatched_url_paths_answer_json() {
    let ctx = test_context();
    let app = test_app!(ctx);

    let resp = test::call_service(&app, TestRequest::get().uri("/url").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "short id is required");

    for req in [
        TestRequest::get().uri("/url/analytics/").to_request(),
        TestRequest::get().uri("/url/abcdEFGH/extra").to_request(),
        TestRequest::delete().uri("/url/abcdEFGH").to_request(),
    ] {
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "not found");
    }
}

#[actix_rt::test]
async fn test_analytics_does_not_count_visits() {
    let ctx = test_context();
    let app = test_app!(ctx);

    let resp = test::call_service(&app, create_request("http://example.com").to_request()).await;
    let created: ShortUrlResponse = test::read_body_json(resp).await;
    let uri = format!("/url/analytics/{}", created.short_url.short_id);

    for _ in 0..2 {
        let resp = test::call_service(&app, TestRequest::get().uri(&uri).to_request()).await;
        let analytics: ShortUrlResponse = test::read_body_json(resp).await;
        assert_eq!(analytics.short_url.visit_count, 0);
    }
}

// =============================================================================
// CORS
// =============================================================================

#[actix_rt::test]
async fn test_cors_allows_any_origin() {
    let ctx = test_context();
    let app = test_app!(ctx);

    let req = TestRequest::get()
        .uri("/check")
        .insert_header((header::ORIGIN, "https://some-frontend.example"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        resp.headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
}
