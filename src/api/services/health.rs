use actix_web::{HttpResponse, Responder, web};
use tracing::trace;

use super::types::MessageResponse;

/// Liveness endpoint
pub struct HealthService;

impl HealthService {
    pub async fn health_check() -> impl Responder {
        trace!("Received health check request");
        HttpResponse::Ok().json(MessageResponse {
            message: "api is healthy".to_string(),
        })
    }
}

/// Health 路由配置
pub fn health_routes() -> actix_web::Resource {
    web::resource("/check").route(web::get().to(HealthService::health_check))
}
