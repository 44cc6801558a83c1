//! HTTP API
//!
//! actix-web handlers and route tables. Handlers only translate between HTTP
//! and the service layer.

pub mod services;

use actix_web::web;

pub use services::{health_routes, index_routes, url_routes};

/// Register every public route on an `App`
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_routes())
        .service(url_routes())
        .service(index_routes());
}
