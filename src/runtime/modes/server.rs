//! Server mode
//!
//! Configures and starts the HTTP server, then drains visit recording on
//! shutdown.

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Compress, web};
use anyhow::Result;
use tracing::{info, warn};

use crate::api::configure_routes;
use crate::api::services::ApiIndexSettings;
use crate::config::StaticConfig;
use crate::runtime::lifetime;

/// CORS policy: the API is public, any origin may call it
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: &StaticConfig) -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup(config)
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {}", e);
            e
        })?;

    let link_service = web::Data::from(startup.link_service.clone());
    let redirect_service = web::Data::from(startup.redirect_service.clone());
    let index_settings = web::Data::new(ApiIndexSettings {
        base_url: config.server.base_url.clone(),
    });

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    info!("Using {} worker threads for the server", cpu_count);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors())
            .wrap(Compress::default())
            .app_data(link_service.clone())
            .app_data(redirect_service.clone())
            .app_data(index_settings.clone())
            .configure(configure_routes)
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .workers(cpu_count)
    .disable_signals();

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server.bind(&bind_address)?.run();
    let handle = server.handle();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::wait_for_signal() => {
            info!("Stopping HTTP server...");
            handle.stop(true).await;
        }
    }

    lifetime::shutdown::perform_shutdown_tasks(&startup.recorder).await;
    warn!("Graceful shutdown: all tasks completed");
    Ok(())
}
