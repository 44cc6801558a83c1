use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::analytics::VisitRecorder;
use crate::config::StaticConfig;
use crate::services::{LinkService, RedirectService};
use crate::storage::{MappingStore, StorageFactory};

/// Everything the HTTP server needs, wired once at startup
pub struct StartupContext {
    pub store: Arc<dyn MappingStore>,
    pub recorder: Arc<VisitRecorder>,
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
}

/// 准备服务器启动的上下文
///
/// Opens the store (running migrations), starts the visit recorder and builds
/// the services on top of them. Must run inside a tokio runtime.
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let store = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;

    let count = store
        .count()
        .await
        .context("Failed to query storage backend")?;
    info!(
        "Using storage backend: {} ({} short urls)",
        store.backend_name(),
        count
    );

    let context = build_context(store, config);

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );
    Ok(context)
}

/// Wire services around an existing store
pub fn build_context(store: Arc<dyn MappingStore>, config: &StaticConfig) -> StartupContext {
    let recorder =
        VisitRecorder::with_capacity(Arc::clone(&store), config.analytics.queue_capacity);
    let link_service = Arc::new(LinkService::new(
        Arc::clone(&store),
        config.shortener.max_attempts,
    ));
    let redirect_service = Arc::new(RedirectService::new(
        Arc::clone(&store),
        Arc::clone(&recorder),
    ));

    StartupContext {
        store,
        recorder,
        link_service,
        redirect_service,
    }
}
