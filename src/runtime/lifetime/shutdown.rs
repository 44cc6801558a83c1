use std::time::Duration;

use tokio::signal;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::analytics::VisitRecorder;

/// 单个任务超时时间（秒）
const TASK_TIMEOUT_SECS: u64 = 10;

/// Resolve once Ctrl+C is received
pub async fn wait_for_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!(
            "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
            e
        ),
    }
}

/// Write out queued visits before the process exits
pub async fn perform_shutdown_tasks(recorder: &VisitRecorder) {
    let pending = recorder.pending();
    if pending > 0 {
        info!("Flushing {} pending visits...", pending);
    }

    match timeout(Duration::from_secs(TASK_TIMEOUT_SECS), recorder.shutdown()).await {
        Ok(()) => info!("VisitRecorder drained successfully"),
        Err(_) => error!(
            "VisitRecorder drain timed out after {} seconds, {} visits lost",
            TASK_TIMEOUT_SECS,
            recorder.pending()
        ),
    }
}
