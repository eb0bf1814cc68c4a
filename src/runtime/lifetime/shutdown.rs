use tokio::signal;
use tracing::{error, warn};

use crate::storage::StorageContext;

pub async fn listen_for_shutdown() {
    // 等待 Ctrl+C 信号
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    warn!("Shutdown signal received, initiating graceful shutdown...");
}

/// 服务器停止后释放存储连接
pub async fn release_resources(storage: &StorageContext) {
    match storage.close().await {
        Ok(()) => warn!("Storage connections closed"),
        Err(e) => error!("Failed to close storage cleanly: {}", e),
    }
}
