use prunus_core::Result as CoreResult;
use tokio::task;

use crate::error::ApiResult;

/// Runs a metrics computation off the async workers; it reads the source
/// files synchronously.
pub async fn run_blocking<T, F>(compute: F) -> ApiResult<T>
where
    F: FnOnce() -> CoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let result = task::spawn_blocking(compute)
        .await
        .map_err(|e| anyhow::anyhow!("Metrics task failed: {}", e))?;
    Ok(result?)
}
