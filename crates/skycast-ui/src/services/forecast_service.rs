//! Forecast backend: one spawned task per request, never cancelled.

use std::sync::Arc;

use skycast_weather::{FetchTarget, ForecastClient};
use tokio::runtime::Handle;

use super::{ServiceMessage, ServiceSender};

/// Fetch the forecast for `target` in the background.
/// Sends `FetchDone` on the channel when the request completes, in completion
/// order, so a slow earlier request can land after a newer one.
pub fn request_fetch(
    tx: &ServiceSender,
    runtime: &Handle,
    client: Arc<ForecastClient>,
    request_id: u64,
    target: FetchTarget,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        tracing::debug!(request_id, "Fetching forecast for {}", target.name);
        let result = client.fetch(&target.lat, &target.lon).await;
        if tx
            .send(ServiceMessage::FetchDone {
                request_id,
                target,
                result,
            })
            .is_err()
        {
            tracing::debug!(request_id, "Forecast result dropped; view-model is gone");
        }
    });
}
