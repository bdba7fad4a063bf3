//! Location backend.

use std::sync::Arc;

use skycast_weather::{get_current_location, LocationSource};
use tokio::runtime::Handle;

use super::{ServiceMessage, ServiceSender};

/// Look up the current position in the background and send `LocateDone`.
pub fn request_locate(tx: &ServiceSender, runtime: &Handle, source: Arc<LocationSource>) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = get_current_location(&source).await;
        match &result {
            Ok(coords) => tracing::info!("Got location: {}, {}", coords.latitude, coords.longitude),
            Err(e) => tracing::warn!("Location lookup failed: {}", e),
        }
        let _ = tx.send(ServiceMessage::LocateDone(result));
    });
}
