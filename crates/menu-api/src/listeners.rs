//! Background consumers of menu item events

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::state::AppState;

/// Keeps the route table in step with newly created menu items.
pub fn spawn_route_refresher(state: AppState) -> JoinHandle<()> {
    let mut rx = state.events.subscribe();

    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    debug!("Route refresher received {}", event.name());
                    state.refresh_routes().await;
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Route refresher lagged, {} events skipped", skipped);
                    state.refresh_routes().await;
                }
                Err(RecvError::Closed) => {
                    info!("Event bus closed, route refresher stopping");
                    break;
                }
            }
        }
    })
}
