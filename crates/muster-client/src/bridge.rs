//! The engine bridge task.
//!
//! Single writer, many readers: the task spawned here is the only code that
//! ever mutates an [`ActiveConfiguration`].  Engine callbacks are fed in as
//! [`EngineEvent`]s over an mpsc channel; after each applied event the task
//! publishes a fresh `Arc<ActiveConfiguration>` through a watch channel and
//! a coarse [`StateEvent`] for the UI.  Readers clone the `Arc` and render
//! against an immutable snapshot — no locks, no torn reads.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

use crate::active_config::ActiveConfiguration;
use crate::engine::EngineEvent;
use crate::events::StateEvent;

/// Channel depth for inbound engine events.  The engine callback shim blocks
/// (briefly) when the bridge falls this far behind.
const EVENT_QUEUE_DEPTH: usize = 256;
const STATE_QUEUE_DEPTH: usize = 256;

/// Handles returned by [`spawn_engine_bridge`].
pub struct EngineBridge {
    /// Feed engine callbacks here.  Dropping all senders stops the task.
    pub event_tx: mpsc::Sender<EngineEvent>,
    /// Latest immutable snapshot of the active configuration.
    pub snapshot_rx: watch::Receiver<Arc<ActiveConfiguration>>,
    /// Coarse change notifications for the UI.
    pub state_rx: mpsc::Receiver<StateEvent>,
}

/// Spawn the bridge task around an activated configuration.
pub fn spawn_engine_bridge(initial: ActiveConfiguration) -> EngineBridge {
    let (event_tx, mut event_rx) = mpsc::channel::<EngineEvent>(EVENT_QUEUE_DEPTH);
    let (state_tx, state_rx) = mpsc::channel::<StateEvent>(STATE_QUEUE_DEPTH);
    let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(initial.clone()));

    tokio::spawn(async move {
        let mut config = initial;
        info!(mission = %config.mission.id, "engine bridge started");

        while let Some(event) = event_rx.recv().await {
            match config.apply(event) {
                Ok(Some(state_event)) => {
                    // Snapshot first so a UI woken by the state event
                    // already sees the new state.
                    let _ = snapshot_tx.send(Arc::new(config.clone()));
                    if state_tx.send(state_event).await.is_err() {
                        // UI is gone; keep applying so snapshots stay fresh
                        // for any remaining watcher.
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    // Last-known-good policy: the event is dropped, the
                    // previous state stays visible.
                    warn!(error = %e, "engine event rejected");
                }
            }
        }

        info!(mission = %config.mission.id, "engine bridge stopped");
    });

    EngineBridge {
        event_tx,
        snapshot_rx,
        state_rx,
    }
}
