//! # muster-client
//!
//! Live runtime state for the active mission.
//!
//! The native engine delivers its callbacks as JSON strings on its own
//! threads.  Nothing in this crate is mutated from those threads directly:
//! callbacks are converted into [`EngineEvent`]s and sent down an mpsc
//! channel to a single bridge task that owns the [`ActiveConfiguration`].
//! After each applied event the task publishes an immutable
//! `Arc<ActiveConfiguration>` snapshot through a watch channel, so readers
//! (the UI) never observe a half-applied update and never need a lock.

pub mod active_config;
pub mod bridge;
pub mod engine;
pub mod events;
pub mod group;
pub mod talker;

mod error;

pub use active_config::ActiveConfiguration;
pub use bridge::{spawn_engine_bridge, EngineBridge};
pub use engine::EngineEvent;
pub use error::{ClientError, Result};
pub use events::StateEvent;
pub use group::GroupDescriptor;
pub use talker::TalkerDescriptor;

use tracing_subscriber::{fmt, EnvFilter};

/// Install the process-wide tracing subscriber.
///
/// Honors `RUST_LOG`; defaults to debug for the muster crates and warn for
/// everything else.  Call once at startup.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("muster_client=debug,muster_store=info,muster_presence=debug,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
