//! Main event loop: feeds watcher events to the synchronizer one at a time.

use crossbeam_channel::{select, Receiver};
use tracing::{debug, error, info, warn};

use crate::store::Store;
use crate::sync::{Synchronizer, TreeEvent};
use crate::watcher::WatchEvent;

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Shutdown,
    RootDeleted,
    /// The watcher side of the channel went away.
    Disconnected,
}

/// Run every event of a batch through the synchronizer, in order.
///
/// A failed cycle is logged and does not stop later events in the batch.
/// Returns how many events triggered a cycle.
pub fn process_batch<S: Store>(sync: &mut Synchronizer<S>, events: &[TreeEvent]) -> usize {
    let mut cycles = 0;
    for event in events {
        match sync.on_tree_change(event) {
            Ok(true) => cycles += 1,
            Ok(false) => {}
            Err(e) => error!(path = %event.path, error = %e, "synchronization aborted"),
        }
    }
    cycles
}

/// Run the synchronization loop. Blocks until shutdown or the root disappears.
pub fn run<S: Store>(
    sync: &mut Synchronizer<S>,
    fs_rx: Receiver<WatchEvent>,
    shutdown_rx: Receiver<()>,
) -> LoopExit {
    loop {
        select! {
            recv(fs_rx) -> msg => {
                match msg {
                    Ok(WatchEvent::Changed(events)) => {
                        let cycles = process_batch(sync, &events);
                        debug!(events = events.len(), cycles, "batch processed");
                    }
                    Ok(WatchEvent::RootDeleted) => {
                        error!("watched directory was deleted");
                        return LoopExit::RootDeleted;
                    }
                    Ok(WatchEvent::Error(e)) => {
                        warn!(error = %e, "watcher error");
                    }
                    Err(_) => {
                        // Channel closed, watcher thread died
                        return LoopExit::Disconnected;
                    }
                }
            }
            recv(shutdown_rx) -> _ => {
                info!("shutting down");
                return LoopExit::Shutdown;
            }
        }
    }
}
