//! Filesystem watcher using `notify-debouncer-full` with crossbeam channels.

use crossbeam_channel::{self, Receiver, Sender};
use notify::event::{ModifyKind, RenameMode};
use notify::{EventKind, RecommendedWatcher, RecursiveMode};
use notify_debouncer_full::{new_debouncer, DebounceEventResult, Debouncer, RecommendedCache};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::paths::relative_to;
use crate::sync::TreeEvent;

/// Events emitted by the filesystem watcher.
#[derive(Debug)]
pub enum WatchEvent {
    /// Tree changes in the order they were observed.
    Changed(Vec<TreeEvent>),
    /// The watched root directory was deleted.
    RootDeleted,
    /// A watcher error occurred.
    Error(String),
}

/// Translate a raw notify event into a root-relative tree event.
///
/// Content and metadata modifications carry no structural change and map to `None`.
pub fn translate(root: &Path, event: &notify::Event) -> Option<TreeEvent> {
    let first = event.paths.first()?;
    match event.kind {
        EventKind::Create(_) | EventKind::Modify(ModifyKind::Name(RenameMode::To)) => {
            relative_to(root, first).map(TreeEvent::create)
        }
        EventKind::Remove(_) | EventKind::Modify(ModifyKind::Name(RenameMode::From)) => {
            relative_to(root, first).map(TreeEvent::delete)
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
            let from = relative_to(root, first);
            let to = event.paths.get(1).and_then(|p| relative_to(root, p));
            match (from, to) {
                (Some(from), Some(to)) => Some(TreeEvent::rename(from, to)),
                // Moved in from outside the root, or out of it.
                (None, Some(to)) => Some(TreeEvent::create(to)),
                (Some(from), None) => Some(TreeEvent::delete(from)),
                (None, None) => None,
            }
        }
        EventKind::Modify(ModifyKind::Name(_)) => {
            let rel = relative_to(root, first)?;
            if first.exists() {
                Some(TreeEvent::create(rel))
            } else {
                Some(TreeEvent::delete(rel))
            }
        }
        _ => None,
    }
}

/// Start watching a directory. Returns the debouncer (must be kept alive!) and a receiver.
pub fn start_watcher(
    path: &Path,
    debounce_ms: u64,
) -> Result<(Debouncer<RecommendedWatcher, RecommendedCache>, Receiver<WatchEvent>), String> {
    // Verify path exists before attempting to watch
    if !path.exists() {
        return Err(format!("Path does not exist: {}", path.display()));
    }

    let (tx, rx): (Sender<WatchEvent>, Receiver<WatchEvent>) = crossbeam_channel::unbounded();
    let root_path: PathBuf = path.to_path_buf();

    let mut debouncer = new_debouncer(
        Duration::from_millis(debounce_ms),
        None,
        move |result: DebounceEventResult| match result {
            Ok(events) => {
                // Check if root path still exists
                if std::fs::metadata(&root_path).is_err() {
                    let _ = tx.send(WatchEvent::RootDeleted);
                    return;
                }
                let mut changes: Vec<TreeEvent> = events
                    .iter()
                    .filter_map(|e| translate(&root_path, &e.event))
                    .collect();
                changes.dedup();
                if !changes.is_empty() {
                    let _ = tx.send(WatchEvent::Changed(changes));
                }
            }
            Err(errors) => {
                for error in errors {
                    let _ = tx.send(WatchEvent::Error(format!("{}", error)));
                }
            }
        },
    )
    .map_err(|e| format!("Failed to create debouncer: {}", e))?;

    debouncer
        .watch(path, RecursiveMode::Recursive)
        .map_err(|e| format!("Failed to watch path {}: {}", path.display(), e))?;

    Ok((debouncer, rx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange, RemoveKind};
    use notify::Event;

    fn root() -> PathBuf {
        PathBuf::from("/vault")
    }

    #[test]
    fn create_maps_to_relative_create() {
        let event = Event::new(EventKind::Create(CreateKind::File)).add_path(root().join("A/x.md"));
        assert_eq!(translate(&root(), &event), Some(TreeEvent::create("A/x.md")));
    }

    #[test]
    fn remove_maps_to_delete() {
        let event = Event::new(EventKind::Remove(RemoveKind::Folder)).add_path(root().join("B"));
        assert_eq!(translate(&root(), &event), Some(TreeEvent::delete("B")));
    }

    #[test]
    fn paired_rename_keeps_both_paths() {
        let event = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::Both)))
            .add_path(root().join("A"))
            .add_path(root().join("A2"));
        assert_eq!(translate(&root(), &event), Some(TreeEvent::rename("A", "A2")));
    }

    #[test]
    fn rename_into_root_is_a_create() {
        let event = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::Both)))
            .add_path(PathBuf::from("/elsewhere/n.md"))
            .add_path(root().join("n.md"));
        assert_eq!(translate(&root(), &event), Some(TreeEvent::create("n.md")));
    }

    #[test]
    fn half_renames_map_to_delete_and_create() {
        let from = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::From)))
            .add_path(root().join("old.md"));
        let to = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::To)))
            .add_path(root().join("new.md"));
        assert_eq!(translate(&root(), &from), Some(TreeEvent::delete("old.md")));
        assert_eq!(translate(&root(), &to), Some(TreeEvent::create("new.md")));
    }

    #[test]
    fn content_changes_are_ignored() {
        let event = Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Content)))
            .add_path(root().join("a.md"));
        assert_eq!(translate(&root(), &event), None);
    }

    #[test]
    fn events_on_the_root_itself_are_ignored() {
        let event = Event::new(EventKind::Create(CreateKind::Folder)).add_path(root());
        assert_eq!(translate(&root(), &event), None);
    }
}
