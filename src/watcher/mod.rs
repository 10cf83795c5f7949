//! Watch layer - file-change notifications and debounced reloads
//!
//! The parent directory is watched rather than the file itself, so editors
//! that save by writing a temp file and renaming it still produce events.

pub mod debounce;

use std::path::{Path, PathBuf};

use chrono::Local;
use notify::event::{EventKind, ModifyKind};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::error::WatchError;
use crate::messages::{FileChange, WatchEvent};
use crate::store::{self, DocumentStore};

pub use debounce::{DebounceState, Debouncer};

pub type ChangeResult = Result<FileChange, WatchError>;

fn classify(kind: &EventKind) -> FileChange {
    match kind {
        EventKind::Create(_) => FileChange::Create,
        EventKind::Modify(ModifyKind::Metadata(_)) => FileChange::Other,
        EventKind::Modify(_) => FileChange::Write,
        _ => FileChange::Other,
    }
}

/// Start watching `path`.
///
/// The returned watcher must be kept alive for notifications to flow.
pub fn watch_file(
    path: &Path,
) -> Result<(RecommendedWatcher, mpsc::UnboundedReceiver<ChangeResult>), WatchError> {
    let path = path.canonicalize().map_err(|source| WatchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dir = path
        .parent()
        .ok_or_else(|| WatchError::NoParent(path.clone()))?
        .to_path_buf();
    let file_name = path.file_name().map(|n| n.to_os_string());

    let (tx, rx) = mpsc::unbounded_channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        let change = match res {
            Ok(event) => {
                let ours = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                if !ours {
                    return;
                }
                Ok(classify(&event.kind))
            }
            Err(e) => Err(WatchError::from(e)),
        };
        let _ = tx.send(change);
    })?;
    watcher.watch(&dir, RecursiveMode::NonRecursive)?;

    tracing::info!(path = %path.display(), "Watching file");
    Ok((watcher, rx))
}

/// Build the debounced reload: reparse, swap the store, report the outcome
pub fn reload_action(
    store: DocumentStore,
    path: PathBuf,
    watch_tx: mpsc::UnboundedSender<WatchEvent>,
) -> impl Fn() + Send + Sync + 'static {
    move || {
        let _ = watch_tx.send(WatchEvent::ReloadStarted { at: Local::now() });
        let event = match store::reload(&store, &path) {
            Ok(count) => WatchEvent::Reloaded {
                count,
                at: Local::now(),
            },
            Err(e) => {
                tracing::warn!(error = %e, "Reload failed, keeping last good document");
                WatchEvent::ReloadFailed {
                    message: e.to_string(),
                    at: Local::now(),
                }
            }
        };
        let _ = watch_tx.send(event);
    }
}

/// Feed change notifications into the debouncer until the watcher goes away
pub async fn run(
    mut changes_rx: mpsc::UnboundedReceiver<ChangeResult>,
    debouncer: Debouncer,
    watch_tx: mpsc::UnboundedSender<WatchEvent>,
) {
    while let Some(change) = changes_rx.recv().await {
        match change {
            Ok(change) if change.triggers_reload() => {
                tracing::debug!(?change, "File changed");
                debouncer.trigger();
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Watch error");
                let _ = watch_tx.send(WatchEvent::WatchFailed {
                    message: e.to_string(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::load_file;
    use notify::event::{CreateKind, DataChange, MetadataKind, RemoveKind};
    use std::fs;
    use std::time::Duration;

    #[test]
    fn test_classify_event_kinds() {
        assert_eq!(classify(&EventKind::Create(CreateKind::File)), FileChange::Create);
        assert_eq!(
            classify(&EventKind::Modify(ModifyKind::Data(DataChange::Any))),
            FileChange::Write
        );
        assert_eq!(
            classify(&EventKind::Modify(ModifyKind::Metadata(MetadataKind::Any))),
            FileChange::Other
        );
        assert_eq!(classify(&EventKind::Remove(RemoveKind::File)), FileChange::Other);
    }

    #[test]
    fn test_reload_action_reports_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.http");
        fs::write(&path, "GET /a\n").unwrap();
        let store = DocumentStore::new(load_file(&path).unwrap());
        let (tx, mut rx) = mpsc::unbounded_channel();

        fs::write(&path, "GET /a\n###\nGET /b\n").unwrap();
        reload_action(store.clone(), path, tx)();

        assert!(matches!(rx.try_recv(), Ok(WatchEvent::ReloadStarted { .. })));
        assert!(matches!(rx.try_recv(), Ok(WatchEvent::Reloaded { count: 2, .. })));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_reload_action_reports_failure_and_keeps_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.http");
        fs::write(&path, "GET /a\n").unwrap();
        let store = DocumentStore::new(load_file(&path).unwrap());
        let (tx, mut rx) = mpsc::unbounded_channel();

        fs::remove_file(&path).unwrap();
        reload_action(store.clone(), path, tx)();

        let _started = rx.try_recv().unwrap();
        match rx.try_recv() {
            Ok(WatchEvent::ReloadFailed { message, .. }) => assert!(message.contains("api.http")),
            other => panic!("expected ReloadFailed, got {:?}", other),
        }
        assert_eq!(store.get(0).unwrap().url, "/a");
    }

    #[tokio::test]
    async fn test_run_debounces_changes_and_surfaces_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.http");
        fs::write(&path, "GET /a\n").unwrap();
        let store = DocumentStore::new(load_file(&path).unwrap());

        let (watch_tx, mut watch_rx) = mpsc::unbounded_channel();
        let (changes_tx, changes_rx) = mpsc::unbounded_channel();
        let config = Config::new(&path).with_debounce(Duration::from_millis(30));
        let debouncer = Debouncer::new(
            config.debounce,
            reload_action(store.clone(), config.file.clone(), watch_tx.clone()),
        );
        tokio::spawn(run(changes_rx, debouncer, watch_tx));

        fs::write(&path, "GET /a\n###\nGET /b\n###\nGET /c\n").unwrap();
        changes_tx.send(Ok(FileChange::Write)).unwrap();
        changes_tx.send(Ok(FileChange::Other)).unwrap();
        changes_tx.send(Ok(FileChange::Create)).unwrap();
        changes_tx
            .send(Err(WatchError::NoParent(PathBuf::from("/"))))
            .unwrap();

        let mut reloads = 0;
        let mut watch_errors = 0;
        let deadline = tokio::time::Instant::now() + Duration::from_millis(300);
        while let Ok(Some(event)) = tokio::time::timeout_at(deadline, watch_rx.recv()).await {
            match event {
                WatchEvent::Reloaded { count, .. } => {
                    assert_eq!(count, 3);
                    reloads += 1;
                }
                WatchEvent::WatchFailed { .. } => watch_errors += 1,
                _ => {}
            }
        }

        assert_eq!(reloads, 1);
        assert_eq!(watch_errors, 1);
        assert_eq!(store.len(), 3);
    }
}
