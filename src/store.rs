//! Shared document store
//!
//! Single source of truth for the current request list. Readers clone an
//! `Arc<Document>` under a shared lock; the reloader parses outside the lock
//! and takes the exclusive lock only to swap the pointer. A reader therefore
//! sees either the old document or the new one, never a mix.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::FileError;
use crate::models::{Document, Request};
use crate::parser;

#[derive(Clone, Debug, Default)]
pub struct DocumentStore {
    current: Arc<RwLock<Arc<Document>>>,
}

impl DocumentStore {
    pub fn new(document: Document) -> Self {
        DocumentStore {
            current: Arc::new(RwLock::new(Arc::new(document))),
        }
    }

    /// The document installed at the time of the call
    pub fn snapshot(&self) -> Arc<Document> {
        Arc::clone(&self.current.read())
    }

    pub fn get(&self, index: usize) -> Option<Request> {
        self.current.read().get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.current.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Install an already-built document, returning the one it replaced
    pub fn replace(&self, document: Document) -> Arc<Document> {
        let incoming = Arc::new(document);
        let mut guard = self.current.write();
        std::mem::replace(&mut *guard, incoming)
    }
}

/// Read and parse the request file
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub fn load_file(path: &Path) -> Result<Document, FileError> {
    let bytes = fs::read(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parser::parse(&String::from_utf8_lossy(&bytes)))
}

/// Reparse `path` and swap it into `store`.
///
/// On failure the store keeps its last good document.
pub fn reload(store: &DocumentStore, path: &Path) -> Result<usize, FileError> {
    let document = load_file(path)?;
    let count = document.len();
    store.replace(document);
    tracing::info!(path = %path.display(), count, "Reloaded document");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HttpMethod;
    use std::thread;

    fn document_of(n: usize, tag: &str) -> Document {
        Document::new(
            (0..n)
                .map(|i| Request::new(HttpMethod::GET, format!("/{}/{}", tag, i)))
                .collect(),
        )
    }

    #[test]
    fn test_snapshot_survives_replace() {
        let store = DocumentStore::new(document_of(2, "old"));
        let before = store.snapshot();
        store.replace(document_of(3, "new"));

        assert_eq!(before.len(), 2);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(0).unwrap().url, "/new/0");
    }

    #[test]
    fn test_readers_never_see_mixed_documents() {
        let store = DocumentStore::new(document_of(5, "a"));

        let writer = {
            let store = store.clone();
            thread::spawn(move || {
                for i in 0..500 {
                    let tag = if i % 2 == 0 { "b" } else { "a" };
                    store.replace(document_of(5, tag));
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..500 {
                        let doc = store.snapshot();
                        assert_eq!(doc.len(), 5);
                        let tag = &doc.requests()[0].url[..2];
                        assert!(doc.requests().iter().all(|r| r.url.starts_with(tag)));
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
    }

    #[test]
    fn test_reload_failure_keeps_last_good_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.http");
        fs::write(&path, "GET /one\n###\nGET /two\n").unwrap();

        let store = DocumentStore::new(load_file(&path).unwrap());
        assert_eq!(store.len(), 2);

        fs::remove_file(&path).unwrap();
        let err = reload(&store, &path).unwrap_err();
        assert!(err.to_string().contains("api.http"));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).unwrap().url, "/two");
    }

    #[test]
    fn test_load_file_accepts_non_utf8_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.http");
        fs::write(&path, b"POST http://x/\n\ncaf\xe9\n###\nGET http://x/next\n").unwrap();

        let doc = load_file(&path).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.requests()[0].body.as_deref(), Some("caf\u{FFFD}"));
        assert_eq!(doc.requests()[1].url, "http://x/next");
    }

    #[test]
    fn test_reload_installs_new_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.http");
        fs::write(&path, "GET /one\n").unwrap();
        let store = DocumentStore::new(load_file(&path).unwrap());

        fs::write(&path, "GET /one\n###\nPOST /two\n").unwrap();
        assert_eq!(reload(&store, &path).unwrap(), 2);
        assert_eq!(store.get(1).unwrap().method, HttpMethod::POST);
    }
}
