//! Mock image store for testing.
//!
//! Provides [`MemoryImageStore`] for unit testing without filesystem
//! access.

use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::store::{ImageStore, StoreError};

/// In-memory image store.
///
/// Stores artifacts in a shared map; clones observe the same contents.
/// Use [`failing`](Self::failing) to exercise storage-error paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryImageStore {
    images: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    fail_open: bool,
}

impl MemoryImageStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose `open` always fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_open: true,
            ..Self::default()
        }
    }

    /// Stored bytes for an artifact id, if any.
    #[must_use]
    pub fn image(&self, id: &str) -> Option<Vec<u8>> {
        self.images.lock().expect("store lock").get(id).cloned()
    }

    /// Number of stored artifacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.lock().expect("store lock").len()
    }

    /// Whether no artifact has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sink appending into the shared map.
struct MemoryWriter {
    images: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    id: String,
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.images
            .lock()
            .expect("store lock")
            .entry(self.id.clone())
            .or_default()
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl ImageStore for MemoryImageStore {
    fn open(&self, id: &str) -> Result<Box<dyn Write + Send>, StoreError> {
        if self.fail_open {
            return Err(StoreError::Open {
                id: id.to_owned(),
                source: std::io::Error::other("mock storage failure"),
            });
        }
        Ok(Box::new(MemoryWriter {
            images: Arc::clone(&self.images),
            id: id.to_owned(),
        }))
    }

    fn url(&self, id: &str) -> Result<String, StoreError> {
        Ok(format!("memory://{id}"))
    }
}
