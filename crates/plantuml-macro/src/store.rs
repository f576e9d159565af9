//! Image storage seam.
//!
//! The host owns the real storage location and URL scheme; this crate only
//! needs a writable sink per artifact id and a resolvable URL for it.

use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

/// Storage failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to open storage for [{id}]: {source}")]
    Open {
        id: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no URL available for [{id}]: {reason}")]
    Url { id: String, reason: String },
}

/// Storage collaborator for generated images.
///
/// Sinks are acquired per call and released when dropped; implementations
/// must be safe to use from concurrent independent invocations.
pub trait ImageStore: Send + Sync {
    /// Open a writable sink for the artifact with the given id.
    fn open(&self, id: &str) -> Result<Box<dyn Write + Send>, StoreError>;

    /// URL under which the stored artifact is reachable.
    fn url(&self, id: &str) -> Result<String, StoreError>;
}

/// Filesystem-backed image store.
///
/// Artifacts are written to `{root}/{id}` and served from
/// `{base_url}/{id}`.
#[derive(Debug)]
pub struct FsImageStore {
    root: PathBuf,
    base_url: String,
}

impl FsImageStore {
    #[must_use]
    pub fn new(root: PathBuf, base_url: impl Into<String>) -> Self {
        Self {
            root,
            base_url: base_url.into(),
        }
    }
}

impl ImageStore for FsImageStore {
    fn open(&self, id: &str) -> Result<Box<dyn Write + Send>, StoreError> {
        let open_error = |source| StoreError::Open {
            id: id.to_owned(),
            source,
        };
        fs::create_dir_all(&self.root).map_err(open_error)?;
        let file = File::create(self.root.join(id)).map_err(open_error)?;
        Ok(Box::new(file))
    }

    fn url(&self, id: &str) -> Result<String, StoreError> {
        let base = self.base_url.trim_end_matches('/');
        Ok(format!("{base}/{id}"))
    }
}
