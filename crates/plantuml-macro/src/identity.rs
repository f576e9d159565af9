//! Content-derived artifact identity.
//!
//! Identical `(content, parameters)` pairs map to the same key so the
//! host's caching scheme reuses previously generated output. There is no
//! collision resolution; a hash coincidence is an accepted risk.

use plantuml_render::DiagramFormat;
use sha2::{Digest, Sha256};

use crate::params::MacroParameters;

/// Storage key inputs for one generated artifact.
#[derive(Debug, Clone, Copy)]
pub struct ImageId<'a> {
    /// Prepared diagram source.
    pub content: &'a str,
    /// Macro parameters (only the cache-discriminating fields matter).
    pub params: &'a MacroParameters,
}

impl ImageId<'_> {
    /// Compute the artifact key: a content hash concatenated with a
    /// parameter hash, each a 12-character hex SHA-256 prefix.
    #[must_use]
    pub fn compute(&self) -> String {
        let content_hash = short_hash(self.content.as_bytes());
        let params_hash = short_hash(self.discriminator().as_bytes());
        format!("{content_hash}{params_hash}")
    }

    /// Canonical serialization of the cache-discriminating parameters.
    fn discriminator(&self) -> String {
        let server = self.params.server.as_deref().unwrap_or("");
        let format = self
            .params
            .format
            .map(DiagramFormat::path_segment)
            .unwrap_or("");
        format!("{server}|{format}")
    }
}

/// Hex prefix (6 bytes, 12 characters) of a SHA-256 digest.
fn short_hash(data: &[u8]) -> String {
    hex::encode(&Sha256::digest(data)[..6])
}
