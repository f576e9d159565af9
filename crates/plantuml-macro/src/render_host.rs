//! Seam for the host's asynchronous rendering/caching framework.
//!
//! The host owns scheduling, caching and invalidation of rendered blocks.
//! This crate treats it as an opaque capability: hand it a stable id and a
//! closure, get back a cached or freshly computed block.

use std::fmt;

use crate::block::ContentBlock;

/// Unique id for one macro occurrence, usable as a host cache key.
///
/// Components are `["rendering", "macro", "plantuml", source, index]`
/// where `source` is the escaped reference of the document containing the
/// macro and `index` is the macro's position within it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderId {
    components: Vec<String>,
}

impl RenderId {
    #[must_use]
    pub fn new(source_reference: Option<&str>, index: usize) -> Self {
        let source = source_reference.map(escape_source).unwrap_or_default();
        Self {
            components: vec![
                "rendering".to_owned(),
                "macro".to_owned(),
                "plantuml".to_owned(),
                source,
                index.to_string(),
            ],
        }
    }

    #[must_use]
    pub fn components(&self) -> &[String] {
        &self.components
    }
}

impl fmt::Display for RenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.components.join("/"))
    }
}

/// Escape a source reference so the id stays URL-path-safe.
///
/// `_` and `-` act as escape characters: they are doubled, then `\` maps
/// to `_` and `/` to `-`. The mapping is injective, so distinct sources
/// keep distinct ids.
fn escape_source(source: &str) -> String {
    source
        .replace('_', "__")
        .replace('-', "--")
        .replace('\\', "_")
        .replace('/', "-")
}

/// The host's async rendering capability.
///
/// `execute` may run the closure immediately, schedule it, or return a
/// previously cached block for the same id.
pub trait RenderHost: Send + Sync {
    fn execute(&self, id: &RenderId, render: &dyn Fn() -> ContentBlock) -> ContentBlock;
}

/// Pass-through host: renders synchronously, caches nothing.
#[derive(Debug, Default)]
pub struct SyncRenderHost;

impl RenderHost for SyncRenderHost {
    fn execute(&self, _id: &RenderId, render: &dyn Fn() -> ContentBlock) -> ContentBlock {
        render()
    }
}
