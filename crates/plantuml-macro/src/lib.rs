//! PlantUML macro for wiki content rendering.
//!
//! This crate is the macro layer gluing the host rendering pipeline to
//! [`plantuml_render`]:
//! - [`params`]: per-invocation macro parameters
//! - [`config`]: process-wide configuration fallbacks
//! - [`identity`]: content-derived artifact keys
//! - [`block`]: content blocks handed back to the host
//! - [`store`]: image storage seam (filesystem implementation included)
//! - [`router`]: output-format routing to block construction strategies
//! - [`render_host`]: seam for the host's async rendering/caching framework
//! - [`macro_exec`]: the execution boundary converting failures into
//!   user-visible error blocks
//!
//! # Example
//!
//! ```ignore
//! use plantuml_macro::{FsImageStore, MacroParameters, PlantUmlMacro, SyncRenderHost};
//! use plantuml_render::PlantUmlGenerator;
//!
//! let plantuml = PlantUmlMacro::new(
//!     config,
//!     Box::new(PlantUmlGenerator::new()),
//!     Box::new(FsImageStore::new(tmp_dir, "/tmp/plantuml")),
//!     Box::new(SyncRenderHost),
//! );
//! let block = plantuml.execute(&MacroParameters::default(), "A -> B", false, None, 0);
//! ```

mod block;
mod config;
mod error;
mod identity;
mod macro_exec;
mod mock;
mod params;
mod render_host;
mod router;
mod store;

pub use block::{ContentBlock, escape_html};
pub use config::{ConfigError, PlantUmlConfig};
pub use error::MacroError;
pub use identity::ImageId;
pub use macro_exec::PlantUmlMacro;
pub use mock::MemoryImageStore;
pub use params::MacroParameters;
pub use render_host::{RenderHost, RenderId, SyncRenderHost};
pub use router::BlockRenderer;
pub use store::{FsImageStore, ImageStore, StoreError};
