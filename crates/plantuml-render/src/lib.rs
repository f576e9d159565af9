//! PlantUML diagram generation.
//!
//! This crate turns textual diagram descriptions into rendered output,
//! either by piping the source through a local `plantuml` executable or by
//! calling a remote PlantUML server over HTTP:
//! - [`format`]: output format definitions (`DiagramFormat`)
//! - [`diagram_type`]: markup dialects wrapped by `@start`/`@end` markers
//! - [`source`]: diagram source wrapping and title injection
//! - [`transcoder`]: URL payload encoding for the remote server
//! - [`generator`]: local/remote generator dispatch
//!
//! # Example
//!
//! ```ignore
//! use plantuml_render::{DiagramFormat, DiagramGenerator, PlantUmlGenerator};
//!
//! let generator = PlantUmlGenerator::new();
//! let mut png = Vec::new();
//! generator.output_diagram(
//!     "@startuml\nA -> B\n@enduml",
//!     &mut png,
//!     Some("https://www.plantuml.com/plantuml"),
//!     DiagramFormat::Png,
//! )?;
//! ```

mod consts;
mod diagram_type;
mod format;
mod generator;
mod source;
mod transcoder;

pub use consts::{DEFAULT_COMMAND, DEFAULT_TIMEOUT};
pub use diagram_type::DiagramType;
pub use format::DiagramFormat;
pub use generator::{DiagramGenerator, GenerateError, PlantUmlGenerator, create_agent};
pub use source::prepare_source;
pub use transcoder::{TranscodeError, Transcoder};
