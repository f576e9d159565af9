//! Macro execution boundary.
//!
//! [`PlantUmlMacro`] is what the host invokes once per macro occurrence.
//! Every failure is converted into a user-visible error block here; no
//! error or panic propagates into the host pipeline.

use plantuml_render::{DiagramGenerator, PlantUmlGenerator, prepare_source};

use crate::block::ContentBlock;
use crate::config::PlantUmlConfig;
use crate::render_host::{RenderHost, RenderId};
use crate::router::BlockRenderer;
use crate::store::ImageStore;
use crate::{MacroParameters, error};

/// Fixed summary for error blocks.
const ERROR_SUMMARY: &str = "Failed to execute the PlantUML macro";

/// The PlantUML wiki macro.
///
/// Collaborators are constructor-supplied: the generator renders diagram
/// source, the store keeps image artifacts, the render host owns async
/// scheduling and caching. The macro itself holds no mutable state and is
/// safe to call concurrently.
pub struct PlantUmlMacro {
    config: PlantUmlConfig,
    renderer: BlockRenderer,
    host: Box<dyn RenderHost>,
}

impl PlantUmlMacro {
    #[must_use]
    pub fn new(
        config: PlantUmlConfig,
        generator: Box<dyn DiagramGenerator>,
        store: Box<dyn ImageStore>,
        host: Box<dyn RenderHost>,
    ) -> Self {
        Self {
            config,
            renderer: BlockRenderer::new(generator, store),
            host,
        }
    }

    /// Create a macro whose generator is built from the configuration
    /// (local executable and remote payload encoding).
    #[must_use]
    pub fn from_config(
        config: PlantUmlConfig,
        store: Box<dyn ImageStore>,
        host: Box<dyn RenderHost>,
    ) -> Self {
        let generator = PlantUmlGenerator::with_transcoder(config.encoding)
            .command(config.command());
        Self::new(config, Box::new(generator), store, host)
    }

    /// Execute the macro for one occurrence.
    ///
    /// `source_reference` and `index` identify the occurrence for the
    /// render host's cache; `inline` controls whether an image result is
    /// wrapped in a standalone group.
    pub fn execute(
        &self,
        params: &MacroParameters,
        content: &str,
        inline: bool,
        source_reference: Option<&str>,
        index: usize,
    ) -> ContentBlock {
        let id = RenderId::new(source_reference, index);
        let server_url = self.config.resolve_server(params);
        let format = self.config.resolve_format(params);
        let source = prepare_source(content, params.diagram_type(), params.title());

        self.host.execute(&id, &|| {
            match self
                .renderer
                .render_diagram(&source, server_url.as_deref(), format, params)
            {
                Ok(block @ ContentBlock::Image { .. }) if !inline => {
                    ContentBlock::Group(vec![block])
                }
                Ok(block) => block,
                Err(e) => {
                    tracing::warn!(error = %e, id = %id, "PlantUML macro execution failed");
                    ContentBlock::Error {
                        summary: ERROR_SUMMARY.to_owned(),
                        detail: format!("{e} (content [{}])", error::content_snippet(content)),
                    }
                }
            }
        })
    }
}
