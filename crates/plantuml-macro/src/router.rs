//! Output-format routing.
//!
//! Maps each output format to its block construction strategy: images go
//! through the store and come back as a reference, textual formats come
//! back as raw markup. The exhaustive `match` makes an unregistered format
//! unrepresentable; unknown format *strings* already fell back to PNG at
//! parse time.

use plantuml_render::{DiagramFormat, DiagramGenerator};

use crate::block::{ContentBlock, escape_html};
use crate::error::MacroError;
use crate::identity::ImageId;
use crate::params::MacroParameters;
use crate::store::ImageStore;

/// Renders a prepared diagram into a content block.
pub struct BlockRenderer {
    generator: Box<dyn DiagramGenerator>,
    store: Box<dyn ImageStore>,
}

impl BlockRenderer {
    #[must_use]
    pub fn new(generator: Box<dyn DiagramGenerator>, store: Box<dyn ImageStore>) -> Self {
        Self { generator, store }
    }

    /// Route the prepared content to the strategy for `format`.
    pub fn render_diagram(
        &self,
        content: &str,
        server_url: Option<&str>,
        format: DiagramFormat,
        params: &MacroParameters,
    ) -> Result<ContentBlock, MacroError> {
        match format {
            DiagramFormat::Png => self.render_image_block(content, server_url, format, params),
            DiagramFormat::Svg => {
                let markup = self.render_to_string(content, server_url, format)?;
                Ok(ContentBlock::RawHtml(markup))
            }
            DiagramFormat::Txt => {
                let text = self.render_to_string(content, server_url, format)?;
                Ok(ContentBlock::RawHtml(format!(
                    "<pre>\n{}\n</pre>",
                    escape_html(&text)
                )))
            }
        }
    }

    /// Generate into the image store and return a block referencing the
    /// stored artifact.
    fn render_image_block(
        &self,
        content: &str,
        server_url: Option<&str>,
        format: DiagramFormat,
        params: &MacroParameters,
    ) -> Result<ContentBlock, MacroError> {
        let id = format!(
            "{}.{}",
            ImageId { content, params }.compute(),
            format.extension()
        );

        let mut sink = self.store.open(&id)?;
        self.generator
            .output_diagram(content, sink.as_mut(), server_url, format)
            .map_err(|e| MacroError::generate(content, e))?;
        drop(sink);

        let url = self.store.url(&id)?;
        Ok(ContentBlock::Image { url })
    }

    /// Generate into memory and decode as UTF-8 text.
    fn render_to_string(
        &self,
        content: &str,
        server_url: Option<&str>,
        format: DiagramFormat,
    ) -> Result<String, MacroError> {
        let mut buffer = Vec::new();
        self.generator
            .output_diagram(content, &mut buffer, server_url, format)
            .map_err(|e| MacroError::generate(content, e))?;
        Ok(String::from_utf8(buffer)?)
    }
}
