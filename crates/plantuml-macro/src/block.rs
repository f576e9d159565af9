//! Content blocks returned to the host rendering pipeline.

/// A block of rendered content the host knows how to embed.
///
/// Tagged-union replacement for the host's block tree: the macro only ever
/// produces these four shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    /// Reference to a stored image artifact.
    Image {
        /// Resolvable URL of the stored image.
        url: String,
    },
    /// Raw embeddable markup (inline SVG or a preformatted text block).
    RawHtml(String),
    /// Standalone wrapper; an IMG is an inline element otherwise.
    Group(Vec<ContentBlock>),
    /// User-visible rendering failure shown in place of the diagram.
    Error {
        /// Short, stable description of what failed.
        summary: String,
        /// Failure detail including the originating content snippet.
        detail: String,
    },
}

impl ContentBlock {
    /// Whether this block reports a failure.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// Escape the HTML-significant characters `&`, `<` and `>`.
#[must_use]
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
