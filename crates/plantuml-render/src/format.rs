//! Output formats for rendered diagrams.

/// Output format for a rendered diagram.
///
/// Each format carries the CLI flag used for local rendering and the URL
/// path segment used for remote server rendering. The complete remote URL
/// has the form `{server}/{segment}/{encoded}`. Parameter values are
/// resolved through [`DiagramFormat::from_param`], which falls back to
/// PNG for unknown names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DiagramFormat {
    /// Scalable vector graphics, embedded as raw markup.
    Svg,
    /// Portable network graphics image (default).
    #[default]
    Png,
    /// ASCII-art text output.
    Txt,
}

impl DiagramFormat {
    /// Parse a format name, case-insensitively.
    #[must_use]
    pub fn parse(format: &str) -> Option<Self> {
        match format.to_ascii_lowercase().as_str() {
            "svg" => Some(Self::Svg),
            "png" => Some(Self::Png),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }

    /// Resolve an output format from a parameter value.
    ///
    /// Unknown values fall back to [`DiagramFormat::Png`].
    #[must_use]
    pub fn from_param(format: &str) -> Self {
        Self::parse(format).unwrap_or_default()
    }

    /// URL path segment for remote server rendering.
    #[must_use]
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Txt => "txt",
        }
    }

    /// CLI flag selecting this format when rendering locally.
    #[must_use]
    pub fn local_flag(self) -> &'static str {
        match self {
            Self::Svg => "-tsvg",
            Self::Png => "-tpng",
            Self::Txt => "-ttxt",
        }
    }

    /// Filename extension for stored artifacts.
    #[must_use]
    pub fn extension(self) -> &'static str {
        self.path_segment()
    }

    /// Whether generator output for this format is UTF-8 text.
    #[must_use]
    pub fn is_textual(self) -> bool {
        matches!(self, Self::Svg | Self::Txt)
    }
}
