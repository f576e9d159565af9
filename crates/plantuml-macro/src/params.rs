//! Per-invocation macro parameters.

use std::hash::{Hash, Hasher};

use plantuml_render::{DiagramFormat, DiagramType};
use serde::{Deserialize, Deserializer};

/// Parameters supplied by the host for one macro occurrence.
///
/// All fields are optional; process-wide configuration provides fallbacks
/// for `server` and `format`, the diagram type defaults to `plantuml`, and
/// the title defaults to empty.
///
/// Equality and hashing cover only `(server, format)` — the fields that
/// change the generated artifact for identical content — so parameters can
/// serve as a cache discriminator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MacroParameters {
    /// Remote PlantUML server URL (e.g. `https://www.plantuml.com/plantuml`).
    pub server: Option<String>,
    /// Output format; unknown names fall back to PNG.
    #[serde(deserialize_with = "lenient_format")]
    pub format: Option<DiagramFormat>,
    /// Diagram markup dialect.
    #[serde(rename = "type")]
    pub diagram_type: Option<DiagramType>,
    /// Diagram title, injected after the start marker.
    pub title: Option<String>,
}

impl MacroParameters {
    /// Diagram dialect, defaulting to `plantuml`.
    #[must_use]
    pub fn diagram_type(&self) -> DiagramType {
        self.diagram_type.unwrap_or_default()
    }

    /// Diagram title, defaulting to empty.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}

impl PartialEq for MacroParameters {
    fn eq(&self, other: &Self) -> bool {
        self.server == other.server && self.format == other.format
    }
}

impl Eq for MacroParameters {}

impl Hash for MacroParameters {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.server.hash(state);
        self.format.hash(state);
    }
}

/// Deserialize an output format from a string, falling back to PNG for
/// unknown values instead of failing the whole parameter set.
pub(crate) fn lenient_format<'de, D>(deserializer: D) -> Result<Option<DiagramFormat>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.map(|s| DiagramFormat::from_param(&s)))
}
