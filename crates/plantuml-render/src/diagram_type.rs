//! Markup dialects supported by the PlantUML renderer.

use serde::Deserialize;

/// Diagram markup dialect.
///
/// The dialect selects the `@start<token>`/`@end<token>` marker pair that
/// wraps the diagram source. It has no effect on how the diagram is
/// generated; the renderer detects the dialect from the markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramType {
    /// A PlantUML diagram (sequence, class, state, ...).
    #[default]
    PlantUml,
    /// A ditaa ASCII-art diagram.
    Ditaa,
    /// A GraphViz (dot) diagram.
    Dot,
    /// A JCCKit chart.
    Jcckit,
    /// A Salt wireframe.
    Salt,
    /// A mindmap diagram.
    Mindmap,
    /// A regular expression diagram.
    Regex,
    /// A Gantt chart.
    Gantt,
    /// A chronology diagram.
    Chronology,
    /// A work breakdown structure.
    Wbs,
    /// An extended Backus-Naur form diagram.
    Ebnf,
    /// A JSON data visualization.
    Json,
    /// A YAML data visualization.
    Yaml,
}

impl DiagramType {
    /// Marker token for this dialect.
    ///
    /// `plantuml` wraps with the literal `uml` token (`@startuml`); every
    /// other dialect uses its own lowercase name.
    #[must_use]
    pub fn start_token(self) -> &'static str {
        match self {
            Self::PlantUml => "uml",
            Self::Ditaa => "ditaa",
            Self::Dot => "dot",
            Self::Jcckit => "jcckit",
            Self::Salt => "salt",
            Self::Mindmap => "mindmap",
            Self::Regex => "regex",
            Self::Gantt => "gantt",
            Self::Chronology => "chronology",
            Self::Wbs => "wbs",
            Self::Ebnf => "ebnf",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_is_plantuml() {
        assert_eq!(DiagramType::default(), DiagramType::PlantUml);
    }

    #[test]
    fn test_plantuml_uses_uml_token() {
        assert_eq!(DiagramType::PlantUml.start_token(), "uml");
    }

    #[test]
    fn test_other_dialects_use_their_name() {
        let tokens = [
            (DiagramType::Ditaa, "ditaa"),
            (DiagramType::Dot, "dot"),
            (DiagramType::Jcckit, "jcckit"),
            (DiagramType::Salt, "salt"),
            (DiagramType::Mindmap, "mindmap"),
            (DiagramType::Regex, "regex"),
            (DiagramType::Gantt, "gantt"),
            (DiagramType::Chronology, "chronology"),
            (DiagramType::Wbs, "wbs"),
            (DiagramType::Ebnf, "ebnf"),
            (DiagramType::Json, "json"),
            (DiagramType::Yaml, "yaml"),
        ];
        for (diagram_type, expected) in tokens {
            assert_eq!(diagram_type.start_token(), expected);
        }
    }

    #[test]
    fn test_deserialize_lowercase_names() {
        use serde::de::IntoDeserializer;

        let parse = |name: &str| -> Result<DiagramType, serde::de::value::Error> {
            DiagramType::deserialize(name.into_deserializer())
        };

        assert_eq!(parse("gantt"), Ok(DiagramType::Gantt));
        assert_eq!(parse("plantuml"), Ok(DiagramType::PlantUml));
        assert_eq!(parse("wbs"), Ok(DiagramType::Wbs));
        assert!(parse("flowchart").is_err());
    }
}
