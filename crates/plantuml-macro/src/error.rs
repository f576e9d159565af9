//! Macro-level error type.

use plantuml_render::GenerateError;

use crate::store::StoreError;

/// Maximum length of the content snippet embedded in error messages.
const SNIPPET_LEN: usize = 80;

/// Failure while executing the macro for one invocation.
///
/// These never escape the macro boundary; [`crate::PlantUmlMacro`]
/// converts them into error blocks.
#[derive(Debug, thiserror::Error)]
pub enum MacroError {
    #[error("failed to generate a diagram using PlantUML for content [{snippet}]: {source}")]
    Generate {
        snippet: String,
        #[source]
        source: GenerateError,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("diagram output is not valid UTF-8: {0}")]
    NonUtf8Output(#[from] std::string::FromUtf8Error),
}

impl MacroError {
    /// Wrap a generation failure with a snippet of the offending content.
    pub(crate) fn generate(content: &str, source: GenerateError) -> Self {
        Self::Generate {
            snippet: content_snippet(content),
            source,
        }
    }
}

/// First line of the content, truncated for error messages.
pub(crate) fn content_snippet(content: &str) -> String {
    let first_line = content.lines().next().unwrap_or("");
    let mut snippet: String = first_line.chars().take(SNIPPET_LEN).collect();
    if snippet.len() < first_line.len() {
        snippet.push('\u{2026}');
    }
    snippet
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_snippet_is_first_line() {
        assert_eq!(
            content_snippet("@startuml\nA -> B\n@enduml"),
            "@startuml"
        );
    }

    #[test]
    fn test_snippet_truncates_long_lines() {
        let long = "x".repeat(200);
        let snippet = content_snippet(&long);
        assert_eq!(snippet.chars().count(), SNIPPET_LEN + 1);
        assert!(snippet.ends_with('\u{2026}'));
    }

    #[test]
    fn test_generate_error_names_content() {
        let error = MacroError::generate(
            "@startuml\nA -> B",
            plantuml_render::GenerateError::Status {
                url: "http://localhost/png/abcd".to_owned(),
                status: 500,
            },
        );
        let message = error.to_string();
        assert!(message.contains("@startuml"));
        assert!(message.contains("500"));
    }
}
