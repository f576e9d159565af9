//! Diagram source preparation.
//!
//! Ensures diagram text is wrapped with the `@start`/`@end` markers the
//! renderer expects and injects an optional `title` directive.

use crate::diagram_type::DiagramType;

/// Start-of-diagram marker prefix shared by all dialects.
const START_MARKER: &str = "@start";

/// Prepare diagram source for rendering.
///
/// Wraps the content with the dialect's `@start<token>`/`@end<token>` pair
/// unless it already begins with a start marker, then inserts a
/// `title <text>` line right after the start marker when `title` is
/// non-empty and the content carries no title directive of its own.
///
/// Pure string transformation; never fails.
#[must_use]
pub fn prepare_source(content: &str, diagram_type: DiagramType, title: &str) -> String {
    let token = diagram_type.start_token();

    let mut source = if content.trim_start().starts_with(START_MARKER) {
        content.to_owned()
    } else {
        format!("@start{token}\n{content}\n@end{token}")
    };

    if !title.is_empty() && !has_title_directive(&source) {
        source = insert_title(&source, title);
    }

    source
}

/// Whether any line of the source already sets a title.
fn has_title_directive(source: &str) -> bool {
    source
        .lines()
        .any(|line| line.trim_start().starts_with("title "))
}

/// Insert a `title` line at index 1, immediately after the start marker.
fn insert_title(source: &str, title: &str) -> String {
    let mut lines: Vec<&str> = source.lines().collect();
    let directive = format!("title {title}");
    let index = 1.min(lines.len());
    lines.insert(index, &directive);
    lines.join("\n")
}
