//! Internal constants for diagram generation.

use std::time::Duration;

/// Default HTTP timeout for remote rendering requests (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default executable name for local rendering.
pub const DEFAULT_COMMAND: &str = "plantuml";
