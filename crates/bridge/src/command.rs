use partlight_highlight::{HighlightRegistry, SurfaceHost};
use serde::{Deserialize, Serialize};

const CLEAR: &str = "Clear";
const HIGHLIGHT_PREFIX: &str = "Highlight:";

/// A parsed UI message.
///
/// Grammar, applied to the trimmed message:
/// - `Clear` or an empty message clears every part.
/// - `Highlight:<name>` highlights exactly one part.
/// - `<name>,<name>,...` highlights exactly those parts. Entries are
///   trimmed and empty entries dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Clear,
    Highlight(String),
    Select(Vec<String>),
}

impl Command {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() || text == CLEAR {
            return Self::Clear;
        }
        if let Some(name) = text.strip_prefix(HIGHLIGHT_PREFIX) {
            return Self::Highlight(name.trim().to_string());
        }
        Self::Select(
            text.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Run the command against a registry. Returns the names that were skipped as unknown.
    pub fn apply(
        &self,
        registry: &mut HighlightRegistry,
        host: &mut impl SurfaceHost,
    ) -> Vec<String> {
        match self {
            Self::Clear => {
                registry.clear_all(host);
                Vec::new()
            }
            Self::Highlight(name) => {
                registry.clear_all(host);
                if registry.set_highlighted(host, name, true) {
                    Vec::new()
                } else {
                    vec![name.clone()]
                }
            }
            Self::Select(names) => registry.set_highlighted_many(host, names.as_slice()),
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clear => write!(f, "{CLEAR}"),
            Self::Highlight(name) => write!(f, "{HIGHLIGHT_PREFIX}{name}"),
            Self::Select(names) => write!(f, "{}", names.join(",")),
        }
    }
}
