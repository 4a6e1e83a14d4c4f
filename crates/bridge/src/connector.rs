use crate::command::Command;
use partlight_highlight::{HighlightEvent, HighlightRegistry, SurfaceHost};

/// Outcome of one delivered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub command: Command,
    /// Registry events the command produced, drained from the registry.
    pub events: Vec<HighlightEvent>,
}

impl Delivery {
    /// Part names the command asked for that the registry does not know.
    pub fn unknown_parts(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|event| match event {
            HighlightEvent::UnknownPart { name } => Some(name.as_str()),
            _ => None,
        })
    }
}

/// Receiving end of the embedded UI's message channel.
///
/// Holds the registry it forwards to. Without one bound, messages are logged
/// and dropped.
#[derive(Debug, Default)]
pub struct UiConnector {
    registry: Option<HighlightRegistry>,
}

impl UiConnector {
    /// A connector with no registry bound.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: HighlightRegistry) -> Self {
        Self {
            registry: Some(registry),
        }
    }

    /// Bind a registry, returning the previously bound one.
    pub fn bind(&mut self, registry: HighlightRegistry) -> Option<HighlightRegistry> {
        self.registry.replace(registry)
    }

    pub fn unbind(&mut self) -> Option<HighlightRegistry> {
        self.registry.take()
    }

    pub fn registry(&self) -> Option<&HighlightRegistry> {
        self.registry.as_ref()
    }

    pub fn registry_mut(&mut self) -> Option<&mut HighlightRegistry> {
        self.registry.as_mut()
    }

    /// Handle one UI message. Returns the applied command and the registry
    /// events it produced, or `None` when no registry is bound.
    ///
    /// The registry's event log is drained on every delivery, so it never
    /// outgrows a single message.
    pub fn receive(&mut self, host: &mut impl SurfaceHost, message: &str) -> Option<Delivery> {
        tracing::info!(message, "message from UI");
        let registry = self.registry.as_mut()?;
        let command = Command::parse(message);
        let skipped = command.apply(registry, host);
        if !skipped.is_empty() {
            tracing::debug!(?skipped, %command, "command applied with unknown parts");
        }
        Some(Delivery {
            command,
            events: registry.drain_events(),
        })
    }
}
