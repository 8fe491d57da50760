//! Render targets
//!
//! The render target is an external collaborator that is assumed to be
//! available for as long as anything draws into it. Submissions never fail
//! from the caller's point of view.

use super::commands::{DrawCommand, Visual};

/// Anything that accepts draw submissions
pub trait RenderTarget {
    /// Queue a draw command
    fn submit(&mut self, command: DrawCommand);
}

/// Render target that records submissions in order
///
/// Used for headless runs and to assert draw order in tests.
#[derive(Debug, Default)]
pub struct RecordingTarget {
    commands: Vec<DrawCommand>,
}

impl RecordingTarget {
    /// Create an empty recording target
    pub fn new() -> Self {
        Self::default()
    }

    /// Submitted commands in submission order
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing has been submitted
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Strings of all text submissions, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match &command.visual {
                Visual::Text { string, .. } => Some(string.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Forget everything recorded so far (call once per frame)
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl RenderTarget for RecordingTarget {
    fn submit(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}
