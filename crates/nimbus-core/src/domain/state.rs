//! Task state machine as observed by the client.

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a remote task.
///
/// State transitions (driven entirely by the remote system):
/// - New -> Running -> Finished
/// - New -> Error
/// - Running -> Error
///
/// The client only observes these; it never causes a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    /// Accepted, not started yet.
    New,

    /// In progress on the remote side.
    Running,

    /// Successfully completed.
    Finished,

    /// Failed permanently.
    Error,
}

impl TaskState {
    /// Is this a terminal state (no further transitions)?
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Finished | TaskState::Error)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskState::New => "NEW",
            TaskState::Running => "RUNNING",
            TaskState::Finished => "FINISHED",
            TaskState::Error => "ERROR",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
