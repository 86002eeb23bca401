use serde::{Deserialize, Serialize};

/// Events emitted around privileged subprocess execution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlatformEvent {
    /// A system utility is about to run
    CommandStarted { program: String, args: Vec<String> },

    /// The utility exited successfully
    CommandCompleted {
        program: String,
        exit_code: i32,
        duration_ms: u64,
    },

    /// The utility could not be spawned or exited non-zero
    CommandFailed {
        program: String,
        exit_code: Option<i32>,
        stderr: String,
    },
}
