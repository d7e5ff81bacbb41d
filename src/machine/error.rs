//! Construction-time configuration errors.

use thiserror::Error;

/// Fatal configuration errors detected while building a state machine.
///
/// These surface at construction so a machine never runs with a transition
/// table pointing at states that do not exist.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("initial state `{0}` is not in the state set")]
    UnknownInitialState(String),

    #[error("transition `{from}` + `{action}` targets `{to}`, which is not in the state set")]
    UnknownTargetState {
        from: String,
        action: String,
        to: String,
    },

    #[error("transition table routes from `{0}`, which is not in the state set")]
    UnknownSourceState(String),

    #[error("invalid transition table: {0}")]
    Parse(#[from] serde_json::Error),
}
