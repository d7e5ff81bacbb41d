//! Action-keyed routing between states.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::machine::error::ConfigError;

/// Reserved source id whose routes apply regardless of the current state.
pub const WILDCARD: &str = "*";

/// Routing table: which action taken from which state leads to which other
/// state, plus the state the machine begins in.
///
/// Tables are built fluently or read from the JSON configuration form, where
/// every key other than `initial_state` is a source state id (the wildcard
/// `"*"` included) mapping action names to destination ids:
///
/// ```rust
/// use curtain::machine::TransitionTable;
///
/// let table = TransitionTable::from_json(
///     r#"{
///         "initial_state": "main_menu",
///         "*": { "quit": "main_menu" },
///         "main_menu": { "new_game": "game" },
///         "game": { "game_over": "main_menu" }
///     }"#,
/// )
/// .unwrap();
///
/// assert_eq!(table.resolve("main_menu", "new_game"), Some("game"));
/// assert_eq!(table.resolve("game", "quit"), Some("main_menu"));
/// assert_eq!(table.resolve("game", "new_game"), None);
/// ```
///
/// Tables are validated against the machine's state set when the machine is
/// constructed; they do not change afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTable {
    initial_state: String,
    #[serde(flatten)]
    routes: HashMap<String, HashMap<String, String>>,
}

impl TransitionTable {
    /// Table with the given initial state and no routes yet.
    pub fn new(initial_state: impl Into<String>) -> Self {
        Self {
            initial_state: initial_state.into(),
            routes: HashMap::new(),
        }
    }

    /// Parse the JSON configuration form.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Add a route: taking `action` while `from` is current leads to `to`.
    pub fn route(
        mut self,
        from: impl Into<String>,
        action: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        self.routes
            .entry(from.into())
            .or_default()
            .insert(action.into(), to.into());
        self
    }

    /// Add a wildcard route: taking `action` from any state leads to `to`.
    ///
    /// A state's own route for the same action takes precedence.
    pub fn route_from_any(self, action: impl Into<String>, to: impl Into<String>) -> Self {
        self.route(WILDCARD, action, to)
    }

    /// Id of the state the machine enters on `start`.
    pub fn initial_state(&self) -> &str {
        &self.initial_state
    }

    /// Destination for taking `action` from `state_id`: the state's own
    /// routes first, the wildcard routes second.
    pub fn resolve(&self, state_id: &str, action: &str) -> Option<&str> {
        self.routes
            .get(state_id)
            .and_then(|actions| actions.get(action))
            .or_else(|| {
                self.routes
                    .get(WILDCARD)
                    .and_then(|actions| actions.get(action))
            })
            .map(String::as_str)
    }

    /// Every `(source, action, destination)` route in the table.
    pub(crate) fn iter_routes(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.routes.iter().flat_map(|(from, actions)| {
            actions
                .iter()
                .map(move |(action, to)| (from.as_str(), action.as_str(), to.as_str()))
        })
    }
}
