//! Hierarchical finite state machine with suspendable transitions.
//!
//! States implement the [`State`] trait; a [`StateMachine`] owns a set of
//! them plus a [`TransitionTable`] and drives each transition's `leave` and
//! `enter` routines across as many frames as they need. Machines satisfy the
//! [`State`] contract themselves, so states can be nested machines.

mod error;
mod machine;
mod state;
mod table;

pub use error::ConfigError;
pub use machine::{StateMachine, StateMachineBuilder};
pub use state::State;
pub use table::{TransitionTable, WILDCARD};
