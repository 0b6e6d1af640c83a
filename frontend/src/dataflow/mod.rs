//! Actor+Relay primitives
//!
//! - [`Relay`] carries UI and browser events into Actors.
//! - [`Actor`] owns one piece of state and is its only writer.
//!
//! Relays follow the `{source}_{event}_relay` naming pattern, and state is
//! read through signals only.

pub mod actor;
pub mod relay;

pub use actor::Actor;
pub use relay::{Relay, relay};
