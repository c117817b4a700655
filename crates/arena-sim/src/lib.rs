//! Headless simulation engine for the tank arena game.
//!
//! `MatchEngine` consumes queued commands (fire requests, contact
//! reports from the physics layer, pickup collection), advances a fixed
//! tick, and emits complete `MatchSnapshot`s for the frontend.

pub mod engine;
pub mod match_state;
pub mod systems;
pub mod world_setup;

#[cfg(test)]
mod tests;
