//! Core types and definitions for the STATION SAVER simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! commands, snapshot views, events, session configuration and constants.
//! It has no dependency on a renderer, an input runtime or an RNG.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod hud;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
