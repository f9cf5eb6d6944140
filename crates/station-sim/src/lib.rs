//! Simulation engine for STATION SAVER.
//!
//! Owns the pipe network (a hecs world), the carrying agents and the
//! session state machine, steps them once per rendered frame and produces
//! SessionSnapshots for the renderer.

pub mod alignment;
pub mod engine;
pub mod interaction;
pub mod network;
pub mod resources;
pub mod segment;
pub mod systems;
pub mod world_setup;

pub use engine::{SessionController, SimConfig};
pub use station_core as core;
