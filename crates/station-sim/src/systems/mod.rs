//! Per-frame systems of the session.
//!
//! Systems are functions over the network and session state passed in by
//! reference. They do not own state.

pub mod failure_scheduler;
pub mod oxygen;
pub mod snapshot;
