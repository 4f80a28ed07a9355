//! Core copy engine module
//!
//! Contains the shared work queue and the engine that drives the worker
//! pool over it.

mod copier;
mod queue;

pub use copier::*;
pub use queue::*;
