//! Copy timing journal module
//!
//! Records one line per completed copy: source path, worker id, elapsed
//! seconds.

mod sink;

pub use sink::*;
