//! File system operations module
//!
//! Provides the recursive source scan and the streamed copy primitive
//! used by the copy engine.

mod operations;
mod scanner;

pub use operations::*;
pub use scanner::*;
