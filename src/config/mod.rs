//! Configuration module for flatcopy
//!
//! Provides configuration management including CLI arguments and
//! runtime settings.

mod settings;

pub use settings::*;
