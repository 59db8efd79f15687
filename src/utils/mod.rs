//! Utility functions and helpers for the mapgate gateway.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization and secret scrubbing.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
