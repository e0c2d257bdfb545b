//! Utilities shared by the Sketchroom packages.

pub mod logger;
pub mod time;
