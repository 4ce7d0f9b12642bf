//! Core plumbing shared by the logger: errors, configuration, time source.

pub mod clock;
pub mod config;
pub mod errors;
