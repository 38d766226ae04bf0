//! Worker thread that runs deliveries off the UI thread.

pub mod commands;
pub mod runtime;
