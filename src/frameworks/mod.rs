// Frameworks: configuration, runtime bootstrap and terminal lifecycle.

pub mod app;
pub mod config;
pub mod terminal;
