/// Database configuration and connection management
pub mod database;

/// Restaurant and default menu configuration from config.toml
pub mod menu;
