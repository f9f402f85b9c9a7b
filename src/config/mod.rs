/// Database configuration and connection management
pub mod database;

/// Seed farm/warehouse configuration from config.toml
pub mod seed;

/// User role assignments from environment variables
pub mod users;
