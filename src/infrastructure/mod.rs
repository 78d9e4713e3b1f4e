// Infrastructure layer - Configuration and reading producers
pub mod config;
pub mod error;
pub mod file_source;
pub mod preview_source;
