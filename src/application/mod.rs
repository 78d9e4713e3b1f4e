// Application layer - Snapshot stream and the use cases built on it
pub mod insight_service;
pub mod metrics_source;
pub mod metrics_stream;
