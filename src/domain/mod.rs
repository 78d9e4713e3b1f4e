// Domain layer - Metric readings and everything derived from them
pub mod advice;
pub mod analysis;
pub mod metric;
pub mod trend;
