// Presentation layer - Terminal rendering of the analysis screen
pub mod terminal;
