// Farm metric insight engine - readings stream, trend projection and advice rules
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
