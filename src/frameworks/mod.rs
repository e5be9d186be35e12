// Frameworks layer: runtime bootstrap, environment config and terminal devices.

pub mod client;
pub mod config;
pub mod sound;
