//! Command implementations

mod config_cmd;
mod history;
mod verify;

pub use config_cmd::config;
pub use history::history;
pub use verify::verify;
