mod config_cmd;
mod roster;

pub use config_cmd::ConfigCommand;
pub use roster::{AddCommand, ListCommand, RemoveCommand, StatusCommand};
