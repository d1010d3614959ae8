// Library interface for talentscout-cli; the binary in main.rs drives it and
// integration tests reach the command parser through it.

pub mod app;
pub mod commands;
pub mod theme;

pub use commands::{handle_command, CommandResult};
pub use theme::Theme;
