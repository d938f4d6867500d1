pub mod options;
pub mod server;

pub use options::{OptionsCommands, OptionsSubcommands};
pub use server::{ServerCommands, ServerSubcommands};
