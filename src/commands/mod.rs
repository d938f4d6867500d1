pub mod options;
pub mod server;
