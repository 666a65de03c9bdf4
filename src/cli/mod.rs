pub mod command;
pub mod config;
pub mod repl;

pub use config::{Args, Config};
pub use repl::Repl;
