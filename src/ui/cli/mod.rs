// Fri Jan 16 2026 - Alex

pub mod args;
pub mod handler;

pub use args::{Args, Command, EvalArgs, RunArgs};
pub use handler::CommandHandler;
