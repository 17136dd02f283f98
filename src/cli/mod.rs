//! Command-line interface module.

mod args;
pub mod publish;
pub mod serve;

pub use args::{Cli, Commands};
