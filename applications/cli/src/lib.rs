//! Tempo command-line player
//!
//! Library half of the `tempo` binary: configuration, terminal
//! collaborators and the command interpreter.

pub mod backend;
pub mod config;
pub mod error;
pub mod repl;

pub use error::{CliError, Result};
