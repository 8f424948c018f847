//! Load a columnar data file and print a preview of it.

pub mod cli;
pub mod data;
pub mod display;
pub mod error;

pub use cli::{run, Cli};
