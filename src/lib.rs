//! Spotify cache cleaner plus thin wrappers around external document and
//! page converters.

pub mod cleaner;
pub mod cli;
pub mod commands;
pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod process;
pub mod render;
pub mod targets;
pub mod utils;

pub use commands::run;
