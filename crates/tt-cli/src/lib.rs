//! Library components of the `ttc` command line.

pub mod config;
pub mod logging;
