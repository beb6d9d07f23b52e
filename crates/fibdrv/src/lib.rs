//! fibdrv library: application logic for the Fibonacci device tools.

pub mod app;
pub mod client;
pub mod config;
pub mod errors;
pub mod output;
pub mod perf;
pub mod verify;
