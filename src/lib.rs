// Library root: re-exports all modules so integration tests and the binary
// can reach the crate's public API.

pub mod binding;
pub mod chart;
pub mod config;
pub mod loader;
pub mod pitcher;
pub mod projection;
pub mod protocol;
pub mod record;
pub mod selection;
pub mod store;
pub mod surface;
pub mod tui;
