//! View model shared by the TUI and console surfaces

pub mod transcript;
