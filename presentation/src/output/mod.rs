//! Console output for one-shot mode

pub mod console;
