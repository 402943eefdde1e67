//! Display configuration value objects.

pub mod render_format;

pub use render_format::RenderFormat;
