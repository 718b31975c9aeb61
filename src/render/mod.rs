//! Render sinks.
//!
//! The engines never draw. Hosts receive snapshots through `RenderSink` and
//! turn them into whatever output they have; `text` covers terminals and logs.

pub mod text;

pub use text::{render_color_fill, render_wormy, TextRenderer};
