//! Mermaid diagram rendering via Kroki.
//!
//! - [`KrokiClient`] posts Mermaid source to a Kroki server and returns SVG text
//! - [`Renderer`] is the seam conversion code renders through
//! - [`svg`] adjusts the returned SVG for display on any page background

mod client;
mod consts;
pub mod svg;

pub use client::{KrokiClient, RenderError, Renderer};
pub use consts::DEFAULT_TIMEOUT;
