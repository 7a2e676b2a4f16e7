//! Layout and compositing core for tabletop tokens.
//!
//! A token is a small square or round image: a background (flat color or a
//! user image), an optional border, and a caption auto-fitted to the shape.
//! Pixels belong to the host; this crate computes geometry and drives a
//! [`Surface`](render::Surface) through a fixed paint order.

pub mod config;
pub mod errors;
pub mod loader;
pub mod log;
pub mod render;
pub mod types;

pub use config::{
    Background, BackgroundImage, BuiltinColor, ImageHandle, Shape, SizePreset, StretchStyle, TokenConfig,
    TokenOptions, TokenSize,
};
pub use errors::TokenError;
pub use loader::{ImageLoader, attach_image};
pub use render::{DrawOp, RecordingSurface, ResolvedGeometry, Surface, dump_ops, render, render_options};
pub use types::Color;

/// Render form options into a display list.
///
/// Text is measured with [`render::ProportionalMetrics`], so the output is
/// the same on every machine.
pub fn render_token(options: &TokenOptions) -> Result<Vec<DrawOp>, miette::Report> {
    let mut surface = RecordingSurface::new();
    render_options(options, &mut surface)?;
    Ok(surface.into_ops())
}
