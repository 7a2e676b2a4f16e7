//! Token rendering
//!
//! This module is organized into submodules:
//! - `defaults`: Fixed sizes and settings
//! - `geometry`: Canvas sizing, image placement, shape region and border
//! - `shapes`: Mask paths (rectangle, ellipse)
//! - `text`: Text measurement and auto-fit layout
//! - `surface`: The drawing surface trait and the recording surface
//!
//! Rendering is two passes. [`geometry::resolve`] computes every quantity up
//! front; [`compose`] then walks a fixed paint order against the surface:
//! extents, clear, shape fill, image composite, border, text.

pub mod defaults;
pub mod geometry;
pub mod shapes;
pub mod surface;
pub mod text;

pub use geometry::{Border, ResolvedGeometry, resolve};
pub use shapes::{EllipsePath, Outline, RectPath, ShapePath};
pub use surface::{DrawOp, RecordingSurface, Surface, dump_ops};
pub use text::{ProportionalMetrics, TextLayout, TextLine, TextMeasurer};

use crate::config::{Background, TokenConfig, TokenOptions};
use crate::errors::TokenError;
use crate::log::{debug, warn};
use crate::types::{Color, Rect};

/// Fill color for the shape mask.
///
/// Image backgrounds get a neutral placeholder: it shows through wherever
/// the image doesn't reach, and it is the whole fill while the image is
/// missing.
pub fn background_fill(config: &TokenConfig) -> Color {
    match config.background {
        Background::Builtin(builtin) => builtin.color(),
        Background::Custom => config.custom_color.clone(),
        Background::Image => Color::named(defaults::PLACEHOLDER_FILL),
    }
}

/// Paint `geometry` onto `surface`. Every call is a full repaint.
pub fn compose<S: Surface + ?Sized>(config: &TokenConfig, geometry: &ResolvedGeometry, surface: &mut S) {
    surface.set_extents(geometry.canvas);
    surface.clear(Rect::from_size(geometry.canvas));

    surface.fill_shape(&geometry.shape, &background_fill(config));

    match config.active_image() {
        // The mask is painted already, so source-in keeps the image inside it
        Some(image) => surface.composite_image(image.handle, geometry.image_placement, true),
        None if config.background == Background::Image => {
            warn!("image background selected but no decoded image is available; using placeholder fill");
        }
        None => {}
    }

    if let (Some(border), Some(color)) = (&geometry.border, &config.border_color) {
        surface.stroke_shape(&border.path, color, border.width);
    }

    let outline = config.stroke.then(|| config.text_color.contrasting());
    for line in &geometry.text.lines {
        surface.fill_text(&line.text, line.position, &config.text_color, geometry.text.font_size);
        if let Some(outline) = &outline {
            surface.stroke_text(
                &line.text,
                line.position,
                outline,
                defaults::TEXT_OUTLINE_WIDTH,
                geometry.text.font_size,
            );
        }
    }
}

/// Resolve and paint a configuration, measuring text with the surface itself.
/// Returns the geometry that was drawn.
pub fn render<S: Surface + ?Sized>(config: &TokenConfig, surface: &mut S) -> ResolvedGeometry {
    let geometry = resolve(config, &*surface);
    compose(config, &geometry, surface);
    debug!(shape = %config.shape, lines = geometry.text.lines.len(), "rendered token");
    geometry
}

/// Validate form options and render them. An invalid option aborts before
/// the surface is touched.
pub fn render_options<S: Surface + ?Sized>(
    options: &TokenOptions,
    surface: &mut S,
) -> Result<ResolvedGeometry, TokenError> {
    let config = TokenConfig::try_from(options)?;
    Ok(render(&config, surface))
}
