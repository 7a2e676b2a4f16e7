//! Geometry resolution: configuration in, every drawable quantity out.
//!
//! [`resolve`] is pure. It reads the configuration and the text measurer and
//! returns a fresh [`ResolvedGeometry`]; nothing is cached between calls.

use glam::DVec2;

use super::defaults::BORDER_DIVISOR;
use super::shapes::{Outline, ShapePath};
use super::text::{TextLayout, TextMeasurer, fit_text};
use crate::config::{StretchStyle, TokenConfig};
use crate::log::debug;
use crate::types::{Point, Px, Rect, Scalar, Size, SizePx};

/// Border stroke: width plus the inset path it is drawn along
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    pub width: Px,
    pub path: ShapePath,
}

/// Everything the compositor needs for one render
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGeometry {
    pub canvas: SizePx,
    /// Where the background image lands. May extend past the canvas.
    pub image_placement: Rect,
    /// Mask path, always inside the canvas
    pub shape: ShapePath,
    pub border: Option<Border>,
    pub text: TextLayout,
}

/// How the background image is sized against the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSizing {
    /// Scale into the fixed canvas with a stretch policy
    Stretch(StretchStyle),
    /// Legacy: canvas height follows the image aspect ratio and the image
    /// covers the whole canvas
    AspectHeight,
}

impl ImageSizing {
    pub fn for_config(config: &TokenConfig) -> Self {
        match config.stretch_style {
            Some(style) => ImageSizing::Stretch(style),
            None => ImageSizing::AspectHeight,
        }
    }
}

/// Canvas extents for the configuration.
///
/// Only the legacy aspect mode with a loaded image changes the height;
/// otherwise this is the preset or custom size.
pub fn canvas_size(config: &TokenConfig) -> SizePx {
    let size = config.size.dimensions();
    match (ImageSizing::for_config(config), config.active_image()) {
        (ImageSizing::AspectHeight, Some(image)) => {
            let natural = image.natural_size();
            match natural.h.checked_div(natural.w) {
                Some(aspect) => Size::new(size.w, size.w * aspect),
                None => size,
            }
        }
        _ => size,
    }
}

/// Scale factor mapping `natural` onto `canvas`: the smaller axis ratio for
/// fit, the larger for fill.
pub fn image_scale(canvas: SizePx, natural: SizePx, style: StretchStyle) -> Scalar {
    let (Some(sx), Some(sy)) = (canvas.w.checked_div(natural.w), canvas.h.checked_div(natural.h)) else {
        return Scalar::ONE;
    };
    match style {
        StretchStyle::Fit => sx.min(sy),
        StretchStyle::Fill => sx.max(sy),
    }
}

/// Centered placement of an image of size `natural` on `canvas`.
///
/// Under [`StretchStyle::Fill`] the origin goes negative on the overflowing
/// axis. It is returned unclamped; the shape mask does the cropping.
pub fn image_placement(canvas: SizePx, natural: SizePx, style: StretchStyle) -> Rect {
    let scale = image_scale(canvas, natural, style);
    let scaled: DVec2 = natural.to_dvec2() * scale.raw();
    let origin = canvas.to_dvec2() / 2.0 - scaled / 2.0;
    Rect {
        origin: Point::from_dvec2(origin),
        size: Size::from_dvec2(scaled),
    }
}

/// Region the shape mask covers: the image rectangle clamped to the canvas
/// when an image is composited, otherwise the whole canvas.
pub fn shape_region(canvas: SizePx, image_placement: Option<Rect>) -> Rect {
    let bounds = Rect::from_size(canvas);
    match image_placement {
        Some(placement) => placement.intersect(&bounds),
        None => bounds,
    }
}

/// Border width relative to the canvas: `width / 20` on a square canvas,
/// the mean of both axes over 20 otherwise.
pub fn border_width(canvas: SizePx) -> Px {
    (canvas.w + canvas.h) / BORDER_DIVISOR
}

/// Border along `shape`, pulled in by half the stroke width so the stroke
/// stays inside the mask.
pub fn border(shape: &ShapePath, canvas: SizePx) -> Border {
    let width = border_width(canvas);
    Border { width, path: shape.inset(width / 2.0) }
}

/// Resolve the full geometry for one render
pub fn resolve(config: &TokenConfig, measurer: &(impl TextMeasurer + ?Sized)) -> ResolvedGeometry {
    let canvas = canvas_size(config);
    let sizing = ImageSizing::for_config(config);

    let composited = config.active_image().map(|image| match sizing {
        ImageSizing::Stretch(style) => image_placement(canvas, image.natural_size(), style),
        ImageSizing::AspectHeight => Rect::from_size(canvas),
    });
    // Without an image the formula runs against the canvas itself and
    // degenerates to the canvas rectangle.
    let placement = composited.unwrap_or_else(|| {
        image_placement(canvas, canvas, config.stretch_style.unwrap_or_default())
    });

    let region = shape_region(canvas, composited);
    let shape = ShapePath::for_shape(config.shape, region);
    let border_stroke = config.border_color.as_ref().map(|_| border(&shape, canvas));
    let text = fit_text(&config.text, region, measurer);

    debug!(
        canvas = %canvas,
        placement = %placement,
        region = %region,
        font_size = text.font_size.raw(),
        "resolved token geometry"
    );

    ResolvedGeometry {
        canvas,
        image_placement: placement,
        shape,
        border: border_stroke,
        text,
    }
}
