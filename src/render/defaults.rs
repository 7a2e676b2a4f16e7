//! Fixed sizes and settings (all in canvas pixels)

use crate::types::Px;

/// Upper bound for either canvas axis
pub const MAX_DIMENSION: u32 = 384;
/// Reference font size text is measured at before fitting
pub const BASE_FONT_SIZE: Px = Px(30.0);
/// Line pitch as a multiple of the font size
pub const LINE_HEIGHT: f64 = 1.5;
/// Reference typeface handed to the text measurer
pub const TYPEFACE: &str = "Arial";
/// Border width is `(width + height) / BORDER_DIVISOR`
pub const BORDER_DIVISOR: f64 = 40.0;
/// Outline width for stroked text, independent of the fitted size
pub const TEXT_OUTLINE_WIDTH: Px = Px(1.0);
/// Fill under an image background, and the whole fill when no image is loaded
pub const PLACEHOLDER_FILL: &str = "lightgray";
/// Initial custom background color
pub const CUSTOM_COLOR: &str = "gray";
