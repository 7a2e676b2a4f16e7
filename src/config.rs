//! Token configuration.
//!
//! [`TokenConfig`] is an immutable snapshot: the UI builds a new one for every
//! change and hands it to [`render`](crate::render::render) whole. Nothing in
//! the crate keeps a "current" configuration around.
//!
//! [`TokenOptions`] is the loosely typed form a settings form produces
//! (select values as strings). Converting it validates every enumerated option.

use std::fmt;
use std::str::FromStr;

use crate::errors::TokenError;
use crate::render::defaults;
use crate::types::{Color, Px, Size, SizePx};

/// Named token sizes offered by the size picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizePreset {
    ExtraSmall,
    Small,
    #[default]
    Medium,
    Print,
    Huge,
}

impl SizePreset {
    /// Side length in pixels; every preset is square
    pub fn side(self) -> u32 {
        match self {
            SizePreset::ExtraSmall => 64,
            SizePreset::Small => 128,
            SizePreset::Medium => 256,
            SizePreset::Print => 300,
            SizePreset::Huge => 384,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            SizePreset::ExtraSmall => "extra_small",
            SizePreset::Small => "small",
            SizePreset::Medium => "medium",
            SizePreset::Print => "print",
            SizePreset::Huge => "huge",
        }
    }
}

impl FromStr for SizePreset {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "extra_small" => Ok(SizePreset::ExtraSmall),
            "small" => Ok(SizePreset::Small),
            "medium" => Ok(SizePreset::Medium),
            "print" => Ok(SizePreset::Print),
            "huge" => Ok(SizePreset::Huge),
            other => Err(TokenError::UnknownSize { value: other.to_string() }),
        }
    }
}

/// Requested token size: a preset or a custom extent
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenSize {
    Preset(SizePreset),
    Custom { width: u32, height: u32 },
}

impl Default for TokenSize {
    fn default() -> Self {
        TokenSize::Preset(SizePreset::default())
    }
}

impl TokenSize {
    /// Build a custom size from raw input. Values are clamped to
    /// `1..=MAX_DIMENSION` and truncated to whole pixels; NaN and infinities
    /// are rejected.
    pub fn custom(width: f64, height: f64) -> Result<Self, TokenError> {
        Ok(TokenSize::Custom {
            width: clamp_dimension("width", width)?,
            height: clamp_dimension("height", height)?,
        })
    }

    pub fn dimensions(self) -> SizePx {
        let (w, h) = match self {
            TokenSize::Preset(preset) => (preset.side(), preset.side()),
            TokenSize::Custom { width, height } => (width, height),
        };
        Size::new(Px(f64::from(w)), Px(f64::from(h)))
    }
}

fn clamp_dimension(axis: &'static str, value: f64) -> Result<u32, TokenError> {
    let value = Px::try_new(value).map_err(|source| TokenError::InvalidDimension { axis, source })?;
    Ok(value.raw().clamp(1.0, f64::from(defaults::MAX_DIMENSION)) as u32)
}

/// Shape of the token mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    Square,
    #[default]
    Circle,
}

impl FromStr for Shape {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "square" => Ok(Shape::Square),
            "circle" => Ok(Shape::Circle),
            other => Err(TokenError::UnknownShape { value: other.to_string() }),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Square => write!(f, "square"),
            Shape::Circle => write!(f, "circle"),
        }
    }
}

/// Background colors offered without typing a custom value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuiltinColor {
    #[default]
    White,
    Red,
    Green,
    Blue,
}

impl BuiltinColor {
    pub fn name(self) -> &'static str {
        match self {
            BuiltinColor::White => "white",
            BuiltinColor::Red => "red",
            BuiltinColor::Green => "green",
            BuiltinColor::Blue => "blue",
        }
    }

    pub fn color(self) -> Color {
        Color::named(self.name())
    }
}

/// What fills the shape mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Builtin(BuiltinColor),
    /// Uses [`TokenConfig::custom_color`]
    Custom,
    /// Uses [`TokenConfig::background_image`] when it is loaded
    Image,
}

impl Default for Background {
    fn default() -> Self {
        Background::Builtin(BuiltinColor::default())
    }
}

impl FromStr for Background {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(Background::Image),
            "custom" => Ok(Background::Custom),
            "white" => Ok(Background::Builtin(BuiltinColor::White)),
            "red" => Ok(Background::Builtin(BuiltinColor::Red)),
            "green" => Ok(Background::Builtin(BuiltinColor::Green)),
            "blue" => Ok(Background::Builtin(BuiltinColor::Blue)),
            other => Err(TokenError::UnknownBackground { value: other.to_string() }),
        }
    }
}

/// How a background image maps onto the shape region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StretchStyle {
    /// Contain: the whole image is visible, letterboxed if needed
    #[default]
    Fit,
    /// Cover: the image covers the region and overflows on one axis
    Fill,
}

impl FromStr for StretchStyle {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fit" => Ok(StretchStyle::Fit),
            "fill" => Ok(StretchStyle::Fill),
            other => Err(TokenError::UnknownStretchStyle { value: other.to_string() }),
        }
    }
}

/// Opaque reference to a decoded image owned by the drawing backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u64);

/// A decoded background image: natural size plus backend handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundImage {
    pub width: u32,
    pub height: u32,
    pub handle: ImageHandle,
}

impl BackgroundImage {
    pub fn new(width: u32, height: u32, handle: ImageHandle) -> Self {
        Self { width, height, handle }
    }

    /// Dimensions are known; an image still decoding reports zero
    pub fn is_ready(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn natural_size(&self) -> SizePx {
        Size::new(Px(f64::from(self.width)), Px(f64::from(self.height)))
    }
}

/// Everything needed to draw one token
#[derive(Debug, Clone, PartialEq)]
pub struct TokenConfig {
    pub size: TokenSize,
    pub shape: Shape,
    pub background: Background,
    pub background_image: Option<BackgroundImage>,
    /// Kept even while another background is selected
    pub custom_color: Color,
    /// `None` selects the legacy mode where the canvas height follows the
    /// image aspect ratio
    pub stretch_style: Option<StretchStyle>,
    pub text_color: Color,
    pub text: String,
    pub stroke: bool,
    pub border_color: Option<Color>,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            size: TokenSize::default(),
            shape: Shape::default(),
            background: Background::default(),
            background_image: None,
            custom_color: Color::named(defaults::CUSTOM_COLOR),
            stretch_style: Some(StretchStyle::default()),
            text_color: Color::named("black"),
            text: String::new(),
            stroke: false,
            border_color: None,
        }
    }
}

impl TokenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, size: TokenSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    pub fn with_background_image(mut self, image: Option<BackgroundImage>) -> Self {
        self.background_image = image;
        self
    }

    pub fn with_custom_color(mut self, color: Color) -> Self {
        self.custom_color = color;
        self
    }

    pub fn with_stretch_style(mut self, style: Option<StretchStyle>) -> Self {
        self.stretch_style = style;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn with_stroke(mut self, stroke: bool) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn with_border(mut self, color: Option<Color>) -> Self {
        self.border_color = color;
        self
    }

    /// The image to composite, if the background asks for one and it has
    /// finished decoding
    pub fn active_image(&self) -> Option<&BackgroundImage> {
        match self.background {
            Background::Image => self.background_image.as_ref().filter(|img| img.is_ready()),
            _ => None,
        }
    }
}

/// Form-level options, one string per select box
#[derive(Debug, Clone, PartialEq)]
pub struct TokenOptions {
    /// A preset key or `"custom"`
    pub size: String,
    pub custom_width: f64,
    pub custom_height: f64,
    pub shape: String,
    /// `"image"`, `"custom"` or a built-in color name
    pub background: String,
    pub custom_color: String,
    /// `"fit"`, `"fill"`, or empty for image-aspect sizing
    pub stretch: String,
    pub text_color: String,
    pub text: String,
    pub stroke: bool,
    /// `"none"` or a color
    pub border: String,
    pub background_image: Option<BackgroundImage>,
}

impl Default for TokenOptions {
    fn default() -> Self {
        Self {
            size: SizePreset::default().key().to_string(),
            custom_width: f64::from(SizePreset::default().side()),
            custom_height: f64::from(SizePreset::default().side()),
            shape: Shape::default().to_string(),
            background: BuiltinColor::default().name().to_string(),
            custom_color: defaults::CUSTOM_COLOR.to_string(),
            stretch: "fit".to_string(),
            text_color: "black".to_string(),
            text: String::new(),
            stroke: false,
            border: "none".to_string(),
            background_image: None,
        }
    }
}

impl TryFrom<&TokenOptions> for TokenConfig {
    type Error = TokenError;

    fn try_from(options: &TokenOptions) -> Result<Self, Self::Error> {
        let size = match options.size.as_str() {
            "custom" => TokenSize::custom(options.custom_width, options.custom_height)?,
            preset => TokenSize::Preset(preset.parse::<SizePreset>()?),
        };
        let shape: Shape = options.shape.parse()?;
        let background: Background = options.background.parse()?;
        let stretch_style = match options.stretch.as_str() {
            "" => None,
            style => Some(style.parse::<StretchStyle>()?),
        };
        let border_color = match options.border.as_str() {
            "" | "none" => None,
            color => Some(parse_color(color)),
        };

        Ok(TokenConfig {
            size,
            shape,
            background,
            background_image: options.background_image,
            custom_color: parse_color(&options.custom_color),
            stretch_style,
            text_color: parse_color(&options.text_color),
            text: options.text.clone(),
            stroke: options.stroke,
            border_color,
        })
    }
}

fn parse_color(s: &str) -> Color {
    match s.parse::<Color>() {
        Ok(color) => color,
        Err(never) => match never {},
    }
}
