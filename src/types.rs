//! Strongly-typed numeric primitives for token layout (zero-cost newtypes).
//!
//! Layout math never divides raw `f64`s: ratios come out of
//! [`Px::checked_div`], which refuses a zero divisor instead of producing
//! `inf`/`NaN` that would poison a `min` over candidates.

use std::convert::Infallible;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

use glam::{DVec2, dvec2};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Length in canvas pixels
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Px(pub f64);

impl Px {
    pub const ZERO: Px = Px(0.0);

    /// Create a Px with validation (rejects NaN/infinite)
    #[inline]
    pub fn try_new(val: f64) -> Result<Px, NumericError> {
        if val.is_nan() {
            Err(NumericError::NaN)
        } else if val.is_infinite() {
            Err(NumericError::Infinite)
        } else {
            Ok(Px(val))
        }
    }

    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn abs(self) -> Px {
        Px(self.0.abs())
    }

    #[inline]
    pub fn min(self, other: Px) -> Px {
        Px(self.0.min(other.0))
    }

    #[inline]
    pub fn max(self, other: Px) -> Px {
        Px(self.0.max(other.0))
    }

    /// Round down to a whole pixel
    #[inline]
    pub fn floor(self) -> Px {
        Px(self.0.floor())
    }

    /// Checked division returning None if the divisor is zero or the
    /// quotient is not finite
    #[inline]
    pub fn checked_div(self, rhs: Px) -> Option<Scalar> {
        if rhs.0 == 0.0 {
            return None;
        }
        let q = self.0 / rhs.0;
        q.is_finite().then_some(Scalar(q))
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Add for Px {
    type Output = Px;
    fn add(self, rhs: Px) -> Px { Px(self.0 + rhs.0) }
}
impl Sub for Px {
    type Output = Px;
    fn sub(self, rhs: Px) -> Px { Px(self.0 - rhs.0) }
}
impl Mul<f64> for Px {
    type Output = Px;
    fn mul(self, rhs: f64) -> Px { Px(self.0 * rhs) }
}
impl Div<f64> for Px {
    type Output = Px;
    fn div(self, rhs: f64) -> Px { Px(self.0 / rhs) }
}

// NOTE: Px / Px is intentionally NOT implemented as a trait.
// Use Px::checked_div() which returns Option<Scalar>.

impl Neg for Px {
    type Output = Px;
    fn neg(self) -> Px { Px(-self.0) }
}

impl AddAssign for Px {
    fn add_assign(&mut self, rhs: Px) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Px {
    fn sub_assign(&mut self, rhs: Px) {
        self.0 -= rhs.0;
    }
}

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unitless ratio (scale factors, fit multipliers)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Scalar(pub f64);

impl Scalar {
    pub const ZERO: Scalar = Scalar(0.0);
    pub const ONE: Scalar = Scalar(1.0);

    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn min(self, other: Scalar) -> Scalar {
        Scalar(self.0.min(other.0))
    }

    #[inline]
    pub fn max(self, other: Scalar) -> Scalar {
        Scalar(self.0.max(other.0))
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scalar * Px = Px (scaling a length)
impl Mul<Px> for Scalar {
    type Output = Px;
    fn mul(self, rhs: Px) -> Px {
        Px(self.0 * rhs.0)
    }
}

/// Px * Scalar = Px (scaling a length)
impl Mul<Scalar> for Px {
    type Output = Px;
    fn mul(self, rhs: Scalar) -> Px {
        Px(self.0 * rhs.0)
    }
}

/// Generic 2D point
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub fn new(x: T, y: T) -> Self { Point { x, y } }
}

impl Point<Px> {
    pub fn to_dvec2(self) -> DVec2 {
        dvec2(self.x.0, self.y.0)
    }

    pub fn from_dvec2(v: DVec2) -> Self {
        Point { x: Px(v.x), y: Px(v.y) }
    }
}

impl fmt::Display for Point<Px> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size<T> {
    pub w: T,
    pub h: T,
}

impl<T> Size<T> {
    pub fn new(w: T, h: T) -> Self { Size { w, h } }
}

impl Size<Px> {
    pub fn to_dvec2(self) -> DVec2 {
        dvec2(self.w.0, self.h.0)
    }

    pub fn from_dvec2(v: DVec2) -> Self {
        Size { w: Px(v.x), h: Px(v.y) }
    }
}

impl fmt::Display for Size<Px> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// Axis-aligned rectangle. The origin may be negative (cover-mode image
/// placement overflows the canvas on purpose).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub origin: Point<Px>,
    pub size: Size<Px>,
}

impl Rect {
    pub fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Rect {
            origin: Point::new(Px(x), Px(y)),
            size: Size::new(Px(w), Px(h)),
        }
    }

    /// Rectangle anchored at the canvas origin
    pub fn from_size(size: Size<Px>) -> Self {
        Rect { origin: Point::new(Px::ZERO, Px::ZERO), size }
    }

    pub fn x(&self) -> Px { self.origin.x }
    pub fn y(&self) -> Px { self.origin.y }
    pub fn width(&self) -> Px { self.size.w }
    pub fn height(&self) -> Px { self.size.h }
    pub fn right(&self) -> Px { self.origin.x + self.size.w }
    pub fn bottom(&self) -> Px { self.origin.y + self.size.h }

    pub fn center(&self) -> Point<Px> {
        Point::new(self.origin.x + self.size.w / 2.0, self.origin.y + self.size.h / 2.0)
    }

    /// Overlap of two rectangles; an empty overlap collapses to a zero-size
    /// rectangle at the clamped origin rather than going negative.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x1 = self.x().max(other.x());
        let y1 = self.y().max(other.y());
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        Rect {
            origin: Point::new(x1, y1),
            size: Size::new((x2 - x1).max(Px::ZERO), (y2 - y1).max(Px::ZERO)),
        }
    }

    /// Shrink every edge by `amount`, never below zero size
    pub fn inset(&self, amount: Px) -> Rect {
        Rect {
            origin: Point::new(self.origin.x + amount, self.origin.y + amount),
            size: Size::new(
                (self.size.w - amount * 2.0).max(Px::ZERO),
                (self.size.h - amount * 2.0).max(Px::ZERO),
            ),
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.origin, self.size)
    }
}

/// Convenient aliases
pub type PtPx = Point<Px>;
pub type SizePx = Size<Px>;

/// CSS-style color. Anything that doesn't parse is kept verbatim so the
/// backend can make its own decision about it.
#[derive(Clone, Debug, PartialEq)]
pub enum Color {
    Named(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, u8),
    Raw(String),
}

impl Color {
    pub fn named(name: &str) -> Color {
        Color::Named(name.to_ascii_lowercase())
    }

    pub fn is_black(&self) -> bool {
        match self {
            Color::Named(name) => name == "black",
            Color::Rgb(r, g, b) => (*r, *g, *b) == (0, 0, 0),
            Color::Rgba(r, g, b, a) => (*r, *g, *b, *a) == (0, 0, 0, 255),
            Color::Raw(_) => false,
        }
    }

    /// Outline color for text drawn in `self`: white around black, black
    /// around everything else.
    pub fn contrasting(&self) -> Color {
        if self.is_black() {
            Color::named("white")
        } else {
            Color::named("black")
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Named(s) | Color::Raw(s) => write!(f, "{}", s),
            Color::Rgb(r, g, b) => write!(f, "rgb({},{},{})", r, g, b),
            Color::Rgba(r, g, b, a) => {
                write!(f, "rgba({},{},{},{:.2})", r, g, b, f64::from(*a) / 255.0)
            }
        }
    }
}

impl FromStr for Color {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();

        let parsed = if let Some(hex) = lower.strip_prefix('#') {
            parse_hex(hex)
        } else if let Some(args) = function_args(&lower, "rgba") {
            parse_rgba(args)
        } else if let Some(args) = function_args(&lower, "rgb") {
            parse_rgb(args)
        } else if !lower.is_empty() && lower.chars().all(|c| c.is_ascii_alphabetic()) {
            Some(Color::Named(lower))
        } else {
            None
        };

        Ok(parsed.unwrap_or_else(|| Color::Raw(trimmed.to_string())))
    }
}

fn function_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_hex(hex: &str) -> Option<Color> {
    let nibble = |c: char| c.to_digit(16).map(|d| d as u8);
    match hex.len() {
        3 => {
            let mut it = hex.chars().map(nibble);
            let r = it.next()??;
            let g = it.next()??;
            let b = it.next()??;
            Some(Color::Rgb(r * 17, g * 17, b * 17))
        }
        6 => {
            let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
            Some(Color::Rgb(byte(0)?, byte(2)?, byte(4)?))
        }
        _ => None,
    }
}

fn parse_channels(args: &str) -> Vec<&str> {
    args.split(',').map(str::trim).collect()
}

fn parse_rgb(args: &str) -> Option<Color> {
    match parse_channels(args).as_slice() {
        [r, g, b] => Some(Color::Rgb(r.parse().ok()?, g.parse().ok()?, b.parse().ok()?)),
        _ => None,
    }
}

fn parse_rgba(args: &str) -> Option<Color> {
    match parse_channels(args).as_slice() {
        [r, g, b, a] => {
            let alpha: f64 = a.parse().ok()?;
            if !(0.0..=1.0).contains(&alpha) {
                return None;
            }
            Some(Color::Rgba(
                r.parse().ok()?,
                g.parse().ok()?,
                b.parse().ok()?,
                (alpha * 255.0).round() as u8,
            ))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Px tests ====================

    #[test]
    fn px_try_new_rejects_nan_and_infinity() {
        assert_eq!(Px::try_new(f64::NAN), Err(NumericError::NaN));
        assert_eq!(Px::try_new(f64::INFINITY), Err(NumericError::Infinite));
        assert!(Px::try_new(-3.0).is_ok());
    }

    #[test]
    fn px_arithmetic() {
        let a = Px(3.0);
        let b = Px(2.0);

        assert_eq!(a + b, Px(5.0));
        assert_eq!(a - b, Px(1.0));
        assert_eq!(a * 2.0, Px(6.0));
        assert_eq!(a / 2.0, Px(1.5));
        assert_eq!(-a, Px(-3.0));
        assert_eq!(Px(7.9).floor(), Px(7.0));
    }

    #[test]
    fn px_checked_div() {
        assert_eq!(Px(6.0).checked_div(Px(2.0)), Some(Scalar(3.0)));
        assert_eq!(Px(6.0).checked_div(Px(0.0)), None);
        assert_eq!(Px(6.0).checked_div(Px(f64::MIN_POSITIVE)), None);
    }

    #[test]
    fn scalar_mul_px() {
        assert_eq!(Scalar(2.0) * Px(3.0), Px(6.0));
        assert_eq!(Px(3.0) * Scalar(2.0), Px(6.0));
    }

    // ==================== Rect tests ====================

    #[test]
    fn rect_intersect_clamps_overflow() {
        let canvas = Rect::from_xywh(0.0, 0.0, 256.0, 256.0);
        let image = Rect::from_xywh(0.0, -128.0, 256.0, 512.0);
        assert_eq!(image.intersect(&canvas), canvas);
    }

    #[test]
    fn rect_intersect_disjoint_is_empty() {
        let a = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        let b = Rect::from_xywh(20.0, 20.0, 5.0, 5.0);
        let r = a.intersect(&b);
        assert_eq!(r.width(), Px::ZERO);
        assert_eq!(r.height(), Px::ZERO);
    }

    #[test]
    fn rect_inset_and_center() {
        let r = Rect::from_xywh(0.0, 0.0, 100.0, 50.0).inset(Px(5.0));
        assert_eq!(r, Rect::from_xywh(5.0, 5.0, 90.0, 40.0));
        assert_eq!(r.center(), Point::new(Px(50.0), Px(25.0)));

        let collapsed = Rect::from_xywh(0.0, 0.0, 4.0, 4.0).inset(Px(3.0));
        assert_eq!(collapsed.size, Size::new(Px::ZERO, Px::ZERO));
    }

    // ==================== Color tests ====================

    #[test]
    fn color_parses_css_forms() {
        assert_eq!("Black".parse::<Color>(), Ok(Color::named("black")));
        assert_eq!("#ff8000".parse::<Color>(), Ok(Color::Rgb(255, 128, 0)));
        assert_eq!("#0f0".parse::<Color>(), Ok(Color::Rgb(0, 255, 0)));
        assert_eq!("rgb(1, 2, 3)".parse::<Color>(), Ok(Color::Rgb(1, 2, 3)));
        assert_eq!("rgba(1, 2, 3, 1)".parse::<Color>(), Ok(Color::Rgba(1, 2, 3, 255)));
    }

    #[test]
    fn color_keeps_unparseable_input() {
        assert_eq!("#12".parse::<Color>(), Ok(Color::Raw("#12".to_string())));
        assert_eq!("rgb(1,2)".parse::<Color>(), Ok(Color::Raw("rgb(1,2)".to_string())));
    }

    #[test]
    fn color_contrast() {
        assert_eq!(Color::named("black").contrasting(), Color::named("white"));
        assert_eq!(Color::Rgb(0, 0, 0).contrasting(), Color::named("white"));
        assert_eq!(Color::named("white").contrasting(), Color::named("black"));
        assert_eq!(Color::named("gold").contrasting(), Color::named("black"));
    }
}
