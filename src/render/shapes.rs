//! Shape paths for the token mask and border
//!
//! Each path type knows how to:
//! - Report its bounding box
//! - Shrink itself for the border stroke
//! - Answer point containment (used by raster backends and tests)

use std::fmt;

use enum_dispatch::enum_dispatch;
use glam::DVec2;

use crate::config::Shape;
use crate::types::{Point, Px, PtPx, Rect, Size, SizePx};

/// Common behavior for all mask paths
#[enum_dispatch]
pub trait Outline {
    /// Axis-aligned bounds of the path
    fn bounds(&self) -> Rect;

    /// The same kind of path pulled in by `amount` on every side
    fn inset(&self, amount: Px) -> ShapePath;

    /// Whether `point` lies inside or on the path
    fn contains(&self, point: PtPx) -> bool;

    fn center(&self) -> PtPx {
        self.bounds().center()
    }
}

/// A rectangular path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPath {
    pub rect: Rect,
}

impl Outline for RectPath {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn inset(&self, amount: Px) -> ShapePath {
        RectPath { rect: self.rect.inset(amount) }.into()
    }

    fn contains(&self, point: PtPx) -> bool {
        point.x >= self.rect.x()
            && point.x <= self.rect.right()
            && point.y >= self.rect.y()
            && point.y <= self.rect.bottom()
    }
}

/// An axis-aligned ellipse. Radii are independent, so a non-square region
/// gives an oval rather than a circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipsePath {
    pub center: PtPx,
    pub radii: SizePx,
}

impl EllipsePath {
    /// The ellipse inscribed in `rect`
    pub fn inscribed(rect: Rect) -> Self {
        Self {
            center: rect.center(),
            radii: Size::new(rect.width() / 2.0, rect.height() / 2.0),
        }
    }
}

impl Outline for EllipsePath {
    fn bounds(&self) -> Rect {
        Rect {
            origin: Point::new(self.center.x - self.radii.w, self.center.y - self.radii.h),
            size: Size::new(self.radii.w * 2.0, self.radii.h * 2.0),
        }
    }

    fn inset(&self, amount: Px) -> ShapePath {
        EllipsePath {
            center: self.center,
            radii: Size::new(
                (self.radii.w - amount).max(Px::ZERO),
                (self.radii.h - amount).max(Px::ZERO),
            ),
        }
        .into()
    }

    fn contains(&self, point: PtPx) -> bool {
        let radii = self.radii.to_dvec2();
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return false;
        }
        let d: DVec2 = (point.to_dvec2() - self.center.to_dvec2()) / radii;
        d.length_squared() <= 1.0
    }

    fn center(&self) -> PtPx {
        self.center
    }
}

/// Mask path handed to the drawing surface
#[enum_dispatch(Outline)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapePath {
    Rect(RectPath),
    Ellipse(EllipsePath),
}

impl ShapePath {
    /// Build the mask path for `shape` over `region`
    pub fn for_shape(shape: Shape, region: Rect) -> Self {
        match shape {
            Shape::Square => RectPath { rect: region }.into(),
            Shape::Circle => EllipsePath::inscribed(region).into(),
        }
    }
}

impl fmt::Display for ShapePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapePath::Rect(r) => write!(f, "rect {}", r.rect),
            ShapePath::Ellipse(e) => write!(f, "ellipse {} r={}", e.center, e.radii),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(w: f64, h: f64) -> Rect {
        Rect::from_xywh(0.0, 0.0, w, h)
    }

    #[test]
    fn circle_on_square_canvas_has_equal_radii() {
        let path = ShapePath::for_shape(Shape::Circle, canvas(256.0, 256.0));
        let ShapePath::Ellipse(e) = path else {
            panic!("expected ellipse, got {path:?}");
        };
        assert_eq!(e.center, Point::new(Px(128.0), Px(128.0)));
        assert_eq!(e.radii, Size::new(Px(128.0), Px(128.0)));
    }

    #[test]
    fn circle_on_wide_canvas_is_an_oval() {
        let path = ShapePath::for_shape(Shape::Circle, canvas(200.0, 100.0));
        let ShapePath::Ellipse(e) = path else {
            panic!("expected ellipse, got {path:?}");
        };
        assert_eq!(e.radii, Size::new(Px(100.0), Px(50.0)));
        assert_eq!(path.bounds(), canvas(200.0, 100.0));
    }

    #[test]
    fn inset_keeps_shape_kind() {
        let square = ShapePath::for_shape(Shape::Square, canvas(100.0, 100.0));
        assert_eq!(
            square.inset(Px(2.5)),
            ShapePath::Rect(RectPath { rect: Rect::from_xywh(2.5, 2.5, 95.0, 95.0) })
        );

        let circle = ShapePath::for_shape(Shape::Circle, canvas(100.0, 60.0));
        let ShapePath::Ellipse(e) = circle.inset(Px(4.0)) else {
            panic!("inset changed the shape kind");
        };
        assert_eq!(e.center, Point::new(Px(50.0), Px(30.0)));
        assert_eq!(e.radii, Size::new(Px(46.0), Px(26.0)));
    }

    #[test]
    fn ellipse_containment() {
        let path = ShapePath::for_shape(Shape::Circle, canvas(200.0, 100.0));
        assert!(path.contains(Point::new(Px(100.0), Px(50.0))));
        assert!(path.contains(Point::new(Px(199.0), Px(50.0))));
        // Corner of the bounding box is outside the oval
        assert!(!path.contains(Point::new(Px(5.0), Px(5.0))));

        let square = ShapePath::for_shape(Shape::Square, canvas(200.0, 100.0));
        assert!(square.contains(Point::new(Px(5.0), Px(5.0))));
    }
}
