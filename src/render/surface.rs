//! Drawing surface capability and a recording implementation.
//!
//! A [`Surface`] is whatever pixel backend the host application owns. The
//! compositor only ever talks to it through this trait, one full repaint per
//! render. [`RecordingSurface`] keeps the calls as a [`DrawOp`] display list,
//! which is what the tests assert against.

use std::fmt;

use super::shapes::ShapePath;
use super::text::{ProportionalMetrics, TextMeasurer};
use crate::config::ImageHandle;
use crate::types::{Color, Px, PtPx, Rect, SizePx};

/// Primitive operations a backend must provide
pub trait Surface: TextMeasurer {
    /// Resize the backing store; clears any previous content
    fn set_extents(&mut self, size: SizePx);

    fn clear(&mut self, rect: Rect);

    fn fill_shape(&mut self, path: &ShapePath, color: &Color);

    fn stroke_shape(&mut self, path: &ShapePath, color: &Color, width: Px);

    /// Draw an image into `dest`. With `clip_to_painted` only pixels that are
    /// already painted keep the image ("source-in" compositing).
    fn composite_image(&mut self, image: ImageHandle, dest: Rect, clip_to_painted: bool);

    /// Fill a line of text centered on `at`
    fn fill_text(&mut self, line: &str, at: PtPx, color: &Color, font_size: Px);

    /// Outline a line of text centered on `at`
    fn stroke_text(&mut self, line: &str, at: PtPx, color: &Color, width: Px, font_size: Px);
}

/// One recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    SetExtents { size: SizePx },
    Clear { rect: Rect },
    FillShape { path: ShapePath, color: Color },
    StrokeShape { path: ShapePath, color: Color, width: Px },
    CompositeImage { image: ImageHandle, dest: Rect, clip_to_painted: bool },
    FillText { line: String, at: PtPx, color: Color, font_size: Px },
    StrokeText { line: String, at: PtPx, color: Color, width: Px, font_size: Px },
}

impl fmt::Display for DrawOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawOp::SetExtents { size } => write!(f, "extents {}", size),
            DrawOp::Clear { rect } => write!(f, "clear {}", rect),
            DrawOp::FillShape { path, color } => write!(f, "fill {} {}", path, color),
            DrawOp::StrokeShape { path, color, width } => {
                write!(f, "stroke {} {} w={}", path, color, width)
            }
            DrawOp::CompositeImage { image, dest, clip_to_painted } => {
                let mode = if *clip_to_painted { "source-in" } else { "over" };
                write!(f, "image #{} {} {}", image.0, dest, mode)
            }
            DrawOp::FillText { line, at, color, font_size } => {
                write!(f, "text {:?} at {} {} {}px", line, at, color, font_size)
            }
            DrawOp::StrokeText { line, at, color, width, font_size } => {
                write!(f, "outline {:?} at {} {} w={} {}px", line, at, color, width, font_size)
            }
        }
    }
}

/// Format a display list one operation per line
pub fn dump_ops(ops: &[DrawOp]) -> String {
    ops.iter().map(|op| format!("{op}\n")).collect()
}

/// Surface that records every call instead of drawing
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface<M = ProportionalMetrics> {
    ops: Vec<DrawOp>,
    measurer: M,
}

impl RecordingSurface<ProportionalMetrics> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: TextMeasurer> RecordingSurface<M> {
    pub fn with_measurer(measurer: M) -> Self {
        Self { ops: Vec::new(), measurer }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }
}

impl<M: TextMeasurer> TextMeasurer for RecordingSurface<M> {
    fn measure_text_width(&self, line: &str, font_size: Px, typeface: &str) -> Px {
        self.measurer.measure_text_width(line, font_size, typeface)
    }
}

impl<M: TextMeasurer> Surface for RecordingSurface<M> {
    fn set_extents(&mut self, size: SizePx) {
        self.ops.push(DrawOp::SetExtents { size });
    }

    fn clear(&mut self, rect: Rect) {
        self.ops.push(DrawOp::Clear { rect });
    }

    fn fill_shape(&mut self, path: &ShapePath, color: &Color) {
        self.ops.push(DrawOp::FillShape { path: *path, color: color.clone() });
    }

    fn stroke_shape(&mut self, path: &ShapePath, color: &Color, width: Px) {
        self.ops.push(DrawOp::StrokeShape { path: *path, color: color.clone(), width });
    }

    fn composite_image(&mut self, image: ImageHandle, dest: Rect, clip_to_painted: bool) {
        self.ops.push(DrawOp::CompositeImage { image, dest, clip_to_painted });
    }

    fn fill_text(&mut self, line: &str, at: PtPx, color: &Color, font_size: Px) {
        self.ops.push(DrawOp::FillText {
            line: line.to_string(),
            at,
            color: color.clone(),
            font_size,
        });
    }

    fn stroke_text(&mut self, line: &str, at: PtPx, color: &Color, width: Px, font_size: Px) {
        self.ops.push(DrawOp::StrokeText {
            line: line.to_string(),
            at,
            color: color.clone(),
            width,
            font_size,
        });
    }
}
