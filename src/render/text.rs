//! Text measurement and auto-fit layout
//!
//! Text is measured once at [`BASE_FONT_SIZE`] and scaled linearly: the
//! multiplier that makes the widest line fit also makes every re-measured
//! line fit, so there is no second measuring pass at the final size.

use super::defaults::{BASE_FONT_SIZE, LINE_HEIGHT, TYPEFACE};
use crate::log::trace;
use crate::types::{Point, Px, PtPx, Rect, Scalar};

/// Measures the rendered width of a single line of text.
///
/// Backends implement this with their font engine. Closures work too, which
/// keeps tests free of any real font data.
pub trait TextMeasurer {
    fn measure_text_width(&self, line: &str, font_size: Px, typeface: &str) -> Px;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, Px, &str) -> Px,
{
    fn measure_text_width(&self, line: &str, font_size: Px, typeface: &str) -> Px {
        self(line, font_size, typeface)
    }
}

/// Proportional advance widths for printable ASCII, in hundredths of an
/// average character.
#[rustfmt::skip]
pub const ADVANCE_WIDTHS: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Width of an average character relative to the font size
const AVERAGE_ADVANCE_EM: f64 = 0.08 / 0.14;

/// Total advance of `text` in hundredths of an average character.
/// Characters outside printable ASCII count as 100.
pub fn advance_units(text: &str) -> u32 {
    text.chars()
        .map(|c| {
            if (' '..='~').contains(&c) {
                u32::from(ADVANCE_WIDTHS[(c as usize) - 0x20])
            } else {
                100
            }
        })
        .sum()
}

/// Deterministic measurer built on [`ADVANCE_WIDTHS`]. Ignores the typeface.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProportionalMetrics;

impl TextMeasurer for ProportionalMetrics {
    fn measure_text_width(&self, line: &str, font_size: Px, _typeface: &str) -> Px {
        font_size * (f64::from(advance_units(line)) * 0.01 * AVERAGE_ADVANCE_EM)
    }
}

/// Split caller text into lines on `\n` and `\r\n`. Always at least one line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// One positioned line; `position` is the center of the glyph run
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub position: PtPx,
}

/// Lines placed inside a region, all sharing one font size
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub font_size: Px,
    pub multiplier: Scalar,
    pub lines: Vec<TextLine>,
}

/// Candidate scale factors: one per measurable line, then the height limit.
///
/// Lines that measure zero (empty, or glyphs the font lacks) put no
/// constraint on the width and are skipped.
pub fn fit_candidates(lines: &[&str], region: Rect, measurer: &(impl TextMeasurer + ?Sized)) -> Vec<Scalar> {
    let mut candidates: Vec<Scalar> = lines
        .iter()
        .filter_map(|line| {
            let width = measurer.measure_text_width(line, BASE_FONT_SIZE, TYPEFACE);
            if width <= Px::ZERO {
                return None;
            }
            region.width().checked_div(width)
        })
        .collect();

    let block_height = BASE_FONT_SIZE * (lines.len() as f64 * LINE_HEIGHT);
    if let Some(c) = region.height().checked_div(block_height) {
        candidates.push(c);
    }
    candidates
}

/// Pick the largest font size at which every line fits `region`, then
/// center each line horizontally and space the lines evenly down the region.
pub fn fit_text(text: &str, region: Rect, measurer: &(impl TextMeasurer + ?Sized)) -> TextLayout {
    let lines = split_lines(text);
    let multiplier = fit_candidates(&lines, region, measurer)
        .into_iter()
        .reduce(Scalar::min)
        .unwrap_or(Scalar::ZERO)
        .max(Scalar::ZERO);
    let font_size = (BASE_FONT_SIZE * multiplier).floor();

    let step = region.height() / (lines.len() + 1) as f64;
    let center_x = region.center().x;
    trace!(
        lines = lines.len(),
        multiplier = multiplier.raw(),
        font_size = font_size.raw(),
        "fit_text"
    );

    let lines = lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| TextLine {
            text: line.to_string(),
            position: Point::new(center_x, region.y() + step * (i + 1) as f64),
        })
        .collect();

    TextLayout { font_size, multiplier, lines }
}
