//! End-to-end token renders against the recording surface.
//!
//! Run with `RUST_LOG=tokenmint=debug cargo test --features tracing -- --nocapture`
//! to see the resolved geometry for each render.

use tokenmint::render::{Outline, ProportionalMetrics, ShapePath, TextMeasurer, defaults};
use tokenmint::types::{Px, Rect};
use tokenmint::{
    Background, BackgroundImage, Color, DrawOp, ImageHandle, ImageLoader, RecordingSurface, Shape, StretchStyle,
    TokenConfig, TokenError, TokenOptions, attach_image, dump_ops, render, render_options, render_token,
};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn options(f: impl FnOnce(&mut TokenOptions)) -> TokenOptions {
    let mut options = TokenOptions::default();
    f(&mut options);
    options
}

#[test]
fn medium_circle_with_short_caption() {
    init_logging();
    let config = TokenConfig::new().with_shape(Shape::Circle).with_text("HI");
    let mut surface = RecordingSurface::new();
    let geometry = render(&config, &mut surface);

    let ShapePath::Ellipse(ellipse) = geometry.shape else {
        panic!("circle should produce an ellipse, got {}", geometry.shape);
    };
    assert_eq!(ellipse.radii.w, Px(128.0));
    assert_eq!(ellipse.radii.h, Px(128.0));

    assert_eq!(geometry.text.lines.len(), 1);
    let line = &geometry.text.lines[0];
    assert_eq!((line.position.x, line.position.y), (Px(128.0), Px(128.0)));

    let width = ProportionalMetrics.measure_text_width("HI", geometry.text.font_size, defaults::TYPEFACE);
    assert!(width <= Px(256.0), "caption overflows at {}px", geometry.text.font_size);
    assert!(geometry.text.font_size > Px::ZERO);
}

#[test]
fn tall_image_in_fill_mode_overflows_vertically() {
    let config = TokenConfig::new()
        .with_background(Background::Image)
        .with_background_image(Some(BackgroundImage::new(100, 200, ImageHandle(1))))
        .with_stretch_style(Some(StretchStyle::Fill));
    let mut surface = RecordingSurface::new();
    let geometry = render(&config, &mut surface);

    assert_eq!(geometry.image_placement, Rect::from_xywh(0.0, -128.0, 256.0, 512.0));
    assert_eq!(geometry.shape.bounds(), Rect::from_xywh(0.0, 0.0, 256.0, 256.0));
}

#[test]
fn unknown_shape_fails_before_drawing() {
    let mut surface = RecordingSurface::new();
    let err = render_options(&options(|o| o.shape = "triangle".into()), &mut surface).unwrap_err();
    assert_eq!(err.offending_value(), Some("triangle"));
    assert!(surface.ops().is_empty());

    let err = render_options(&options(|o| o.shape = "hexagon".into()), &mut surface).unwrap_err();
    assert_eq!(err, TokenError::UnknownShape { value: "hexagon".to_string() });
}

#[test]
fn repeated_renders_are_identical() {
    let options = options(|o| {
        o.text = "Bandit\nCaptain".into();
        o.border = "silver".into();
        o.stroke = true;
    });
    let first = render_token(&options).unwrap();
    let second = render_token(&options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn custom_color_reaches_the_fill() {
    let options = options(|o| {
        o.background = "custom".into();
        o.custom_color = "#336699".into();
    });
    let ops = render_token(&options).unwrap();
    let fill = ops.iter().find_map(|op| match op {
        DrawOp::FillShape { color, .. } => Some(color.clone()),
        _ => None,
    });
    assert_eq!(fill, Some(Color::Rgb(0x33, 0x66, 0x99)));
}

#[test]
fn aspect_mode_stretches_canvas_to_image() {
    let options = options(|o| {
        o.background = "image".into();
        o.stretch = String::new();
        o.background_image = Some(BackgroundImage::new(100, 150, ImageHandle(4)));
    });
    let ops = render_token(&options).unwrap();
    assert_eq!(ops[0], DrawOp::SetExtents { size: tokenmint::types::Size::new(Px(256.0), Px(384.0)) });
    assert!(ops.contains(&DrawOp::CompositeImage {
        image: ImageHandle(4),
        dest: Rect::from_xywh(0.0, 0.0, 256.0, 384.0),
        clip_to_painted: true,
    }));
}

#[test]
fn small_square_display_list() {
    let options = options(|o| {
        o.size = "extra_small".into();
        o.shape = "square".into();
        o.background = "red".into();
    });
    let ops = render_token(&options).unwrap();
    insta::assert_snapshot!(dump_ops(&ops).trim_end(), @r#"
    extents 64x64
    clear (0, 0) 64x64
    fill rect (0, 0) 64x64 red
    text "" at (32, 32) black 42px
    "#);
}

#[test]
fn bordered_outlined_circle_display_list() {
    let options = options(|o| {
        o.size = "custom".into();
        o.custom_width = 160.0;
        o.custom_height = 160.0;
        o.background = "blue".into();
        o.border = "gold".into();
        o.text = "Orc".into();
        o.text_color = "white".into();
        o.stroke = true;
    });
    let ops = render_token(&options).unwrap();
    insta::assert_snapshot!(dump_ops(&ops).trim_end(), @r#"
    extents 160x160
    clear (0, 0) 160x160
    fill ellipse (80, 80) r=80x80 blue
    stroke ellipse (80, 80) r=76x76 gold w=8
    text "Orc" at (80, 80) white 106px
    outline "Orc" at (80, 80) black w=1 106px
    "#);
}

/// Loader that only understands a fixed header
struct HeaderLoader;

impl ImageLoader for HeaderLoader {
    type Error = &'static str;

    fn load(&mut self, bytes: &[u8]) -> Result<BackgroundImage, Self::Error> {
        match bytes {
            [b'I', b'M', w, h, ..] => Ok(BackgroundImage::new(u32::from(*w), u32::from(*h), ImageHandle(7))),
            _ => Err("unrecognized image header"),
        }
    }
}

#[test]
fn failed_upload_renders_placeholder() {
    init_logging();
    let base = TokenConfig::new().with_background(Background::Image);

    let loaded = attach_image(base.clone(), &mut HeaderLoader, b"IM\x40\x80");
    let mut surface = RecordingSurface::new();
    render(&loaded, &mut surface);
    assert!(surface.ops().iter().any(|op| matches!(op, DrawOp::CompositeImage { .. })));

    let broken = attach_image(loaded, &mut HeaderLoader, b"GIF89a");
    let mut surface = RecordingSurface::new();
    render(&broken, &mut surface);
    assert!(!surface.ops().iter().any(|op| matches!(op, DrawOp::CompositeImage { .. })));
    assert!(matches!(
        &surface.ops()[2],
        DrawOp::FillShape { color, .. } if *color == Color::named(defaults::PLACEHOLDER_FILL)
    ));
}
