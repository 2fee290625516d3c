use gpui::{
    App, BorderStyle, Bounds, ContentMask, Corners, Edges, PathBuilder, Pixels, TextRun, Window,
    font, point, px, quad,
};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{Color, LineStyle, RenderCommand, TextStyle};

use super::frame::GraphFrame;

pub(crate) fn paint_frame(
    frame: &GraphFrame,
    bounds: Bounds<Pixels>,
    window: &mut Window,
    cx: &mut App,
) {
    let origin = ScreenPoint::new(
        f64::from(f32::from(bounds.origin.x)),
        f64::from(f32::from(bounds.origin.y)),
    );
    let mask = ContentMask { bounds };
    window.with_content_mask(Some(mask), |window| {
        for command in frame.render.commands() {
            match command {
                RenderCommand::Clear(rect) => {
                    paint_fill(window, offset_rect(*rect, origin), frame.background);
                }
                RenderCommand::StrokeRect { rect, style } => {
                    paint_outline(window, offset_rect(*rect, origin), *style);
                }
                RenderCommand::FillRect { rect, color } => {
                    paint_fill(window, offset_rect(*rect, origin), *color);
                }
                RenderCommand::Path { points, style } => {
                    paint_path(window, points, origin, *style);
                }
                RenderCommand::Text {
                    position,
                    text,
                    style,
                } => {
                    paint_text(window, cx, position.offset(origin.x, origin.y), text, style);
                }
            }
        }
    });
}

fn paint_path(window: &mut Window, points: &[ScreenPoint], origin: ScreenPoint, style: LineStyle) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    if rest.is_empty() {
        return;
    }
    let width = style.width.max(0.2);
    let mut builder = PathBuilder::stroke(px(width));
    builder.move_to(to_point(first.offset(origin.x, origin.y)));
    for pt in rest {
        builder.line_to(to_point(pt.offset(origin.x, origin.y)));
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(style.color));
    }
}

fn paint_outline(window: &mut Window, rect: ScreenRect, style: LineStyle) {
    window.paint_quad(quad(
        to_bounds(rect),
        Corners::all(px(0.0)),
        to_rgba(Color::TRANSPARENT),
        Edges::all(px(style.width)),
        to_rgba(style.color),
        BorderStyle::default(),
    ));
}

fn paint_fill(window: &mut Window, rect: ScreenRect, color: Color) {
    window.paint_quad(quad(
        to_bounds(rect),
        Corners::all(px(0.0)),
        to_rgba(color),
        Edges::all(px(0.0)),
        to_rgba(color),
        BorderStyle::default(),
    ));
}

/// Text positions are baselines; gpui lays lines out from their top.
fn paint_text(
    window: &mut Window,
    cx: &mut App,
    baseline: ScreenPoint,
    text: &str,
    style: &TextStyle,
) {
    if text.is_empty() {
        return;
    }
    let run = TextRun {
        len: text.len(),
        font: font(".SystemUIFont"),
        color: to_hsla(style.color),
        background_color: None,
        underline: None,
        strikethrough: None,
    };
    let shaped = window
        .text_system()
        .shape_line(text.to_string().into(), px(style.size), &[run], None);
    let line_height = shaped.ascent + shaped.descent;
    let origin = point(px(baseline.x as f32), px(baseline.y as f32) - shaped.ascent);
    let _ = shaped.paint(origin, line_height, window, cx);
}

fn offset_rect(rect: ScreenRect, origin: ScreenPoint) -> ScreenRect {
    ScreenRect::new(
        rect.min.offset(origin.x, origin.y),
        rect.max.offset(origin.x, origin.y),
    )
}

fn to_point(pt: ScreenPoint) -> gpui::Point<Pixels> {
    point(px(pt.x as f32), px(pt.y as f32))
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

pub(crate) fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}

fn to_bounds(rect: ScreenRect) -> Bounds<Pixels> {
    Bounds::from_corners(to_point(rect.min), to_point(rect.max))
}
