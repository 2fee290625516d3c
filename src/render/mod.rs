//! Rendering primitives and the drawing surface contract.
//!
//! The engine draws through the [`Surface`] trait. [`RenderList`] is the
//! backend-agnostic implementation: it records commands that a backend (such
//! as the GPUI backend) replays, and that tests inspect.

use std::str::FromStr;

use thiserror::Error;

use crate::geom::{Point, ScreenPoint, ScreenRect, SurfaceSize};
use crate::transform::Transform;

/// RGBA color in linear space.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            1.0,
        )
    }

    /// Parse a CSS-style color string.
    ///
    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
    /// `rgba(r, g, b, a)` and a handful of color names.
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let text = input.trim().to_ascii_lowercase();
        if let Some(hex) = text.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError::InvalidHex(input.to_string()));
        }
        if let Some(body) = text
            .strip_prefix("rgba(")
            .or_else(|| text.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_rgb_function(body)
                .ok_or_else(|| ColorParseError::InvalidFunction(input.to_string()));
        }
        match text.as_str() {
            "black" => Ok(Self::BLACK),
            "white" => Ok(Self::WHITE),
            "red" => Ok(Self::from_rgb8(255, 0, 0)),
            "green" => Ok(Self::from_rgb8(0, 128, 0)),
            "blue" => Ok(Self::from_rgb8(0, 0, 255)),
            "gray" | "grey" => Ok(Self::from_rgb8(128, 128, 128)),
            "transparent" => Ok(Self::TRANSPARENT),
            _ => Err(ColorParseError::Unknown(input.to_string())),
        }
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Errors produced when parsing a color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// Malformed `#...` notation.
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
    /// Malformed `rgb(...)` / `rgba(...)` notation.
    #[error("invalid rgb color: {0}")]
    InvalidFunction(String),
    /// Unrecognized color name.
    #[error("unknown color: {0}")]
    Unknown(String),
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(Color::from_rgb8(nibble(0)?, nibble(1)?, nibble(2)?)),
        6 => Some(Color::from_rgb8(byte(0)?, byte(2)?, byte(4)?)),
        8 => {
            let mut color = Color::from_rgb8(byte(0)?, byte(2)?, byte(4)?);
            color.a = f32::from(byte(6)?) / 255.0;
            Some(color)
        }
        _ => None,
    }
}

fn parse_rgb_function(body: &str) -> Option<Color> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let channel = |s: &str| -> Option<u8> {
        let value: f32 = s.parse().ok()?;
        (0.0..=255.0).contains(&value).then(|| value.round() as u8)
    };
    let mut color = Color::from_rgb8(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?);
    if let Some(alpha) = parts.get(3) {
        let alpha: f32 = alpha.parse().ok()?;
        if !(0.0..=1.0).contains(&alpha) {
            return None;
        }
        color.a = alpha;
    }
    Some(color)
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl LineStyle {
    /// Create a line style.
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Text styling.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 12.0,
        }
    }
}

/// A 2D immediate-mode drawing target.
///
/// Text positions are baselines, matching canvas `fillText`.
pub trait Surface {
    /// Current pixel dimensions.
    fn size(&self) -> SurfaceSize;

    /// Notify the surface that its host changed dimensions.
    fn resize(&mut self, _size: SurfaceSize) {}

    /// Erase a rectangle.
    fn clear_rect(&mut self, rect: ScreenRect);

    /// Stroke the outline of a rectangle.
    fn stroke_rect(&mut self, rect: ScreenRect, style: LineStyle);

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: ScreenRect, color: Color);

    /// Stroke a connected path through the given points.
    fn stroke_path(&mut self, points: &[ScreenPoint], style: LineStyle);

    /// Draw a text run with its baseline starting at `position`.
    fn fill_text(&mut self, text: &str, position: ScreenPoint, style: &TextStyle);
}

/// Render command list.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Erase a rectangle.
    Clear(ScreenRect),
    /// Stroke a rectangle outline.
    StrokeRect {
        /// Rectangle bounds.
        rect: ScreenRect,
        /// Outline styling.
        style: LineStyle,
    },
    /// Fill a rectangle.
    FillRect {
        /// Rectangle bounds.
        rect: ScreenRect,
        /// Fill color.
        color: Color,
    },
    /// Stroke a polyline.
    Path {
        /// Path vertices in drawing order.
        points: Vec<ScreenPoint>,
        /// Stroke styling.
        style: LineStyle,
    },
    /// Draw text.
    Text {
        /// Baseline origin.
        position: ScreenPoint,
        /// Text content.
        text: String,
        /// Text styling.
        style: TextStyle,
    },
}

/// Recording surface.
///
/// Clearing a rectangle that covers the whole surface drops every recorded
/// command, so the list only ever holds the current frame.
#[derive(Debug, Clone)]
pub struct RenderList {
    size: SurfaceSize,
    commands: Vec<RenderCommand>,
}

impl RenderList {
    /// Create an empty render list for a surface of the given size.
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    /// Push a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Paths recorded in the current frame.
    pub fn paths(&self) -> impl Iterator<Item = (&[ScreenPoint], &LineStyle)> {
        self.commands.iter().filter_map(|command| match command {
            RenderCommand::Path { points, style } => Some((points.as_slice(), style)),
            _ => None,
        })
    }

    /// Text runs recorded in the current frame.
    pub fn texts(&self) -> impl Iterator<Item = (&str, ScreenPoint)> {
        self.commands.iter().filter_map(|command| match command {
            RenderCommand::Text { text, position, .. } => Some((text.as_str(), *position)),
            _ => None,
        })
    }
}

impl Surface for RenderList {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn clear_rect(&mut self, rect: ScreenRect) {
        if rect.covers(self.size.rect()) {
            self.commands.clear();
        } else {
            self.push(RenderCommand::Clear(rect));
        }
    }

    fn stroke_rect(&mut self, rect: ScreenRect, style: LineStyle) {
        self.push(RenderCommand::StrokeRect { rect, style });
    }

    fn fill_rect(&mut self, rect: ScreenRect, color: Color) {
        self.push(RenderCommand::FillRect { rect, color });
    }

    fn stroke_path(&mut self, points: &[ScreenPoint], style: LineStyle) {
        if points.is_empty() {
            return;
        }
        self.push(RenderCommand::Path {
            points: points.to_vec(),
            style,
        });
    }

    fn fill_text(&mut self, text: &str, position: ScreenPoint, style: &TextStyle) {
        if text.is_empty() {
            return;
        }
        self.push(RenderCommand::Text {
            position,
            text: text.to_string(),
            style: style.clone(),
        });
    }
}

/// Map sampled points into a screen-space polyline.
pub(crate) fn build_polyline(points: &[Point], transform: &Transform, out: &mut Vec<ScreenPoint>) {
    out.clear();
    out.extend(points.iter().map(|point| transform.to_screen(*point)));
}
