//! Border, fill and label styling for elements.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Border dash pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl StrokeStyle {
    /// Dash lengths relative to the stroke width, or `None` for a solid line.
    pub fn dash_pattern(self, width: f64) -> Option<[f64; 2]> {
        let w = width.max(1.0);
        match self {
            StrokeStyle::Solid => None,
            StrokeStyle::Dashed => Some([4.0 * w, 3.0 * w]),
            StrokeStyle::Dotted => Some([w, 2.0 * w]),
        }
    }
}

/// Border, fill and label of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Border color.
    pub stroke_color: SerializableColor,
    /// Border width.
    pub stroke_width: f64,
    /// Border dash pattern.
    #[serde(default)]
    pub stroke_style: StrokeStyle,
    /// Fill color (None = no fill).
    pub fill_color: Option<SerializableColor>,
    /// Text drawn inside the element.
    #[serde(default)]
    pub label: Option<String>,
    /// Label size in pixels.
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    /// Label color.
    #[serde(default = "SerializableColor::black")]
    pub text_color: SerializableColor,
}

fn default_font_size() -> f32 {
    14.0
}

impl ShapeStyle {
    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Get the fill color as a peniko Color.
    pub fn fill(&self) -> Option<Color> {
        self.fill_color.map(|c| c.into())
    }

    /// Builder-style label setter.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Builder-style fill setter.
    pub fn with_fill(mut self, color: SerializableColor) -> Self {
        self.fill_color = Some(color);
        self
    }

    /// Pixels the border reaches outside the geometric outline, rounded up,
    /// plus one pixel of anti-aliasing.
    pub fn stroke_margin(&self) -> i32 {
        (self.stroke_width / 2.0).ceil() as i32 + 1
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: 2.0,
            stroke_style: StrokeStyle::default(),
            fill_color: None,
            label: None,
            font_size: default_font_size(),
            text_color: SerializableColor::black(),
        }
    }
}
