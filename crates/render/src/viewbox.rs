//! SVG view boxes and their combination.

use std::fmt;
use std::str::FromStr;

use cad_kernel::projection::format_coord;
use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// Used wherever a view box is missing or unparsable.
pub const DEFAULT_VIEW_BOX: ViewBox = ViewBox {
    x: 0.0,
    y: 0.0,
    width: 100.0,
    height: 100.0,
};

/// An SVG `viewBox`: `"x y width height"`.
///
/// Serializes as the attribute string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &ViewBox) -> ViewBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        ViewBox {
            x,
            y,
            width: self.max_x().max(other.max_x()) - x,
            height: self.max_y().max(other.max_y()) - y,
        }
    }

    /// Parse `s`, falling back to [`DEFAULT_VIEW_BOX`].
    pub fn parse_or_default(s: &str) -> ViewBox {
        s.parse().unwrap_or(DEFAULT_VIEW_BOX)
    }
}

impl FromStr for ViewBox {
    type Err = RenderError;

    /// Four finite numbers separated by whitespace or commas; width and height
    /// must not be negative.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RenderError::InvalidViewBox { value: s.to_string() };
        let values = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<f64>().ok().filter(|v| v.is_finite()))
            .collect::<Option<Vec<f64>>>()
            .ok_or_else(invalid)?;
        match values[..] {
            [x, y, width, height] if width >= 0.0 && height >= 0.0 => Ok(ViewBox::new(x, y, width, height)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            format_coord(self.x),
            format_coord(self.y),
            format_coord(self.width),
            format_coord(self.height)
        )
    }
}

impl From<ViewBox> for String {
    fn from(view_box: ViewBox) -> Self {
        view_box.to_string()
    }
}

impl TryFrom<String> for ViewBox {
    type Error = RenderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Union of two view-box strings; a missing or invalid input counts as
/// [`DEFAULT_VIEW_BOX`].
pub fn combine_view_boxes(first: &str, second: &str) -> String {
    ViewBox::parse_or_default(first)
        .union(&ViewBox::parse_or_default(second))
        .to_string()
}
