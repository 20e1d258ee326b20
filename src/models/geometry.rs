//! Geometry primitives reported by the host layout engine.

use serde::{Deserialize, Serialize};

/// An element's bounding box in viewport coordinates (CSS pixels)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// The longer of the two sides
    pub fn max_side(&self) -> f64 {
        self.width.max(self.height)
    }
}

/// A pointer position in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Where a ripple lands inside its button, in button-local pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RippleGeometry {
    pub left: f64,
    pub top: f64,
    /// Width and height; ripples are square
    pub size: f64,
}

impl RippleGeometry {
    pub fn from_click(host: Rect, click: Point) -> Self {
        Self {
            left: click.x - host.left,
            top: click.y - host.top,
            size: host.max_side(),
        }
    }
}

/// CSS length for a pixel value
pub fn px(value: f64) -> String {
    format!("{}px", value)
}
