//! Data models for frame-locate geometry
//!
//! This module provides:
//! - XY position and extent types used for perimeter tracing
//! - Axis identifiers for workspace-offset maintenance
//! - Feed rate and tool power vocabulary

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Feed rate in millimeters per minute.
pub type FeedRate = f32;

/// Tool power level in the hardware's inline PWM range.
pub type PowerLevel = u16;

/// Power level meaning "tool off".
pub const POWER_OFF: PowerLevel = 0;

/// Top of the inline PWM range (full power).
pub const POWER_FULL: PowerLevel = 255;

/// Machine axes touched by a locate session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// X axis
    X,
    /// Y axis
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
        }
    }
}

/// Position in the machine's XY plane, millimeters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct XyPoint {
    /// X-axis position
    pub x: f32,
    /// Y-axis position
    pub y: f32,
}

impl XyPoint {
    /// Create a point from X and Y coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Offsetting a point by an extent yields the opposite corner.
impl Add<XySize> for XyPoint {
    type Output = XyPoint;

    fn add(self, rhs: XySize) -> XyPoint {
        XyPoint {
            x: self.x + rhs.width,
            y: self.y + rhs.height,
        }
    }
}

/// Coordinate-shift subtraction, used to apply workspace offsets.
impl Sub for XyPoint {
    type Output = XyPoint;

    fn sub(self, rhs: XyPoint) -> XyPoint {
        XyPoint {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl fmt::Display for XyPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X:{:.3} Y:{:.3}", self.x, self.y)
    }
}

/// Rectangular extent in the XY plane, millimeters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct XySize {
    /// Extent along X
    pub width: f32,
    /// Extent along Y
    pub height: f32,
}

impl XySize {
    /// Create an extent from width and height
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for XySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} x {:.3} mm", self.width, self.height)
    }
}
