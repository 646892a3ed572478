//! Boundary tracer state machine
//!
//! A resumable walk around the four edges of a rectangle. Each call to
//! [`FrameTracer::step`] performs at most one bounded unit of geometry work
//! and returns, so the caller can interleave real-time servicing between
//! steps. The tracer holds no machine handles; issuing the motion request
//! for a returned target is the caller's job.

use framekit_core::{XyPoint, XySize};

use crate::params::LocateParams;

/// Maximum distance, in mm, the tracer advances the cursor in one step.
///
/// Bounds single-call travel so responsiveness to cancellation does not
/// depend on the frame size.
pub const TRACE_SLICE_MM: f32 = 10.0;

/// Phase of the perimeter walk
///
/// `Init` runs once; the four edge phases cycle until the session is
/// cancelled from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracePhase {
    /// One-time setup: send the head to the frame origin.
    Init,
    /// Walking the bottom edge, X increasing.
    EdgePosX,
    /// Walking the right edge, Y increasing.
    EdgePosY,
    /// Walking the top edge, X decreasing.
    EdgeNegX,
    /// Walking the left edge, Y decreasing.
    EdgeNegY,
}

/// Outcome of one tracer step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceStep {
    /// First step of a session: travel to `target` (the frame origin) with
    /// the session feed rate and tool power armed.
    Start {
        /// The frame origin.
        target: XyPoint,
    },
    /// One bounded advance along the active edge.
    Advance {
        /// Next position of the head.
        target: XyPoint,
        /// True when this step reached the end of the edge. The caller must
        /// drain the motion queue before issuing the completing move, so
        /// the head is physically at the corner before the axis of travel
        /// changes.
        edge_complete: bool,
    },
}

/// Resumable rectangle-perimeter walker
#[derive(Debug)]
pub struct FrameTracer {
    phase: TracePhase,
    origin: XyPoint,
    far_corner: XyPoint,
    cursor: XyPoint,
    slice: f32,
}

impl FrameTracer {
    /// Create a tracer for a resolved frame with the default slice.
    pub fn new(params: &LocateParams) -> Self {
        Self::with_slice(params.origin, params.size, TRACE_SLICE_MM)
    }

    /// Create a tracer with an explicit slice bound.
    pub fn with_slice(origin: XyPoint, size: XySize, slice: f32) -> Self {
        Self {
            phase: TracePhase::Init,
            origin,
            far_corner: origin + size,
            cursor: origin,
            slice,
        }
    }

    /// Phase the next step will execute.
    pub fn phase(&self) -> TracePhase {
        self.phase
    }

    /// Target position most recently produced.
    pub fn cursor(&self) -> XyPoint {
        self.cursor
    }

    /// Corner diagonally opposite the origin.
    pub fn far_corner(&self) -> XyPoint {
        self.far_corner
    }

    /// Advance the walk by one bounded unit of work.
    pub fn step(&mut self) -> TraceStep {
        match self.phase {
            TracePhase::Init => {
                self.cursor = self.origin;
                self.phase = TracePhase::EdgePosX;
                TraceStep::Start {
                    target: self.cursor,
                }
            }
            TracePhase::EdgePosX => {
                let d = (self.far_corner.x - self.cursor.x).min(self.slice);
                self.cursor.x += d;
                self.edge_advance(d, TracePhase::EdgePosY)
            }
            TracePhase::EdgePosY => {
                let d = (self.far_corner.y - self.cursor.y).min(self.slice);
                self.cursor.y += d;
                self.edge_advance(d, TracePhase::EdgeNegX)
            }
            TracePhase::EdgeNegX => {
                let d = (self.cursor.x - self.origin.x).min(self.slice);
                self.cursor.x -= d;
                self.edge_advance(d, TracePhase::EdgeNegY)
            }
            TracePhase::EdgeNegY => {
                let d = (self.cursor.y - self.origin.y).min(self.slice);
                self.cursor.y -= d;
                // Not terminal: the frame is retraced until cancelled.
                self.edge_advance(d, TracePhase::EdgePosX)
            }
        }
    }

    /// A step shorter than the slice means the edge endpoint was reached.
    fn edge_advance(&mut self, taken: f32, next: TracePhase) -> TraceStep {
        let edge_complete = taken < self.slice;
        if edge_complete {
            self.phase = next;
        }
        TraceStep::Advance {
            target: self.cursor,
            edge_complete,
        }
    }
}
