//! # FrameKit Locate
//!
//! Interactive working-envelope location ("framing") for laser CNC machines.
//! Walks the tool head around the four edges of a rectangle in small bounded
//! slices so an operator can see exactly where a job will burn, while the
//! enclosing control loop keeps servicing its real-time duties.
//!
//! ## Architecture
//!
//! Three components compose top-down:
//!
//! 1. **Parameter resolution** ([`params`]) - turns an already-tokenized
//!    command line into the immutable [`LocateParams`] of one session.
//! 2. **Boundary tracing** ([`tracer`]) - a resumable state machine that
//!    yields at most one bounded motion target per step, with no side
//!    effects of its own.
//! 3. **Session control** ([`session`]) - owns the cooperative drive loop,
//!    the cancellation token, and entry/exit state restoration.
//!
//! The machine itself is reached only through the capability traits in
//! [`machine`]; real firmware, a remote controller, or an in-memory
//! simulator can all stand behind them.

pub mod machine;
pub mod params;
pub mod session;
pub mod tracer;

pub use machine::{
    on_off_power, pwm_power, DisplayControl, LocateMachine, LocateScreen, MotionExecutor,
    SystemServices, ToolDriver,
};

pub use params::{
    LocateParams, ParameterSource, DEFAULT_TRACE_POWER, WORD_FEED_RATE, WORD_ORIGIN_X,
    WORD_ORIGIN_Y, WORD_POWER, WORD_SIZE_X, WORD_SIZE_Y,
};

pub use session::{DisplayPollHook, LocateSession, LocateToken};

pub use tracer::{FrameTracer, TracePhase, TraceStep, TRACE_SLICE_MM};
