//! # FrameKit
//!
//! A Rust toolkit for interactive working-envelope location ("framing") on
//! laser CNC machines: trace the perimeter of the rectangle a job will
//! occupy, at low power, until the operator is satisfied and cancels.
//!
//! ## Architecture
//!
//! FrameKit is organized as a workspace with multiple crates:
//!
//! 1. **framekit-core** - Geometry types, machine vocabulary, errors
//! 2. **framekit-locate** - Parameter resolution, boundary tracer, session
//!    control, machine capability traits
//! 3. **framekit** - Binary that drives a locate session against an
//!    in-memory machine simulation
//!
//! ## Features
//!
//! - **Cooperative tracing**: at most one bounded motion request per loop
//!   iteration, so real-time duties stay serviced
//! - **Corner synchronization**: the motion queue drains once per edge,
//!   before the axis of travel changes
//! - **Deterministic restoration**: feed rate, tool power, and workspace
//!   offsets are restored on cancellation

pub mod config;
pub mod sim;

pub use framekit_core::{
    Axis, Error, FeedRate, PowerLevel, Result, XyPoint, XySize, POWER_FULL, POWER_OFF,
};

pub use framekit_locate::{
    on_off_power, pwm_power, DisplayControl, FrameTracer, LocateMachine, LocateParams,
    LocateScreen, LocateSession, LocateToken, MotionExecutor, ParameterSource, SystemServices,
    ToolDriver, TracePhase, TraceStep, DEFAULT_TRACE_POWER, TRACE_SLICE_MM,
};

pub use config::SimConfig;
pub use sim::{CommandWords, MoveRecord, SimMachine};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
