//! Machine capability traits
//!
//! The locate engine never talks to hardware directly; it consumes the
//! narrow capabilities below. Firmware glue, a networked controller, or the
//! simulator in the `framekit` binary all sit behind the same seams.

use framekit_core::{Axis, FeedRate, PowerLevel, XyPoint, POWER_FULL, POWER_OFF};

/// Motion planner/queue capabilities consumed by the locate engine
pub trait MotionExecutor {
    /// Enqueue a linear move to an absolute position at the given feed rate.
    ///
    /// Out-of-range targets are the executor's problem; it may fault the
    /// machine rather than return.
    fn enqueue_linear_move(&mut self, target: XyPoint, feed_rate: FeedRate);

    /// Block until all queued motion has completed.
    fn synchronize(&mut self);

    /// Current machine-wide feed rate.
    fn feed_rate(&self) -> FeedRate;

    /// Replace the machine-wide feed rate.
    fn set_feed_rate(&mut self, rate: FeedRate);

    /// Coordinate shift subtracted from logical positions before issue.
    fn workspace_offset(&self) -> XyPoint;

    /// Recompute the workspace offset for one axis.
    fn refresh_workspace_offset(&mut self, axis: Axis);
}

/// Laser/spindle driver capabilities
pub trait ToolDriver {
    /// Set the inline tool power for subsequent moves.
    fn set_inline_power(&mut self, power: PowerLevel);

    /// Map a requested logical power value into the hardware range.
    ///
    /// PWM-capable drivers scale/clamp into their configured range; plain
    /// on/off drivers collapse any positive request to full power.
    fn map_power(&self, requested: f32) -> PowerLevel;
}

/// Screens a locate session can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateScreen {
    /// The automatic status screen.
    Status,
    /// The dedicated locate screen with the cancel action.
    Locate,
}

/// Display/UI capabilities
pub trait DisplayControl {
    /// Switch the display to the given screen.
    fn navigate_to(&mut self, screen: LocateScreen);

    /// Suppress (or re-enable) automatic return to the status screen.
    fn defer_status_screen(&mut self, defer: bool);
}

/// Background servicing the drive loop must keep alive
pub trait SystemServices {
    /// Run one round of system idle/housekeeping work.
    fn idle_step(&mut self);

    /// Poll endstop/limit-switch events.
    fn poll_endstops(&mut self);
}

/// Aggregate of every capability a locate session needs
pub trait LocateMachine: MotionExecutor + ToolDriver + DisplayControl + SystemServices {}

impl<M> LocateMachine for M where M: MotionExecutor + ToolDriver + DisplayControl + SystemServices {}

/// Reference power mapping for PWM-capable drivers.
///
/// Rounds the request and clamps it into the inline range.
pub fn pwm_power(requested: f32) -> PowerLevel {
    let rounded = requested.round().max(0.0) as PowerLevel;
    rounded.min(POWER_FULL)
}

/// Reference power mapping for on/off drivers.
///
/// Any positive request is full power; everything else is off.
pub fn on_off_power(requested: f32) -> PowerLevel {
    if requested > 0.0 {
        POWER_FULL
    } else {
        POWER_OFF
    }
}
