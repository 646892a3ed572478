//! Locate session controller
//!
//! Owns the cooperative drive loop of one locate session: entry (queue
//! drain, display takeover, parameter resolution), the loop itself (one
//! tracer step plus mandatory real-time servicing per iteration), and exit
//! (deterministic restoration of feed rate, tool power, and offsets).
//!
//! Everything runs on one logical thread. The only cross-thread state is
//! the [`LocateToken`], so a UI running elsewhere can request cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use framekit_core::{Axis, FeedRate, Result, XyPoint, POWER_OFF};

use crate::machine::{LocateMachine, LocateScreen};
use crate::params::{LocateParams, ParameterSource};
use crate::tracer::{FrameTracer, TraceStep};

/// Cloneable handle over a session's "locate mode active" flag
///
/// The session activates the flag on entry; any holder (typically the UI's
/// back/cancel action on the locate screen) may clear it. The drive loop
/// observes the flag once per iteration, at the top, so cancellation never
/// interrupts a slice in flight: a motion request already enqueued still
/// runs to completion, bounded by the slice size.
#[derive(Debug, Clone, Default)]
pub struct LocateToken {
    active: Arc<AtomicBool>,
}

impl LocateToken {
    /// Create an inactive token.
    pub fn new() -> Self {
        Self::default()
    }

    /// True while locate mode is active.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Request cancellation of the session holding this token.
    pub fn cancel(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    fn activate(&self) {
        self.active.store(true, Ordering::SeqCst);
    }
}

/// Hook invoked once per drive-loop iteration for platform display polling
pub type DisplayPollHook<'a> = Box<dyn FnMut() + 'a>;

/// Orchestrates one interactive locate session over a machine
///
/// The session borrows the machine for its whole lifetime; the embedding
/// gets it back when [`run`](LocateSession::run) returns.
pub struct LocateSession<'a, M: LocateMachine> {
    machine: &'a mut M,
    token: LocateToken,
    slice_override: Option<f32>,
    display_poll: Option<DisplayPollHook<'a>>,
}

impl<'a, M: LocateMachine> LocateSession<'a, M> {
    /// Create a session over the given machine with a fresh token.
    pub fn new(machine: &'a mut M) -> Self {
        Self {
            machine,
            token: LocateToken::new(),
            slice_override: None,
            display_poll: None,
        }
    }

    /// Override the tracer's slice bound for this session.
    pub fn with_slice(mut self, slice_mm: f32) -> Self {
        self.slice_override = Some(slice_mm);
        self
    }

    /// Install the platform display/touch polling step, if the platform
    /// has one.
    pub fn with_display_poll(mut self, hook: impl FnMut() + 'a) -> Self {
        self.display_poll = Some(Box::new(hook));
        self
    }

    /// Handle for external cancellation; hand a clone to the UI.
    pub fn token(&self) -> LocateToken {
        self.token.clone()
    }

    /// Run the session until the token is cancelled.
    ///
    /// Blocks the calling thread. Real-time duties (idle work, endstop
    /// polling, the optional display poll) are serviced once per loop
    /// iteration, between motion requests.
    pub fn run<S>(mut self, source: &S) -> Result<()>
    where
        S: ParameterSource + ?Sized,
    {
        // Start from a quiescent machine, then take over the display.
        self.machine.synchronize();
        self.token.activate();
        self.machine.defer_status_screen(true);
        self.machine.navigate_to(LocateScreen::Locate);

        let current_feed_rate = self.machine.feed_rate();
        let params = match LocateParams::resolve(source, current_feed_rate, &*self.machine) {
            Ok(params) => params,
            Err(err) => {
                // Nothing ran: give the display back and drop the flag.
                self.token.cancel();
                self.machine.defer_status_screen(false);
                return Err(err);
            }
        };

        info!(
            origin = %params.origin,
            size = %params.size,
            feed_rate = params.feed_rate,
            power = params.tool_power,
            "locate session started"
        );

        let mut tracer = match self.slice_override {
            Some(slice) => FrameTracer::with_slice(params.origin, params.size, slice),
            None => FrameTracer::new(&params),
        };

        while self.token.is_active() {
            match tracer.step() {
                TraceStep::Start { target } => {
                    self.machine.set_feed_rate(params.feed_rate);
                    self.machine.set_inline_power(params.tool_power);
                    self.enqueue(target, params.feed_rate);
                }
                TraceStep::Advance {
                    target,
                    edge_complete,
                } => {
                    if edge_complete {
                        // Be physically at the corner before turning.
                        self.machine.synchronize();
                        debug!(corner = %target, "edge complete");
                    }
                    self.enqueue(target, params.feed_rate);
                }
            }

            self.machine.idle_step();
            self.machine.poll_endstops();
            if let Some(hook) = self.display_poll.as_mut() {
                hook();
            }
        }

        // Offsets may have drifted while the head was steered around.
        self.machine.refresh_workspace_offset(Axis::X);
        self.machine.refresh_workspace_offset(Axis::Y);

        self.machine.set_inline_power(POWER_OFF);
        self.machine.set_feed_rate(params.prior_feed_rate);
        self.machine.defer_status_screen(false);

        info!("locate session finished");
        Ok(())
    }

    /// Issue the one motion request of this loop iteration.
    fn enqueue(&mut self, target: XyPoint, feed_rate: FeedRate) {
        let shifted = target - self.machine.workspace_offset();
        self.machine.enqueue_linear_move(shifted, feed_rate);
    }
}
