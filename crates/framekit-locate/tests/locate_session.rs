//! End-to-end tests of the locate session controller against a recording
//! machine rig.

use std::collections::HashMap;

use framekit_core::{Axis, FeedRate, PowerLevel, XyPoint};
use framekit_locate::{
    pwm_power, DisplayControl, LocateScreen, LocateSession, MotionExecutor, ParameterSource,
    SystemServices, ToolDriver,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Synchronize,
    Enqueue(XyPoint, FeedRate),
    SetFeedRate(FeedRate),
    SetPower(PowerLevel),
    NavigateTo(LocateScreen),
    DeferStatus(bool),
    RefreshOffset(Axis),
    Idle,
    PollEndstops,
}

/// Recording machine: every mutating capability call lands in `calls`.
struct RigMachine {
    calls: Vec<Call>,
    feed_rate: FeedRate,
    workspace_offset: XyPoint,
}

impl RigMachine {
    fn new(feed_rate: FeedRate) -> Self {
        Self {
            calls: Vec::new(),
            feed_rate,
            workspace_offset: XyPoint::default(),
        }
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    fn enqueued_targets(&self) -> Vec<XyPoint> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Enqueue(target, _) => Some(*target),
                _ => None,
            })
            .collect()
    }
}

impl MotionExecutor for RigMachine {
    fn enqueue_linear_move(&mut self, target: XyPoint, feed_rate: FeedRate) {
        self.calls.push(Call::Enqueue(target, feed_rate));
    }

    fn synchronize(&mut self) {
        self.calls.push(Call::Synchronize);
    }

    fn feed_rate(&self) -> FeedRate {
        self.feed_rate
    }

    fn set_feed_rate(&mut self, rate: FeedRate) {
        self.feed_rate = rate;
        self.calls.push(Call::SetFeedRate(rate));
    }

    fn workspace_offset(&self) -> XyPoint {
        self.workspace_offset
    }

    fn refresh_workspace_offset(&mut self, axis: Axis) {
        self.calls.push(Call::RefreshOffset(axis));
    }
}

impl ToolDriver for RigMachine {
    fn set_inline_power(&mut self, power: PowerLevel) {
        self.calls.push(Call::SetPower(power));
    }

    fn map_power(&self, requested: f32) -> PowerLevel {
        pwm_power(requested)
    }
}

impl DisplayControl for RigMachine {
    fn navigate_to(&mut self, screen: LocateScreen) {
        self.calls.push(Call::NavigateTo(screen));
    }

    fn defer_status_screen(&mut self, defer: bool) {
        self.calls.push(Call::DeferStatus(defer));
    }
}

impl SystemServices for RigMachine {
    fn idle_step(&mut self) {
        self.calls.push(Call::Idle);
    }

    fn poll_endstops(&mut self) {
        self.calls.push(Call::PollEndstops);
    }
}

struct Words(HashMap<char, f32>);

impl Words {
    fn new(line: &[(char, f32)]) -> Self {
        Self(line.iter().copied().collect())
    }
}

impl ParameterSource for Words {
    fn has(&self, word: char) -> bool {
        self.0.contains_key(&word)
    }

    fn numeric_value(&self, word: char) -> f32 {
        self.0.get(&word).copied().unwrap_or(0.0)
    }
}

/// Run a 20x10 frame at slice 10, cancelling after `iterations` loop turns.
fn run_frame(machine: &mut RigMachine, iterations: u32) {
    let words = Words::new(&[('X', 0.0), ('Y', 0.0), ('I', 20.0), ('J', 10.0), ('F', 900.0)]);

    let session = LocateSession::new(machine).with_slice(10.0);
    let token = session.token();
    let mut remaining = iterations;
    let session = session.with_display_poll(move || {
        remaining -= 1;
        if remaining == 0 {
            token.cancel();
        }
    });

    session.run(&words).unwrap();
}

#[test]
fn test_full_session_call_sequence() {
    let mut machine = RigMachine::new(600.0);
    run_frame(&mut machine, 9);

    use Call::*;
    let p = |x, y| XyPoint::new(x, y);
    let expected = vec![
        // Entry: quiesce, take over the display.
        Synchronize,
        DeferStatus(true),
        NavigateTo(LocateScreen::Locate),
        // Iteration 1: arm the tool, move to the frame origin.
        SetFeedRate(900.0),
        SetPower(2),
        Enqueue(p(0.0, 0.0), 900.0),
        Idle,
        PollEndstops,
        // Bottom edge: two full slices, then the completing zero step.
        Enqueue(p(10.0, 0.0), 900.0),
        Idle,
        PollEndstops,
        Enqueue(p(20.0, 0.0), 900.0),
        Idle,
        PollEndstops,
        Synchronize,
        Enqueue(p(20.0, 0.0), 900.0),
        Idle,
        PollEndstops,
        // Right edge.
        Enqueue(p(20.0, 10.0), 900.0),
        Idle,
        PollEndstops,
        Synchronize,
        Enqueue(p(20.0, 10.0), 900.0),
        Idle,
        PollEndstops,
        // Top edge, walking back toward origin X.
        Enqueue(p(10.0, 10.0), 900.0),
        Idle,
        PollEndstops,
        Enqueue(p(0.0, 10.0), 900.0),
        Idle,
        PollEndstops,
        Synchronize,
        Enqueue(p(0.0, 10.0), 900.0),
        Idle,
        PollEndstops,
        // Exit after cancellation: offsets, power, feed rate, display.
        RefreshOffset(Axis::X),
        RefreshOffset(Axis::Y),
        SetPower(0),
        SetFeedRate(600.0),
        DeferStatus(false),
    ];

    assert_eq!(machine.calls, expected);
}

#[test]
fn test_one_motion_request_per_iteration() {
    let mut machine = RigMachine::new(600.0);
    run_frame(&mut machine, 23);

    let enqueues = machine.count(|c| matches!(c, Call::Enqueue(..)));
    let idles = machine.count(|c| matches!(c, Call::Idle));
    let polls = machine.count(|c| matches!(c, Call::PollEndstops));
    assert_eq!(enqueues, 23);
    assert_eq!(idles, 23);
    assert_eq!(polls, 23);
}

#[test]
fn test_synchronize_once_per_completed_edge() {
    let mut machine = RigMachine::new(600.0);
    // 23 iterations: init + two full laps of the 20x10 frame (10 each),
    // plus two steps into the third lap.
    run_frame(&mut machine, 23);

    // One entry drain plus one per completed edge (4 per lap).
    let syncs = machine.count(|c| matches!(c, Call::Synchronize));
    assert_eq!(syncs, 1 + 8);

    // Every corner drain happens immediately before the completing move.
    for (i, call) in machine.calls.iter().enumerate().skip(1) {
        if matches!(call, Call::Synchronize) {
            assert!(
                matches!(machine.calls[i + 1], Call::Enqueue(..)),
                "corner synchronize at {} not followed by its completing move",
                i
            );
        }
    }
}

#[test]
fn test_no_motion_after_cancellation() {
    let mut machine = RigMachine::new(600.0);
    run_frame(&mut machine, 5);

    // The flag is observed at the top of the next iteration: the iteration
    // that saw the cancel is the last to enqueue motion, and the exit
    // restoration runs in order after it.
    assert_eq!(machine.count(|c| matches!(c, Call::Enqueue(..))), 5);

    use Call::*;
    assert_eq!(
        machine.calls[machine.calls.len() - 5..],
        [
            RefreshOffset(Axis::X),
            RefreshOffset(Axis::Y),
            SetPower(0),
            SetFeedRate(600.0),
            DeferStatus(false),
        ]
    );
}

#[test]
fn test_workspace_offset_applied_to_targets() {
    let words = Words::new(&[('X', 5.0), ('Y', 5.0), ('I', 4.0), ('J', 4.0)]);

    let mut machine = RigMachine::new(600.0);
    machine.workspace_offset = XyPoint::new(1.0, -2.0);

    let session = LocateSession::new(&mut machine).with_slice(10.0);
    let token = session.token();
    let mut remaining = 3;
    let session = session.with_display_poll(move || {
        remaining -= 1;
        if remaining == 0 {
            token.cancel();
        }
    });
    session.run(&words).unwrap();

    // Logical (5,5) minus the (1,-2) shift, then one edge step to x=9.
    assert_eq!(
        machine.enqueued_targets()[..2],
        [XyPoint::new(4.0, 7.0), XyPoint::new(8.0, 7.0)]
    );
}

#[test]
fn test_resolution_failure_releases_display_and_flag() {
    let words = Words::new(&[('X', 0.0), ('Y', 0.0), ('I', 20.0)]);

    let mut machine = RigMachine::new(600.0);
    let session = LocateSession::new(&mut machine);
    let token = session.token();
    let err = session.run(&words).unwrap_err();

    assert_eq!(err, framekit_core::Error::MissingParameter { word: 'J' });
    assert!(!token.is_active());

    use Call::*;
    assert_eq!(
        machine.calls,
        vec![
            Synchronize,
            DeferStatus(true),
            NavigateTo(LocateScreen::Locate),
            DeferStatus(false),
        ]
    );
}

#[test]
fn test_restored_feed_rate_survives_override() {
    let mut machine = RigMachine::new(450.0);
    run_frame(&mut machine, 4);
    assert_eq!(machine.feed_rate, 450.0);
}
