//! In-memory machine simulation
//!
//! Stands in for firmware behind the locate capability traits: a motion
//! queue that records every issued move, machine-wide feed rate and
//! workspace offset, inline tool power, and display state. The `framekit`
//! binary drives a full locate session against it.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use framekit_core::{Axis, FeedRate, PowerLevel, XyPoint, POWER_OFF};
use framekit_locate::{
    pwm_power, DisplayControl, LocateScreen, MotionExecutor, ParameterSource, SystemServices,
    ToolDriver,
};

/// One recorded motion request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveRecord {
    /// Shifted target the executor was asked to reach.
    pub target: XyPoint,
    /// Feed rate of the request, mm/min.
    pub feed_rate: FeedRate,
}

/// Simulated machine implementing every locate capability
///
/// Motion is modeled as a queue depth plus a head position that jumps to
/// each target; `synchronize` drains the queue instantly. Good enough to
/// observe the locate engine's externally visible behavior.
#[derive(Debug)]
pub struct SimMachine {
    feed_rate: FeedRate,
    workspace_offset: XyPoint,
    tool_power: PowerLevel,
    screen: LocateScreen,
    status_deferred: bool,
    position: XyPoint,
    queue_depth: usize,
    moves: Vec<MoveRecord>,
    traveled_mm: f32,
    synchronize_count: u32,
    idle_count: u64,
    endstop_polls: u64,
}

impl SimMachine {
    /// Create a simulated machine idling at the given feed rate.
    pub fn new(feed_rate: FeedRate) -> Self {
        Self {
            feed_rate,
            workspace_offset: XyPoint::default(),
            tool_power: POWER_OFF,
            screen: LocateScreen::Status,
            status_deferred: false,
            position: XyPoint::default(),
            queue_depth: 0,
            moves: Vec::new(),
            traveled_mm: 0.0,
            synchronize_count: 0,
            idle_count: 0,
            endstop_polls: 0,
        }
    }

    /// Apply a workspace offset to the simulated executor.
    pub fn with_workspace_offset(mut self, offset: XyPoint) -> Self {
        self.workspace_offset = offset;
        self
    }

    /// Every motion request recorded so far.
    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    /// Total path length of the recorded moves, mm.
    pub fn traveled_mm(&self) -> f32 {
        self.traveled_mm
    }

    /// Number of queue drains performed.
    pub fn synchronize_count(&self) -> u32 {
        self.synchronize_count
    }

    /// Current inline tool power.
    pub fn tool_power(&self) -> PowerLevel {
        self.tool_power
    }

    /// Screen the display currently shows.
    pub fn screen(&self) -> LocateScreen {
        self.screen
    }

    /// Whether automatic status screens are currently deferred.
    pub fn status_deferred(&self) -> bool {
        self.status_deferred
    }

    /// Idle/housekeeping rounds serviced.
    pub fn idle_count(&self) -> u64 {
        self.idle_count
    }

    /// Endstop polls serviced.
    pub fn endstop_polls(&self) -> u64 {
        self.endstop_polls
    }
}

impl MotionExecutor for SimMachine {
    fn enqueue_linear_move(&mut self, target: XyPoint, feed_rate: FeedRate) {
        trace!(to = %target, feed_rate, "enqueue linear move");
        let dx = target.x - self.position.x;
        let dy = target.y - self.position.y;
        self.traveled_mm += (dx * dx + dy * dy).sqrt();
        self.position = target;
        self.queue_depth += 1;
        self.moves.push(MoveRecord { target, feed_rate });
    }

    fn synchronize(&mut self) {
        debug!(queued = self.queue_depth, "synchronize: draining motion queue");
        self.queue_depth = 0;
        self.synchronize_count += 1;
    }

    fn feed_rate(&self) -> FeedRate {
        self.feed_rate
    }

    fn set_feed_rate(&mut self, rate: FeedRate) {
        debug!(rate, "set feed rate");
        self.feed_rate = rate;
    }

    fn workspace_offset(&self) -> XyPoint {
        self.workspace_offset
    }

    fn refresh_workspace_offset(&mut self, axis: Axis) {
        debug!(axis = %axis, "refresh workspace offset");
    }
}

impl ToolDriver for SimMachine {
    fn set_inline_power(&mut self, power: PowerLevel) {
        debug!(power, "set inline power");
        self.tool_power = power;
    }

    fn map_power(&self, requested: f32) -> PowerLevel {
        pwm_power(requested)
    }
}

impl DisplayControl for SimMachine {
    fn navigate_to(&mut self, screen: LocateScreen) {
        debug!(?screen, "navigate");
        self.screen = screen;
    }

    fn defer_status_screen(&mut self, defer: bool) {
        self.status_deferred = defer;
    }
}

impl SystemServices for SimMachine {
    fn idle_step(&mut self) {
        self.idle_count += 1;
    }

    fn poll_endstops(&mut self) {
        self.endstop_polls += 1;
    }
}

/// Parsed parameter words of a G-code style command line
///
/// The tokenizer the locate core treats as an external collaborator: splits
/// `"X0 Y0 I40 J30 S2 F900"` into letter/value words.
#[derive(Debug, Clone, Default)]
pub struct CommandWords {
    words: HashMap<char, f32>,
}

impl CommandWords {
    /// Parse a whitespace-separated word list.
    ///
    /// Tokens without a parsable numeric value are dropped with a warning;
    /// the locate resolver then treats the word as absent.
    pub fn parse(line: &str) -> Self {
        let mut words = HashMap::new();
        for token in line.split_whitespace() {
            let mut chars = token.chars();
            let Some(letter) = chars.next() else {
                continue;
            };
            match chars.as_str().parse::<f32>() {
                Ok(value) => {
                    words.insert(letter.to_ascii_uppercase(), value);
                }
                Err(_) => warn!(token, "ignoring malformed parameter word"),
            }
        }
        Self { words }
    }
}

impl ParameterSource for CommandWords {
    fn has(&self, word: char) -> bool {
        self.words.contains_key(&word)
    }

    fn numeric_value(&self, word: char) -> f32 {
        self.words.get(&word).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_words() {
        let words = CommandWords::parse("X0 y-2.5 I40 J30 F900");
        assert!(words.has('X'));
        assert!(words.has('Y'));
        assert_eq!(words.numeric_value('Y'), -2.5);
        assert_eq!(words.numeric_value('F'), 900.0);
        assert!(!words.has('S'));
    }

    #[test]
    fn test_parse_drops_valueless_words() {
        let words = CommandWords::parse("X1 J");
        assert!(words.has('X'));
        assert!(!words.has('J'));
    }

    #[test]
    fn test_machine_records_moves_and_travel() {
        let mut machine = SimMachine::new(600.0);
        machine.enqueue_linear_move(XyPoint::new(3.0, 4.0), 600.0);
        machine.enqueue_linear_move(XyPoint::new(3.0, 0.0), 600.0);
        assert_eq!(machine.moves().len(), 2);
        assert_eq!(machine.traveled_mm(), 9.0);

        machine.synchronize();
        assert_eq!(machine.synchronize_count(), 1);
    }
}
