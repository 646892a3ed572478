//! Locate request parameter resolution
//!
//! A locate request arrives as an already-tokenized command line. This
//! module reads the fixed parameter words out of it once, applies defaults
//! and the driver's power mapping, and produces the immutable
//! [`LocateParams`] the rest of the session runs on.

use serde::Serialize;
use tracing::debug;

use framekit_core::{Error, FeedRate, PowerLevel, Result, XyPoint, XySize};

use crate::machine::ToolDriver;

/// Query interface over an already-tokenized command line
///
/// Tokenization and syntax validation happen upstream; the resolver only
/// asks for presence and numeric value of fixed single-letter words.
pub trait ParameterSource {
    /// True if the named parameter word is present with a value.
    fn has(&self, word: char) -> bool;

    /// Numeric value of the named parameter word, in linear units (mm).
    fn numeric_value(&self, word: char) -> f32;
}

/// Parameter word carrying the frame origin X coordinate.
pub const WORD_ORIGIN_X: char = 'X';
/// Parameter word carrying the frame origin Y coordinate.
pub const WORD_ORIGIN_Y: char = 'Y';
/// Parameter word carrying the frame width.
pub const WORD_SIZE_X: char = 'I';
/// Parameter word carrying the frame height.
pub const WORD_SIZE_Y: char = 'J';
/// Parameter word carrying the optional tool power override.
pub const WORD_POWER: char = 'S';
/// Parameter word carrying the optional feed rate override.
pub const WORD_FEED_RATE: char = 'F';

/// Logical power requested when no `S` override is given.
///
/// Just enough for a visible tracing beam on typical diode lasers.
pub const DEFAULT_TRACE_POWER: f32 = 2.0;

/// Immutable inputs of one locate session
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LocateParams {
    /// Corner of the frame the walk starts from.
    pub origin: XyPoint,
    /// Extent of the frame.
    pub size: XySize,
    /// Feed rate the frame is traced at.
    pub feed_rate: FeedRate,
    /// Machine feed rate captured at resolution time, restored on exit.
    pub prior_feed_rate: FeedRate,
    /// Mapped tool power the frame is traced with.
    pub tool_power: PowerLevel,
}

impl LocateParams {
    /// Resolve a locate request against a parameter source.
    ///
    /// All four geometry words (`X`, `Y`, `I`, `J`) are mandatory; the
    /// first absent one fails resolution before any other effect. The `S`
    /// power word defaults to [`DEFAULT_TRACE_POWER`] and is always passed
    /// through the driver's power mapping. A positive `F` word overrides
    /// `current_feed_rate`; a non-positive one is ignored.
    pub fn resolve<S, T>(source: &S, current_feed_rate: FeedRate, tool: &T) -> Result<Self>
    where
        S: ParameterSource + ?Sized,
        T: ToolDriver + ?Sized,
    {
        let mut coords = [0.0f32; 4];
        let words = [WORD_ORIGIN_X, WORD_ORIGIN_Y, WORD_SIZE_X, WORD_SIZE_Y];
        for (slot, word) in coords.iter_mut().zip(words) {
            if !source.has(word) {
                return Err(Error::MissingParameter { word });
            }
            *slot = source.numeric_value(word);
        }

        let origin = XyPoint::new(coords[0], coords[1]);
        let size = XySize::new(coords[2], coords[3]);

        let requested_power = if source.has(WORD_POWER) {
            source.numeric_value(WORD_POWER)
        } else {
            DEFAULT_TRACE_POWER
        };
        let tool_power = tool.map_power(requested_power);

        let feed_word = if source.has(WORD_FEED_RATE) {
            source.numeric_value(WORD_FEED_RATE)
        } else {
            0.0
        };
        debug!(feed = feed_word, "observed feed rate parameter");

        let feed_rate = if feed_word > 0.0 {
            debug!(feed_rate = feed_word, "feed rate override accepted");
            feed_word
        } else {
            current_feed_rate
        };

        Ok(Self {
            origin,
            size,
            feed_rate,
            prior_feed_rate: current_feed_rate,
            tool_power,
        })
    }
}
