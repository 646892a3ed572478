//! # FrameKit Core
//!
//! Core types and utilities for FrameKit.
//! Provides the geometry primitives, machine vocabulary, and error types
//! shared by the locate engine and its embeddings.

pub mod error;
pub mod types;

pub use error::{Error, Result};

pub use types::{Axis, FeedRate, PowerLevel, XyPoint, XySize, POWER_FULL, POWER_OFF};
