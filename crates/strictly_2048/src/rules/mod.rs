//! Move resolution rules.
//!
//! This module contains pure functions for sliding, merging, and
//! end-of-game detection. Rules are separated from state composition
//! to enable evaluation by the contract system and by harnesses that
//! want resolution without randomness.

pub mod over;
pub mod shift;

pub use over::{has_moves, movable_directions};
pub use shift::{ShiftOutcome, shift};
