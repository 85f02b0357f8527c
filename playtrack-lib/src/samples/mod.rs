//! Sample records and growth derivation
//!
//! A [`Sample`] is one observation of a game's lifetime visit count and current player
//! count, along with the percentage change of each value relative to the previous
//! observation of the same game. Samples are created once and never modified.

mod growth;
mod sample;
mod tracked_key;

pub use growth::growth;
pub use sample::{GrowthPoint, History, Sample};
pub use tracked_key::TrackedKey;
