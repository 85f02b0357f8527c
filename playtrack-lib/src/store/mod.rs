//! Durable per-game sample histories
//!
//! Each tracked game owns exactly one record, `<id>.json`, inside the data directory. The
//! record holds the game's full history as a JSON array. Every append rewrites the whole
//! record by writing a temporary sibling and renaming it into place, so readers never see
//! a partially written history.

mod record_lock;
mod sample_store;

pub use sample_store::SampleStore;
