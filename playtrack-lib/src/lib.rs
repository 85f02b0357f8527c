#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for playtrack
//!
//! This library consolidates all functionality for the playtrack tool, which periodically
//! samples public game statistics, keeps a per-game history of those samples on disk, and
//! serves the accumulated time series over a small JSON API.
//!
//! # Module Organization
//!
//! - [`samples`]: Sample records and growth derivation
//! - [`store`]: Durable per-game sample histories
//! - [`poller`]: Remote fetching and the per-game timer loops
//! - [`query`]: Read-only projections and the HTTP surface
//! - [`commands`]: Command-line interface and orchestration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub mod poller;
pub mod query;
pub mod samples;
pub mod store;

pub use crate::commands::{Host, run};
