//! Read-only projections and the HTTP surface
//!
//! [`Query`] answers the three questions the dashboard asks: every tracked game's history,
//! one game's history, and one game's growth figures. It always reads through to the
//! [`SampleStore`](crate::store::SampleStore), so answers reflect the latest persisted
//! samples. [`router`] exposes the same projections as JSON endpoints.

mod projections;
mod query_result;
mod server;

pub use projections::Query;
pub use query_result::QueryResult;
pub use server::{router, serve, shutdown_signal};
