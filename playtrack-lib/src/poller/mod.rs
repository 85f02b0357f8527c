//! Remote fetching and the per-game timer loops
//!
//! The [`Supervisor`] owns one task per tracked game. Each task records a sample right away
//! and then once per poll interval. A cycle fetches the game's current statistics through a
//! [`StatsSource`], derives growth against the last stored sample, and appends the result to
//! the [`SampleStore`](crate::store::SampleStore). A failed cycle is logged and otherwise
//! ignored; the next one runs on schedule.

mod clock;
mod cycle;
#[cfg(any(debug_assertions, test))]
mod manual_clock;
mod remote;
mod supervisor;

pub use clock::{Clock, SystemClock};
pub use cycle::{record_cycle, run_cycle};
#[cfg(any(debug_assertions, test))]
pub use manual_clock::ManualClock;
pub use remote::{DEFAULT_API_BASE_URL, DEFAULT_FETCH_TIMEOUT, GameStats, RemoteClient, StatsSource};
pub use supervisor::Supervisor;
