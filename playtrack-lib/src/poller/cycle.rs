use super::{Clock, StatsSource};
use crate::Result;
use crate::samples::{Sample, TrackedKey};
use crate::store::SampleStore;

const LOG_TARGET: &str = "    poller";

/// Fetch the current statistics of `key` and append them to its history.
///
/// Growth is derived against the last stored sample while the record is locked. The new
/// sample is never timestamped before its predecessor, even if the clock steps backwards.
pub async fn record_cycle<S, C>(source: &S, store: &SampleStore, clock: &C, key: TrackedKey) -> Result<Sample>
where
    S: StatsSource,
    C: Clock + ?Sized,
{
    let stats = source.fetch(key).await?;
    let now = clock.now();

    store
        .append_with(key, move |history| {
            let previous = history.last();
            let timestamp = previous.map_or(now, |p| now.max(p.timestamp));
            Sample::next(previous, timestamp, stats.visits, stats.playing)
        })
        .await
}

/// Run one cycle for `key`, logging the outcome.
///
/// Returns whether a sample was recorded. Failures never propagate.
pub async fn run_cycle<S, C>(source: &S, store: &SampleStore, clock: &C, key: TrackedKey) -> bool
where
    S: StatsSource,
    C: Clock + ?Sized,
{
    match record_cycle(source, store, clock, key).await {
        Ok(sample) => {
            log::info!(target: LOG_TARGET, "{}", summarize(key, &sample));
            true
        }
        Err(e) => {
            log::error!(target: LOG_TARGET, "Could not record sample for game {key}: {e:#}");
            false
        }
    }
}

fn summarize(key: TrackedKey, sample: &Sample) -> String {
    format!(
        "game {key}: visits={} ({:+.2}%) playing={} ({:+.2}%)",
        sample.visits, sample.visits_growth, sample.playing, sample.playing_growth
    )
}
