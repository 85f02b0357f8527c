use super::{Clock, StatsSource, run_cycle};
use crate::samples::TrackedKey;
use crate::store::SampleStore;
use core::time::Duration;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;

const LOG_TARGET: &str = "    poller";

/// Owns the polling task of every tracked game.
///
/// Each game is polled by its own task, so a slow or failing game never delays another.
/// Tasks fire at a fixed rate measured from [`start`](Self::start): a slow cycle does not
/// shift later fire times, and a fire time that passes while a cycle is still running is
/// skipped rather than queued.
#[derive(Debug)]
pub struct Supervisor {
    shutdown: watch::Sender<bool>,
    tasks: JoinSet<()>,
}

impl Supervisor {
    /// Start polling every key in `keys`, beginning immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<S, C>(keys: &[TrackedKey], interval: Duration, source: Arc<S>, store: SampleStore, clock: Arc<C>) -> Self
    where
        S: StatsSource + 'static,
        C: Clock + 'static,
    {
        let (shutdown, _) = watch::channel(false);
        let mut tasks = JoinSet::new();

        for &key in keys {
            let _ = tasks.spawn(poll_loop(
                key,
                interval,
                Arc::clone(&source),
                store.clone(),
                Arc::clone(&clock),
                shutdown.subscribe(),
            ));
        }

        log::info!(
            target: LOG_TARGET,
            "Polling {} game(s) every {}s",
            keys.len(),
            interval.as_secs()
        );

        Self { shutdown, tasks }
    }

    /// Stop all polling tasks and wait for them to exit.
    ///
    /// A cycle still waiting on the network is abandoned.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown.send(true);

        while let Some(result) = self.tasks.join_next().await {
            if let Err(e) = result {
                log::warn!(target: LOG_TARGET, "Polling task ended abnormally: {e:#}");
            }
        }

        log::info!(target: LOG_TARGET, "Stopped polling");
    }
}

async fn poll_loop<S, C>(
    key: TrackedKey,
    interval: Duration,
    source: Arc<S>,
    store: SampleStore,
    clock: Arc<C>,
    mut shutdown: watch::Receiver<bool>,
) where
    S: StatsSource,
    C: Clock,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = shutdown.changed() => break,
        }

        tokio::select! {
            _ = run_cycle(source.as_ref(), &store, clock.as_ref(), key) => {}
            _ = shutdown.changed() => break,
        }
    }

    log::debug!(target: LOG_TARGET, "Polling loop for game {key} exited");
}
