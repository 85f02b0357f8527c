use super::QueryResult;
use crate::samples::{GrowthPoint, History, Sample, TrackedKey};
use crate::store::SampleStore;
use futures_util::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Read-only view over the histories of the tracked games.
#[derive(Debug, Clone)]
pub struct Query {
    store: SampleStore,
    tracked: Arc<[TrackedKey]>,
}

impl Query {
    #[must_use]
    pub fn new(store: SampleStore, tracked: &[TrackedKey]) -> Self {
        Self {
            store,
            tracked: Arc::from(tracked),
        }
    }

    /// History of every tracked game, keyed by game.
    pub async fn all_data(&self) -> BTreeMap<TrackedKey, History> {
        let histories = join_all(self.tracked.iter().map(|&key| self.store.load(key))).await;
        self.tracked.iter().copied().zip(histories).collect()
    }

    /// Full history of the game identified by `id`.
    pub async fn history(&self, id: &str) -> QueryResult<History> {
        match self.resolve(id) {
            Some(key) => QueryResult::Found(self.store.load(key).await),
            None => QueryResult::NotTracked(id.to_string()),
        }
    }

    /// Growth figures of the game identified by `id`, one entry per sample.
    pub async fn growth(&self, id: &str) -> QueryResult<Vec<GrowthPoint>> {
        match self.history(id).await {
            QueryResult::Found(history) => QueryResult::Found(history.iter().map(Sample::growth_point).collect()),
            QueryResult::NotTracked(id) => QueryResult::NotTracked(id),
        }
    }

    /// Only the canonical decimal form of a tracked key names it.
    fn resolve(&self, id: &str) -> Option<TrackedKey> {
        let key = id.parse::<TrackedKey>().ok()?;
        (key.to_string() == id && self.tracked.contains(&key)).then_some(key)
    }
}
