use super::record_lock::acquire_record_lock;
use crate::Result;
use crate::samples::{History, Sample, TrackedKey};
use ohno::IntoAppError;
use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

const LOG_TARGET: &str = "     store";

/// Reads and writes the sample histories of tracked games.
///
/// The store keeps no state in memory: every [`load`](Self::load) reads the record back
/// from disk, so readers always observe the most recently persisted history. File access
/// runs on the blocking thread pool.
#[derive(Debug, Clone)]
pub struct SampleStore {
    dir: PathBuf,
}

impl SampleStore {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { dir: data_dir.into() }
    }

    /// Returns the data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the durable record for `key`.
    #[must_use]
    pub fn record_path(&self, key: TrackedKey) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Load the full history of `key`.
    ///
    /// A missing or unreadable record yields an empty history. The two cases are only
    /// told apart in the logs.
    pub async fn load(&self, key: TrackedKey) -> History {
        let path = self.record_path(key);

        match tokio::task::spawn_blocking(move || read_history(&path, key)).await {
            Ok(history) => history,
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Reading history of game {key} did not complete, treating it as empty: {e:#}");
                History::new()
            }
        }
    }

    /// Append `sample` to the history of `key`.
    ///
    /// The whole history is loaded, extended, and written back in full. Concurrent
    /// appends to the same key are serialized through an exclusive record lock.
    pub async fn append(&self, key: TrackedKey, sample: Sample) -> Result<()> {
        let _ = self.append_with(key, move |_| sample).await?;
        Ok(())
    }

    /// Load the current history, let `build` derive the next sample from it, and append.
    ///
    /// Unlike calling [`load`](Self::load) followed by [`append`](Self::append), the
    /// derivation happens while the record lock is held, so the new sample is always
    /// computed against the true last element of the history.
    pub async fn append_with<F>(&self, key: TrackedKey, build: F) -> Result<Sample>
    where
        F: FnOnce(&History) -> Sample + Send + 'static,
    {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .into_app_err_with(|| format!("creating data directory '{}'", self.dir.display()))?;

        let guard = acquire_record_lock(&self.dir, key).await?;
        let store = self.clone();

        // Lock stays held until the write finishes, even if the caller is dropped
        tokio::task::spawn_blocking(move || {
            let _guard = guard;

            let mut history = read_history(&store.record_path(key), key);
            let sample = build(&history);
            history.push(sample.clone());
            store.write_history(key, &history)?;

            Ok::<_, ohno::AppError>(sample)
        })
        .await
        .into_app_err("record write task panicked")?
    }

    fn write_history(&self, key: TrackedKey, history: &History) -> Result<()> {
        let path = self.record_path(key);
        let tmp_path = self.dir.join(format!("{key}.json.tmp"));

        let file = File::create(&tmp_path).into_app_err_with(|| format!("creating record file '{}'", tmp_path.display()))?;
        let mut writer = BufWriter::new(file);

        #[cfg(debug_assertions)]
        let result = serde_json::to_writer_pretty(&mut writer, history);
        #[cfg(not(debug_assertions))]
        let result = serde_json::to_writer(&mut writer, history);

        result.into_app_err_with(|| format!("writing record file '{}'", tmp_path.display()))?;

        let file = writer
            .into_inner()
            .into_app_err_with(|| format!("flushing record file '{}'", tmp_path.display()))?;
        file.sync_all()
            .into_app_err_with(|| format!("syncing record file '{}'", tmp_path.display()))?;
        drop(file);

        fs::rename(&tmp_path, &path).into_app_err_with(|| format!("replacing record file '{}'", path.display()))?;

        log::debug!(target: LOG_TARGET, "Wrote {} sample(s) for game {key} to '{}'", history.len(), path.display());
        Ok(())
    }
}

fn read_history(path: &Path, key: TrackedKey) -> History {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!(target: LOG_TARGET, "No history yet for game {key}");
            return History::new();
        }
        Err(e) => {
            log::warn!(target: LOG_TARGET, "Could not open '{}', treating history of game {key} as empty: {e:#}", path.display());
            return History::new();
        }
    };

    match serde_json::from_reader(BufReader::new(file)) {
        Ok(history) => history,
        Err(e) => {
            log::warn!(target: LOG_TARGET, "Could not parse '{}', treating history of game {key} as empty: {e:#}", path.display());
            History::new()
        }
    }
}
