use crate::Result;
use crate::samples::TrackedKey;
use fs4::fs_std::FileExt;
use ohno::IntoAppError;
use std::fs::{File, OpenOptions};
use std::path::Path;

const LOG_TARGET: &str = "     store";

/// Guard that releases a record lock when dropped
#[derive(Debug)]
pub struct RecordLockGuard(File);

impl Drop for RecordLockGuard {
    fn drop(&mut self) {
        if let Err(e) = self.0.unlock() {
            log::warn!(target: LOG_TARGET, "Could not unlock record: {e:#}");
        }
    }
}

/// Acquire the exclusive write lock for one game's record.
///
/// The lock is an advisory file lock, so it also serializes writers living in other
/// processes sharing the same data directory.
pub async fn acquire_record_lock(dir: &Path, key: TrackedKey) -> Result<RecordLockGuard> {
    let lock_path = dir.join(format!("{key}.lock"));

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .into_app_err_with(|| format!("opening record lock file at '{}'", lock_path.display()))?;

    // May block for as long as another writer holds the lock
    let file = tokio::task::spawn_blocking(move || {
        file.lock_exclusive()
            .into_app_err_with(|| format!("acquiring exclusive lock on '{}'", lock_path.display()))?;
        log::trace!(target: LOG_TARGET, "Acquired record lock at '{}'", lock_path.display());
        Ok::<_, ohno::AppError>(file)
    })
    .await
    .into_app_err("lock task panicked")??;

    Ok(RecordLockGuard(file))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn key(id: u64) -> TrackedKey {
        TrackedKey::new(id).unwrap()
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_lock_file_named_after_key() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let lock_path = temp_dir.path().join("111.lock");

        assert!(!lock_path.exists());
        let guard = acquire_record_lock(temp_dir.path(), key(111)).await.unwrap();
        assert!(lock_path.exists());
        drop(guard);
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_lock_released_on_drop() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

        let guard = acquire_record_lock(temp_dir.path(), key(1)).await.unwrap();
        drop(guard);

        let guard2 = acquire_record_lock(temp_dir.path(), key(1)).await;
        let _ = guard2.unwrap();
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_different_keys_do_not_contend() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

        let first = acquire_record_lock(temp_dir.path(), key(1)).await.unwrap();
        let second = acquire_record_lock(temp_dir.path(), key(2)).await.unwrap();
        drop(first);
        drop(second);
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetFullPathNameW")]
    async fn test_nonexistent_directory() {
        let path = Path::new("this_directory_does_not_exist_at_all_98765");
        let _ = acquire_record_lock(path, key(1)).await.unwrap_err();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_exclusive_lock_blocks_second_writer() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let dir_path = temp_dir.path().to_path_buf();

        let guard = acquire_record_lock(&dir_path, key(9)).await.unwrap();
        let counter = Arc::new(AtomicU32::new(0));

        let c = Arc::clone(&counter);
        let d = dir_path.clone();
        let waiter = tokio::spawn(async move {
            let guard = acquire_record_lock(&d, key(9)).await.unwrap();
            let _ = c.fetch_add(1, Ordering::SeqCst);
            drop(guard);
        });

        tokio::time::sleep(core::time::Duration::from_millis(50)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        drop(guard);
        waiter.await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
