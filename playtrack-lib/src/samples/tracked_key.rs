use core::fmt::{Display, Formatter, Result as FmtResult};
use core::num::NonZeroU64;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Identifier of a game whose statistics are being tracked.
///
/// Keys are positive integers. The decimal form doubles as the name of the game's durable
/// record and as the path segment used by the query API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct TrackedKey(NonZeroU64);

impl TrackedKey {
    /// Create a key, returning `None` for zero.
    #[must_use]
    pub const fn new(id: u64) -> Option<Self> {
        match NonZeroU64::new(id) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl TryFrom<u64> for TrackedKey {
    type Error = String;

    fn try_from(id: u64) -> Result<Self, String> {
        Self::new(id).ok_or_else(|| "game identifiers must be positive integers, got 0".to_string())
    }
}

impl From<TrackedKey> for u64 {
    fn from(key: TrackedKey) -> Self {
        key.get()
    }
}

impl FromStr for TrackedKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        let id = s
            .trim()
            .parse::<u64>()
            .map_err(|e| format!("invalid game identifier '{s}': {e}"))?;
        Self::try_from(id)
    }
}

impl Display for TrackedKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}
