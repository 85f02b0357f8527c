//! Client for the public game statistics API.

use crate::Result;
use crate::samples::TrackedKey;
use core::time::Duration;
use ohno::{IntoAppError, app_err, bail};
use serde_json::Value;
use url::Url;

const LOG_TARGET: &str = "    remote";

/// Default endpoint of the game statistics API.
pub const DEFAULT_API_BASE_URL: &str = "https://games.roblox.com/v1/games";

/// Default upper bound on a single fetch, including reading the body.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Current statistics of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameStats {
    /// Lifetime visit count.
    pub visits: u64,

    /// Number of players currently in the game.
    pub playing: u64,
}

/// Something that can report the current statistics of a game.
pub trait StatsSource: Send + Sync {
    fn fetch(&self, key: TrackedKey) -> impl Future<Output = Result<GameStats>> + Send;
}

/// [`StatsSource`] backed by the public HTTP API.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl RemoteClient {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).into_app_err_with(|| format!("invalid API base URL '{base_url}'"))?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("playtrack/", env!("CARGO_PKG_VERSION")))
            .build()
            .into_app_err("unable to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// URL queried for `key`.
    #[must_use]
    pub fn url_for(&self, key: TrackedKey) -> Url {
        let mut url = self.base_url.clone();
        let _ = url.query_pairs_mut().append_pair("universeIds", &key.to_string());
        url
    }

    async fn fetch_core(&self, key: TrackedKey) -> Result<GameStats> {
        let url = self.url_for(key);
        log::debug!(target: LOG_TARGET, "Fetching statistics for game {key} from {url}");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .into_app_err_with(|| format!("requesting statistics for game {key}"))?;

        let status = resp.status();
        if !status.is_success() {
            bail!("statistics API returned {status} for game {key}");
        }

        let body: Value = resp
            .json()
            .await
            .into_app_err_with(|| format!("decoding statistics response for game {key}"))?;

        parse_stats(&body, key)
    }
}

impl StatsSource for RemoteClient {
    async fn fetch(&self, key: TrackedKey) -> Result<GameStats> {
        tokio::time::timeout(self.timeout, self.fetch_core(key))
            .await
            .into_app_err_with(|| format!("request for game {key} timed out after {}s", self.timeout.as_secs_f64()))?
    }
}

/// Extract the statistics of `key` from an API response body.
///
/// The body must carry a non-empty `data` array whose first element is an object. Inside
/// that entry, `visits` and `playing` fall back to zero when absent or not numeric.
pub(crate) fn parse_stats(body: &Value, key: TrackedKey) -> Result<GameStats> {
    let entry = body
        .get("data")
        .and_then(Value::as_array)
        .and_then(|data| data.first())
        .and_then(Value::as_object)
        .ok_or_else(|| app_err!("statistics response for game {key} has no data entry"))?;

    Ok(GameStats {
        visits: coerce_count(entry.get("visits")),
        playing: coerce_count(entry.get("playing")),
    })
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "value is checked to be finite and positive")]
fn coerce_count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n.as_u64().unwrap_or_else(|| match n.as_f64() {
            Some(f) if f.is_finite() && f > 0.0 => f as u64,
            _ => 0,
        }),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}
