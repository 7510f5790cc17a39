//! Business-day oracle backed by a public-holiday feed.
//!
//! Answers "is this date a business day?" by combining the weekend rule
//! with a per-year holiday set fetched from an external feed. The feed is
//! slow and unreliable, so holiday sets are cached with a TTL and each
//! year's refresh is single-flight: concurrent misses trigger exactly one
//! upstream fetch and share its result.
//!
//! # Failure policy
//!
//! - Refresh fails but a previous set exists (even expired): serve it.
//! - Refresh fails and nothing was ever cached: the error propagates and
//!   the caller must treat the business-day status as indeterminable.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Weekday};
use tokio::sync::{Mutex, RwLock};

/// How long a fetched holiday set stays fresh.
pub const HOLIDAY_CACHE_TTL: Duration = Duration::from_secs(12 * 60 * 60);

/// Per-request timeout for the upstream feed.
const FEED_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors from the holiday feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("holiday feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("holiday feed unavailable: {0}")]
    Unavailable(String),
}

/// One holiday entry as returned by the feed.
///
/// Entries are decoded leniently: one missing a field, carrying a
/// non-string value, or holding an unparseable date is skipped rather than
/// failing the whole set. Only an unparseable response body counts as a
/// fetch failure.
#[derive(Debug, Clone)]
pub struct HolidayEntry {
    pub date: String,
    pub name: String,
}

/// Source of per-year holiday sets.
///
/// A trait so tests can substitute a scripted feed for the HTTP client.
#[async_trait]
pub trait HolidayFeed: Send + Sync {
    async fn fetch(&self, year: i32) -> Result<Vec<HolidayEntry>, FeedError>;
}

/// HTTP holiday feed in the BrasilAPI shape: `GET {base}/{year}` returns a
/// JSON array of `{date, name}` entries.
pub struct BrasilApiFeed {
    client: reqwest::Client,
    base_url: String,
}

impl BrasilApiFeed {
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(FEED_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl HolidayFeed for BrasilApiFeed {
    async fn fetch(&self, year: i32) -> Result<Vec<HolidayEntry>, FeedError> {
        let url = format!("{}/{}", self.base_url, year);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(FeedError::Unavailable(format!(
                "holiday feed returned status {}",
                response.status()
            )));
        }

        let raw: Vec<serde_json::Value> = response.json().await?;
        Ok(decode_entries(raw))
    }
}

/// Decode feed entries one by one, dropping any that are not an object
/// with string `date` and `name` fields.
fn decode_entries(raw: Vec<serde_json::Value>) -> Vec<HolidayEntry> {
    raw.into_iter()
        .filter_map(|entry| {
            match (
                entry.get("date").and_then(|value| value.as_str()),
                entry.get("name").and_then(|value| value.as_str()),
            ) {
                (Some(date), Some(name)) => Some(HolidayEntry {
                    date: date.to_string(),
                    name: name.to_string(),
                }),
                _ => {
                    tracing::warn!(%entry, "skipping structurally malformed holiday entry");
                    None
                }
            }
        })
        .collect()
}

/// A fully-formed holiday set for one year, replaced wholesale on refresh.
struct HolidaySet {
    dates: HashSet<NaiveDate>,
    fetched_at: Instant,
}

/// Cache slot for one year.
///
/// `refresh` admits at most one fetch in flight per year; readers only
/// ever see `holidays` as absent or fully formed, never mid-update.
struct YearSlot {
    holidays: RwLock<Option<Arc<HolidaySet>>>,
    refresh: Mutex<()>,
}

/// Answers `is_business_day` with a read-through, single-flight cache over
/// the holiday feed.
///
/// Constructed once at startup and shared by reference; holds the only
/// mutable state in the transfer path.
pub struct BusinessDayOracle {
    feed: Arc<dyn HolidayFeed>,
    ttl: Duration,
    years: RwLock<HashMap<i32, Arc<YearSlot>>>,
}

impl BusinessDayOracle {
    pub fn new(feed: Arc<dyn HolidayFeed>) -> Self {
        Self::with_ttl(feed, HOLIDAY_CACHE_TTL)
    }

    pub fn with_ttl(feed: Arc<dyn HolidayFeed>, ttl: Duration) -> Self {
        Self {
            feed,
            ttl,
            years: RwLock::new(HashMap::new()),
        }
    }

    /// Whether `date` is a business day: not a weekend day and not a listed
    /// public holiday.
    ///
    /// Weekends are decided locally with no feed access. For weekdays the
    /// holiday set for `date`'s calendar year is consulted through the
    /// cache.
    ///
    /// # Errors
    ///
    /// Fails only when the feed is unreachable and no holiday set (fresh or
    /// stale) has ever been cached for that year.
    pub async fn is_business_day(&self, date: NaiveDate) -> Result<bool, FeedError> {
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            return Ok(false);
        }

        let holidays = self.holidays_for(date.year()).await?;
        Ok(!holidays.dates.contains(&date))
    }

    /// Read-through lookup of the holiday set for `year`.
    async fn holidays_for(&self, year: i32) -> Result<Arc<HolidaySet>, FeedError> {
        let slot = self.slot(year).await;

        if let Some(set) = Self::fresh(&slot, self.ttl).await {
            return Ok(set);
        }

        // Single-flight: one caller refreshes, late arrivals wait here and
        // then re-check instead of fetching again.
        let _refresh = slot.refresh.lock().await;
        if let Some(set) = Self::fresh(&slot, self.ttl).await {
            return Ok(set);
        }

        match self.feed.fetch(year).await {
            Ok(entries) => {
                let set = Arc::new(HolidaySet {
                    dates: parse_entries(entries),
                    fetched_at: Instant::now(),
                });
                tracing::debug!(year, holidays = set.dates.len(), "holiday set refreshed");
                *slot.holidays.write().await = Some(Arc::clone(&set));
                Ok(set)
            }
            Err(err) => {
                // Prefer a stale set over failing the business-day check.
                if let Some(stale) = slot.holidays.read().await.clone() {
                    tracing::warn!(year, error = %err, "holiday feed refresh failed, serving cached set");
                    return Ok(stale);
                }
                Err(err)
            }
        }
    }

    async fn slot(&self, year: i32) -> Arc<YearSlot> {
        if let Some(slot) = self.years.read().await.get(&year) {
            return Arc::clone(slot);
        }

        let mut years = self.years.write().await;
        Arc::clone(years.entry(year).or_insert_with(|| {
            Arc::new(YearSlot {
                holidays: RwLock::new(None),
                refresh: Mutex::new(()),
            })
        }))
    }

    async fn fresh(slot: &YearSlot, ttl: Duration) -> Option<Arc<HolidaySet>> {
        slot.holidays
            .read()
            .await
            .as_ref()
            .filter(|set| set.fetched_at.elapsed() < ttl)
            .cloned()
    }
}

fn parse_entries(entries: Vec<HolidayEntry>) -> HashSet<NaiveDate> {
    entries
        .into_iter()
        .filter_map(
            |entry| match NaiveDate::parse_from_str(&entry.date, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    tracing::warn!(
                        date = %entry.date,
                        name = %entry.name,
                        "skipping malformed holiday entry"
                    );
                    None
                }
            },
        )
        .collect()
}

#[cfg(test)]
pub mod mock {
    //! Scripted holiday feed for tests, with fetch instrumentation.

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    pub struct MockFeed {
        holidays: Vec<HolidayEntry>,
        fail: Mutex<bool>,
        fetches: AtomicUsize,
    }

    impl MockFeed {
        pub fn new(dates: &[&str]) -> Self {
            Self {
                holidays: dates
                    .iter()
                    .map(|date| HolidayEntry {
                        date: date.to_string(),
                        name: "Holiday".to_string(),
                    })
                    .collect(),
                fail: Mutex::new(false),
                fetches: AtomicUsize::new(0),
            }
        }

        pub fn set_fail(&self, fail: bool) {
            *self.fail.lock().unwrap() = fail;
        }

        pub fn fetches(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl HolidayFeed for MockFeed {
        async fn fetch(&self, _year: i32) -> Result<Vec<HolidayEntry>, FeedError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            // Yield so concurrent callers genuinely overlap with the fetch.
            tokio::time::sleep(Duration::from_millis(10)).await;

            if *self.fail.lock().unwrap() {
                return Err(FeedError::Unavailable("mock feed down".to_string()));
            }
            Ok(self.holidays.clone())
        }
    }
}
