//! Day-scoped cache of the primary site's results.
//!
//! Keyed by cleaned query text. Catalog prices change at most daily, so the
//! whole cache is cleared lazily on the first access after the local
//! calendar date advances — a blunt global TTL, not per-entry expiry. The
//! clock is injected so tests can drive the rollover.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use pricewatch_core::ScoredCandidate;

/// Source of "today" for cache rollover.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

struct CacheState {
    last_clear: NaiveDate,
    entries: HashMap<String, Vec<ScoredCandidate>>,
}

/// Process-wide cache of primary ResultSets, safe under interleaved
/// requests.
pub struct DayCache {
    clock: Arc<dyn Clock>,
    state: Mutex<CacheState>,
}

impl DayCache {
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let last_clear = clock.today();
        Self {
            clock,
            state: Mutex::new(CacheState {
                last_clear,
                entries: HashMap::new(),
            }),
        }
    }

    /// Returns the entry for `key`, if any survived today's rollover.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Vec<ScoredCandidate>> {
        let mut state = self.lock();
        Self::roll_over(&self.clock, &mut state);
        state.entries.get(key).cloned()
    }

    /// Stores (or overwrites) the entry for `key`.
    pub fn insert(&self, key: String, results: Vec<ScoredCandidate>) {
        let mut state = self.lock();
        Self::roll_over(&self.clock, &mut state);
        state.entries.insert(key, results);
    }

    fn roll_over(clock: &Arc<dyn Clock>, state: &mut CacheState) {
        let today = clock.today();
        if today > state.last_clear {
            tracing::info!(
                previous = %state.last_clear,
                current = %today,
                entries = state.entries.len(),
                "date rolled over, clearing result cache"
            );
            state.entries.clear();
            state.last_clear = today;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheState> {
        self.state.lock().expect("cache mutex poisoned")
    }
}
