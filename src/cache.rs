use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Single-slot response cache with a fixed time-to-live.
///
/// Writes elsewhere in the system never invalidate the slot, so readers may
/// observe a body up to `ttl` old. That staleness window is part of the
/// contract, not an oversight.
pub struct TimedCache {
    ttl: Duration,
    slot: Mutex<Option<Entry>>,
}

struct Entry {
    stored_at: Instant,
    body: String,
}

impl TimedCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Returns the cached body while it is younger than the TTL.
    pub fn get(&self) -> Option<String> {
        let slot = self.slot.lock().unwrap();
        slot.as_ref()
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.body.clone())
    }

    pub fn put(&self, body: String) {
        let mut slot = self.slot.lock().unwrap();
        *slot = Some(Entry {
            stored_at: Instant::now(),
            body,
        });
    }
}
