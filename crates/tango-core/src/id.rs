use std::time::{SystemTime, UNIX_EPOCH};

/// Millisecond-timestamp ids that never repeat.
///
/// When the clock has not moved past the last issued id, the next id is
/// `last + 1`.
#[derive(Debug, Clone, Default)]
pub struct MonotonicIds {
    last: u64,
}

impl MonotonicIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start above every id already in use
    pub fn with_floor(floor: u64) -> Self {
        Self { last: floor }
    }

    pub fn next(&mut self) -> u64 {
        self.next_at(now_millis())
    }

    pub fn next_at(&mut self, now_ms: u64) -> u64 {
        let id = now_ms.max(self.last.saturating_add(1));
        self.last = id;
        id
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_millisecond_still_increases() {
        let mut ids = MonotonicIds::new();
        let a = ids.next_at(1_000);
        let b = ids.next_at(1_000);
        let c = ids.next_at(1_000);
        assert_eq!((a, b, c), (1_000, 1_001, 1_002));
    }

    #[test]
    fn clock_going_backwards_is_ignored() {
        let mut ids = MonotonicIds::with_floor(5_000);
        assert_eq!(ids.next_at(4_000), 5_001);
        assert_eq!(ids.next_at(9_000), 9_000);
    }

    #[test]
    fn tight_loop_yields_distinct_ids() {
        let mut ids = MonotonicIds::new();
        let mut seen: Vec<u64> = (0..1_000).map(|_| ids.next()).collect();
        let len = seen.len();
        seen.dedup();
        assert_eq!(seen.len(), len);
    }
}
