use std::sync::atomic::{AtomicU64, Ordering};

/// Source of entity and list-entry identifiers. Injected so tests get deterministic ids.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> u64;
}

/// Monotonic counter. Never hands out the same id twice within a process.
#[derive(Debug)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first.max(1)),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic() {
        let ids = SequentialIds::starting_at(10);
        assert_eq!(ids.next_id(), 10);
        assert_eq!(ids.next_id(), 11);
        assert_eq!(ids.next_id(), 12);
    }

    #[test]
    fn test_zero_start_is_bumped_to_one() {
        assert_eq!(SequentialIds::starting_at(0).next_id(), 1);
    }
}
