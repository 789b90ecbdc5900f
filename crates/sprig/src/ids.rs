//! Process-wide unique state labels.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT: AtomicU64 = AtomicU64::new(0);

/// Opaque label for an automaton state.
///
/// Labels are minted from a single process-wide counter, so concurrent
/// constructions never hand out the same label twice. The numeric value
/// carries no meaning beyond identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(u64);

impl StateId {
    /// Mint a fresh label.
    pub fn fresh() -> Self {
        StateId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Debug for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_labels_are_distinct() {
        let a = StateId::fresh();
        let b = StateId::fresh();
        assert_ne!(a, b);
    }

    #[test]
    fn fresh_labels_are_distinct_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| (0..256).map(|_| StateId::fresh()).collect::<Vec<_>>()))
            .collect();
        let mut all: Vec<StateId> = handles
            .into_iter()
            .flat_map(|h| h.join().expect("thread panicked"))
            .collect();
        let count = all.len();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), count);
    }
}
