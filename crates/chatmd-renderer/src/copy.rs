//! Copy feedback state.
//!
//! After a block is copied its button shows a check icon for a fixed window.
//! Rather than running a timer per block, the tracker stores a reset deadline
//! and answers "is it still copied?" against a given instant.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use crate::renderer::MAX_COPY_FEEDBACK;

/// Per-block copy deadlines, keyed by block index.
#[derive(Debug)]
pub struct CopyTracker {
    deadlines: HashMap<usize, Instant>,
    window: Duration,
}

impl CopyTracker {
    /// Create a tracker whose copied state lasts `window`, clamped to
    /// [`MAX_COPY_FEEDBACK`].
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            deadlines: HashMap::new(),
            window: window.min(MAX_COPY_FEEDBACK),
        }
    }

    /// Length of the copied state.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Mark block `index` copied at `now`.
    ///
    /// A block copied again inside its window gets a fresh deadline. Returns
    /// the instant at which it reverts.
    pub fn mark_at(&mut self, index: usize, now: Instant) -> Instant {
        // An unrepresentable deadline means the block reverts immediately.
        let deadline = now.checked_add(self.window).unwrap_or(now);
        self.deadlines.insert(index, deadline);
        deadline
    }

    /// Whether block `index` is in its copied state at `now`.
    pub fn is_copied_at(&self, index: usize, now: Instant) -> bool {
        self.deadlines
            .get(&index)
            .is_some_and(|deadline| *deadline > now)
    }

    /// Indices in their copied state at `now`.
    pub fn copied_at(&self, now: Instant) -> HashSet<usize> {
        self.deadlines
            .iter()
            .filter(|(_, deadline)| **deadline > now)
            .map(|(index, _)| *index)
            .collect()
    }

    /// Drop entries whose window has passed and return their indices, sorted.
    pub fn expire_at(&mut self, now: Instant) -> Vec<usize> {
        let mut expired: Vec<usize> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(index, _)| *index)
            .collect();
        for index in &expired {
            self.deadlines.remove(index);
        }
        expired.sort_unstable();
        expired
    }

    /// Earliest pending reset, for scheduling a re-render.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.values().min().copied()
    }
}
