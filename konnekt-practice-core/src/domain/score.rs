use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Session-wide score counter.
///
/// The owner can read the total. Activities only ever get a [`ScoreHandle`],
/// which can increment but not set or decrease it.
#[derive(Debug, Default)]
pub struct Score {
    total: Arc<AtomicU32>,
}

/// Increment-only access to a [`Score`]
#[derive(Debug, Clone)]
pub struct ScoreHandle {
    total: Arc<AtomicU32>,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u32 {
        self.total.load(Ordering::Relaxed)
    }

    pub fn handle(&self) -> ScoreHandle {
        ScoreHandle {
            total: Arc::clone(&self.total),
        }
    }
}

impl ScoreHandle {
    /// Add one point, returning the new total. Saturates at `u32::MAX`.
    pub fn increment(&self) -> u32 {
        let total = match self
            .total
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |t| t.checked_add(1))
        {
            Ok(previous) => previous + 1,
            Err(max) => max,
        };
        tracing::debug!(total, "Score incremented");
        total
    }
}
