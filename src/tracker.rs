use tokio::sync::watch;

/// Counts dispatched units down to zero as each reports terminal state
///
/// `all_done` is a non-blocking poll; `wait_all` is the notification path
/// used by the supervisor for prompt shutdown. Both observe the same watch
/// channel, so a unit finishing mid-call is simply seen as done or
/// not-done for that call, never an error.
pub struct CompletionTracker {
    remaining: watch::Sender<usize>,
}

impl CompletionTracker {
    /// Track `count` dispatched units
    ///
    /// Zero units is vacuously complete; callers reject an empty race
    /// before a tracker is ever built.
    pub fn new(count: usize) -> Self {
        let (tx, _) = watch::channel(count);
        Self { remaining: tx }
    }

    /// Record one unit reaching its terminal state; call once per unit
    pub fn mark_done(&self) {
        self.remaining.send_modify(|remaining| {
            *remaining = remaining.saturating_sub(1);
        });
    }

    /// True iff every dispatched unit has reported terminal state
    pub fn all_done(&self) -> bool {
        *self.remaining.borrow() == 0
    }

    /// Units still running
    pub fn remaining(&self) -> usize {
        *self.remaining.borrow()
    }

    /// Wait until every unit has finished; cancel-safe
    pub async fn wait_all(&self) {
        let mut rx = self.remaining.subscribe();
        // wait_for inspects the current value before waiting for changes,
        // and cannot fail while the sender lives in self
        let _ = rx.wait_for(|remaining| *remaining == 0).await;
    }
}
