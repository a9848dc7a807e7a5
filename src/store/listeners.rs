//! Change listeners

use std::sync::Arc;

/// Handle returned by `subscribe`, used to unsubscribe
pub type SubscriptionId = u32;

/// Callback invoked with the revision number of every change
pub type Listener = Arc<dyn Fn(u32) + Send + Sync>;

/// Counters wrap back to 1 before reaching 2^31 - 1
const COUNTER_WRAP: u32 = i32::MAX as u32;

fn next_counter(n: u32) -> u32 {
    ((n + 1) % COUNTER_WRAP).max(1)
}

/// Listeners in registration order, plus the revision counter
pub(crate) struct ListenerRegistry {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: SubscriptionId,
    revision: u32,
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 1,
            revision: 1,
        }
    }
}

impl ListenerRegistry {
    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = self.next_id;
        self.next_id = next_counter(self.next_id);
        self.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Revision the next notification will carry
    pub fn revision(&self) -> u32 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Claim a revision and snapshot the listeners to call with it.
    ///
    /// The callbacks are invoked by the caller after the registry lock is
    /// released, so a listener may subscribe or unsubscribe without deadlock.
    pub fn begin_notification(&mut self) -> (u32, Vec<Listener>) {
        let revision = self.revision;
        self.revision = next_counter(self.revision);
        let listeners = self.listeners.iter().map(|(_, l)| Arc::clone(l)).collect();
        (revision, listeners)
    }
}
