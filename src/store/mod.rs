//! Quest store
//!
//! Holds the active and completed quests, keeps the leveling stats in step
//! with the completed quests, tells subscribers about every change and
//! persists a snapshot after each change.
//!
//! # Architecture
//!
//! ```text
//!   command ──► mutate (locked) ──► recompute stats
//!                                        │
//!                      ┌─────────────────┴─────────────────┐
//!                      ▼                                   ▼
//!           notify listeners (sync)          spawn write to Storage
//!                                              (fire-and-forget)
//! ```
//!
//! The initial load runs in the background from [`QuestStore::open`]. Until it
//! completes, [`QuestStore::state`] reports [`StoreState::Loading`] and no
//! commands are reachable.

mod listeners;
mod persistence;
mod state;

pub use listeners::{Listener, SubscriptionId};
pub use persistence::{LoadError, SerializedQuestStore, DEFAULT_STORE_KEY};

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::stats::PlayerStats;
use crate::storage::Storage;
use crate::{Quest, QuestArgs, QuestError, QuestId};

use listeners::ListenerRegistry;
use persistence::read_snapshot;
use state::QuestState;

struct Shared {
    key: String,
    storage: Arc<dyn Storage>,
    state: Mutex<QuestState>,
    listeners: Mutex<ListenerRegistry>,
    /// Writes that may still be in flight
    writes: Mutex<Vec<JoinHandle<()>>>,
    loaded: watch::Sender<bool>,
    runtime: Handle,
}

impl Shared {
    fn lock_state(&self) -> MutexGuard<'_, QuestState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_listeners(&self) -> MutexGuard<'_, ListenerRegistry> {
        self.listeners.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_writes(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.writes.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn load(self: Arc<Self>) {
        let loaded = match read_snapshot(self.storage.as_ref(), &self.key).await {
            Ok(Some(snapshot)) => {
                tracing::info!(
                    active = snapshot.active_quests.len(),
                    completed = snapshot.completed_quests.len(),
                    "Loaded quest store"
                );
                Some(snapshot)
            }
            Ok(None) => {
                tracing::info!("Quest store was empty, starting fresh");
                None
            }
            Err(e) => {
                tracing::error!("Failed to read from quest store: {}", e);
                None
            }
        };

        self.lock_state().finish_load(loaded);
        self.notify();
        self.loaded.send_replace(true);
    }

    /// Call every listener with a fresh revision, outside of any lock
    fn notify(&self) {
        let (revision, listeners) = self.lock_listeners().begin_notification();
        for listener in listeners {
            listener(revision);
        }
    }

    /// Spawn a write of `snapshot`; failures are logged and dropped
    fn persist(&self, snapshot: SerializedQuestStore) {
        let json = match snapshot.to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize quest store: {}", e);
                return;
            }
        };

        let storage = Arc::clone(&self.storage);
        let key = self.key.clone();
        let handle = self.runtime.spawn(async move {
            match storage.write(&key, &json).await {
                Ok(()) => tracing::debug!(bytes = json.len(), "Wrote quest store"),
                Err(e) => tracing::error!("Failed to write to quest store: {}", e),
            }
        });

        let mut writes = self.lock_writes();
        writes.retain(|h| !h.is_finished());
        writes.push(handle);
    }

    /// Notify and persist after a successful mutation
    fn publish(&self, snapshot: SerializedQuestStore) {
        self.notify();
        self.persist(snapshot);
    }
}

/// Handle to the process-wide quest store
///
/// Cloning is cheap and every clone refers to the same store. Construct it
/// once at the composition root and hand clones to consumers.
#[derive(Clone)]
pub struct QuestStore {
    shared: Arc<Shared>,
}

impl QuestStore {
    /// Create the store and start loading it from `storage` under `key`.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime, like `tokio::spawn`.
    /// Use [`QuestStore::open_on`] to pass a runtime handle explicitly.
    pub fn open(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        Self::open_on(storage, key, Handle::current())
    }

    /// Create the store, running the load and all writes on `runtime`
    pub fn open_on(storage: Arc<dyn Storage>, key: impl Into<String>, runtime: Handle) -> Self {
        let (loaded, _) = watch::channel(false);
        let shared = Arc::new(Shared {
            key: key.into(),
            storage,
            state: Mutex::new(QuestState::default()),
            listeners: Mutex::new(ListenerRegistry::default()),
            writes: Mutex::new(Vec::new()),
            loaded,
            runtime,
        });

        tracing::debug!(key = %shared.key, "Opening quest store");
        shared.runtime.spawn(Arc::clone(&shared).load());

        Self { shared }
    }

    /// Storage key the store persists under
    pub fn key(&self) -> &str {
        &self.shared.key
    }

    pub fn is_loading(&self) -> bool {
        self.shared.lock_state().loading
    }

    /// Current state; commands are only reachable through the loaded case
    pub fn state(&self) -> StoreState<'_> {
        if self.is_loading() {
            StoreState::Loading
        } else {
            StoreState::Loaded(LoadedStore { store: self })
        }
    }

    /// Wait for the initial load to finish
    pub async fn wait_loaded(&self) -> LoadedStore<'_> {
        let mut loaded = self.shared.loaded.subscribe();
        // The sender lives as long as `self`, so this only returns once loaded
        let _ = loaded.wait_for(|done| *done).await;
        LoadedStore { store: self }
    }

    /// Register a callback run after every change, in registration order
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(u32) + Send + Sync + 'static,
    {
        self.shared.lock_listeners().subscribe(Arc::new(listener))
    }

    /// Remove a callback; returns false if `id` was not registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.lock_listeners().unsubscribe(id)
    }

    /// Revision the next change notification will carry
    pub fn revision(&self) -> u32 {
        self.shared.lock_listeners().revision()
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.lock_listeners().len()
    }

    /// Wait until every write started so far has settled.
    ///
    /// Writes started while flushing are not waited for. Failed writes have
    /// already been logged and are not reported here.
    pub async fn flush(&self) {
        let pending = std::mem::take(&mut *self.shared.lock_writes());
        for handle in pending {
            if let Err(e) = handle.await {
                tracing::warn!("Quest store write task failed: {}", e);
            }
        }
    }
}

/// Loading or loaded view of the store
#[derive(Clone, Copy)]
pub enum StoreState<'a> {
    Loading,
    Loaded(LoadedStore<'a>),
}

impl<'a> StoreState<'a> {
    pub fn is_loading(&self) -> bool {
        matches!(self, StoreState::Loading)
    }

    pub fn loaded(self) -> Option<LoadedStore<'a>> {
        match self {
            StoreState::Loading => None,
            StoreState::Loaded(store) => Some(store),
        }
    }
}

/// A store whose initial load has finished
///
/// Loading never restarts, so this view stays valid for as long as the
/// store handle it borrows from.
#[derive(Clone, Copy)]
pub struct LoadedStore<'a> {
    store: &'a QuestStore,
}

impl LoadedStore<'_> {
    fn read<T>(&self, f: impl FnOnce(&QuestState) -> T) -> T {
        let state = self.store.shared.lock_state();
        f(&*state)
    }

    /// Apply `f` and, if it changed anything, notify and persist
    fn commit<T>(&self, f: impl FnOnce(&mut QuestState) -> Option<T>) -> Option<T> {
        let (result, snapshot) = {
            let mut state = self.store.shared.lock_state();
            let result = f(&mut *state)?;
            (result, state.to_serialized())
        };

        self.store.shared.publish(snapshot);
        Some(result)
    }

    pub fn active_quests(&self) -> Vec<Quest> {
        self.read(|s| s.active.clone())
    }

    pub fn completed_quests(&self) -> Vec<Quest> {
        self.read(|s| s.completed.clone())
    }

    /// Leveling stats derived from the completed quests
    pub fn stats(&self) -> PlayerStats {
        self.read(|s| s.stats)
    }

    /// Total XP of completed quests
    pub fn xp(&self) -> u64 {
        self.stats().total_xp
    }

    pub fn level(&self) -> u32 {
        self.stats().level
    }

    pub fn xp_until_next_level(&self) -> u64 {
        self.stats().xp_until_next_level
    }

    pub fn level_xp_requirement(&self) -> u64 {
        self.stats().level_xp_requirement
    }

    /// Highest id handed out so far; the next quest gets this plus one
    pub fn id_seed(&self) -> QuestId {
        self.read(|s| s.id_seed())
    }

    /// Snapshot in the persisted wire shape
    pub fn snapshot(&self) -> SerializedQuestStore {
        self.read(|s| s.to_serialized())
    }

    /// Add a new active quest and return its id
    pub fn create_quest(&self, args: QuestArgs) -> Result<QuestId, QuestError> {
        args.validate()?;

        let (id, snapshot) = {
            let mut state = self.store.shared.lock_state();
            let id = state.create(args);
            (id, state.to_serialized())
        };

        tracing::debug!(quest_id = id, "Created quest");
        self.store.shared.publish(snapshot);
        Ok(id)
    }

    /// Drop an active quest; false if no active quest has `id`
    pub fn cancel_quest(&self, id: QuestId) -> bool {
        self.commit(|s| s.cancel(id).then_some(())).is_some()
    }

    /// Complete an active quest and collect its XP
    pub fn claim_quest(&self, id: QuestId) -> bool {
        self.commit(|s| s.claim(id).then_some(())).is_some()
    }

    /// Move a completed quest back to the active list
    pub fn unclaim_quest(&self, id: QuestId) -> bool {
        self.commit(|s| s.unclaim(id).then_some(())).is_some()
    }

    /// Remove a completed quest and its XP, returning the removed quest
    pub fn delete_completed_quest(&self, id: QuestId) -> Option<Quest> {
        self.commit(|s| s.delete_completed(id))
    }
}
