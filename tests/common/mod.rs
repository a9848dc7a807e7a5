//! Shared test utilities for quest store integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use questlog::storage::MemoryStorage;
use questlog::store::{QuestStore, DEFAULT_STORE_KEY};

/// Opens a store over `storage` and waits for its initial load
pub async fn open_loaded(storage: &Arc<MemoryStorage>) -> QuestStore {
    let store = QuestStore::open(storage.clone(), DEFAULT_STORE_KEY);
    store.wait_loaded().await;
    store
}

/// Subscribes a listener that records `(name, revision)` pairs
pub fn record_calls(
    store: &QuestStore,
    name: &'static str,
    calls: &Arc<Mutex<Vec<(&'static str, u32)>>>,
) -> u32 {
    let calls = Arc::clone(calls);
    store.subscribe(move |revision| calls.lock().unwrap().push((name, revision)))
}

/// Blob in the persisted wire format from `(id, title, xp)` triples
pub fn blob(active: &[(u32, &str, u32)], completed: &[(u32, &str, u32)]) -> String {
    serde_json::json!({
        "activeQuests": quests_json(active),
        "completedQuests": quests_json(completed),
    })
    .to_string()
}

fn quests_json(quests: &[(u32, &str, u32)]) -> Vec<serde_json::Value> {
    quests
        .iter()
        .map(|(id, title, xp)| serde_json::json!({"id": id, "title": title, "desc": "", "xp": xp}))
        .collect()
}
