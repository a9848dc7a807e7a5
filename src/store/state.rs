//! Quest collections and their derived leveling stats

use crate::stats::PlayerStats;
use crate::{Quest, QuestArgs, QuestId};

use super::persistence::SerializedQuestStore;

/// Ids wrap back to zero at 2^31
const ID_WRAP: u32 = 1 << 31;

/// Mutable quest state guarded by the store's lock
#[derive(Debug)]
pub(crate) struct QuestState {
    pub loading: bool,
    pub active: Vec<Quest>,
    pub completed: Vec<Quest>,
    pub stats: PlayerStats,
    /// Last id handed out
    curr_id: QuestId,
}

impl Default for QuestState {
    fn default() -> Self {
        Self {
            loading: true,
            active: Vec::new(),
            completed: Vec::new(),
            stats: PlayerStats::new(0),
            curr_id: 0,
        }
    }
}

impl QuestState {
    /// Apply the outcome of the initial load.
    ///
    /// `None` means nothing usable was stored (absent blob or failed read), and
    /// the store starts empty.
    pub fn finish_load(&mut self, loaded: Option<SerializedQuestStore>) {
        match loaded {
            Some(snapshot) => {
                self.active = snapshot.active_quests;
                self.completed = snapshot.completed_quests;
            }
            None => {
                self.active.clear();
                self.completed.clear();
            }
        }

        self.curr_id = self.max_id();
        self.loading = false;
        self.recompute();
    }

    fn max_id(&self) -> QuestId {
        self.active
            .iter()
            .chain(self.completed.iter())
            .map(|q| q.id)
            .max()
            .unwrap_or(0)
    }

    /// Seed the next created quest will be numbered from
    pub fn id_seed(&self) -> QuestId {
        self.curr_id
    }

    fn next_id(&mut self) -> QuestId {
        self.curr_id = self.curr_id.wrapping_add(1) % ID_WRAP;
        self.curr_id
    }

    /// Recompute XP and level stats from the completed quests
    pub fn recompute(&mut self) {
        let xp = self.completed.iter().map(|q| u64::from(q.xp)).sum();
        self.stats = PlayerStats::new(xp);
    }

    pub fn create(&mut self, args: QuestArgs) -> QuestId {
        let id = self.next_id();
        self.active.push(Quest::from_args(id, args));
        id
    }

    pub fn cancel(&mut self, id: QuestId) -> bool {
        take(&mut self.active, id).is_some()
    }

    pub fn claim(&mut self, id: QuestId) -> bool {
        let Some(quest) = take(&mut self.active, id) else {
            return false;
        };
        self.completed.push(quest);
        self.recompute();
        true
    }

    pub fn unclaim(&mut self, id: QuestId) -> bool {
        let Some(quest) = take(&mut self.completed, id) else {
            return false;
        };
        self.active.push(quest);
        self.recompute();
        true
    }

    /// Remove a completed quest, returning it so callers can report the XP lost
    pub fn delete_completed(&mut self, id: QuestId) -> Option<Quest> {
        let quest = take(&mut self.completed, id)?;
        self.recompute();
        Some(quest)
    }

    pub fn to_serialized(&self) -> SerializedQuestStore {
        SerializedQuestStore {
            active_quests: self.active.clone(),
            completed_quests: self.completed.clone(),
        }
    }
}

/// Remove the quest with `id` from `quests`, keeping the order of the rest
fn take(quests: &mut Vec<Quest>, id: QuestId) -> Option<Quest> {
    let index = quests.iter().position(|q| q.id == id)?;
    Some(quests.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn loaded() -> QuestState {
        let mut state = QuestState::default();
        state.finish_load(None);
        state
    }

    fn args(title: &str, xp: u32) -> QuestArgs {
        QuestArgs::new(title, "", xp)
    }

    #[test]
    fn test_default_is_loading() {
        let state = QuestState::default();
        assert!(state.loading);
        assert!(state.active.is_empty());
        assert!(state.completed.is_empty());
    }

    #[test]
    fn test_ids_follow_loaded_max() {
        let mut state = QuestState::default();
        state.finish_load(Some(SerializedQuestStore {
            active_quests: vec![Quest::from_args(4, args("a", 1))],
            completed_quests: vec![Quest::from_args(9, args("b", 2))],
        }));

        assert_eq!(state.id_seed(), 9);
        assert_eq!(state.create(args("c", 3)), 10);
        assert_eq!(state.create(args("d", 3)), 11);
    }

    #[test]
    fn test_id_wraps_at_two_pow_31() {
        let mut state = loaded();
        state.curr_id = ID_WRAP - 1;
        assert_eq!(state.create(args("last", 1)), 0);
        assert_eq!(state.create(args("first", 1)), 1);
    }

    #[test]
    fn test_id_after_u32_max_wraps_to_zero() {
        let mut state = QuestState::default();
        state.finish_load(Some(SerializedQuestStore {
            active_quests: vec![Quest::from_args(u32::MAX, args("a", 1))],
            completed_quests: Vec::new(),
        }));

        assert_eq!(state.id_seed(), u32::MAX);
        assert_eq!(state.create(args("b", 1)), 0);
        assert_eq!(state.create(args("c", 1)), 1);
    }

    #[test]
    fn test_xp_conservation_and_partition() {
        let mut state = loaded();
        let ids: Vec<_> = [40, 50, 20, 62, 15]
            .iter()
            .enumerate()
            .map(|(i, xp)| state.create(args(&format!("q{i}"), *xp)))
            .collect();

        // (claim?, quest index)
        let ops = [
            (true, 0),
            (true, 3),
            (true, 1),
            (false, 0),
            (true, 4),
            (false, 3),
            (true, 0),
        ];

        for (claim, index) in ops {
            let changed = if claim {
                state.claim(ids[index])
            } else {
                state.unclaim(ids[index])
            };
            assert!(changed);

            let sum: u64 = state.completed.iter().map(|q| u64::from(q.xp)).sum();
            assert_eq!(state.stats.total_xp, sum);

            let active: HashSet<_> = state.active.iter().map(|q| q.id).collect();
            let completed: HashSet<_> = state.completed.iter().map(|q| q.id).collect();
            assert!(active.is_disjoint(&completed));
            assert_eq!(active.len() + completed.len(), ids.len());
        }

        assert_eq!(state.stats.total_xp, 40 + 50 + 15);
        let completed: Vec<_> = state.completed.iter().map(|q| q.id).collect();
        assert_eq!(completed, vec![ids[1], ids[4], ids[0]]);
    }

    #[test]
    fn test_missing_ids_are_no_ops() {
        let mut state = loaded();
        let id = state.create(args("only", 10));

        assert!(!state.claim(id + 1));
        assert!(!state.cancel(id + 1));
        assert!(!state.unclaim(id));
        assert!(state.delete_completed(id).is_none());
        assert_eq!(state.active.len(), 1);
        assert_eq!(state.stats.total_xp, 0);
    }

    #[test]
    fn test_cancel_and_delete_remove_for_good() {
        let mut state = loaded();
        let a = state.create(args("a", 10));
        let b = state.create(args("b", 30));

        assert!(state.cancel(a));
        assert!(state.claim(b));
        assert_eq!(state.stats.total_xp, 30);

        let deleted = state.delete_completed(b).unwrap();
        assert_eq!(deleted.xp, 30);
        assert!(state.active.is_empty());
        assert!(state.completed.is_empty());
        assert_eq!(state.stats.total_xp, 0);
        // Removed ids are not reused
        assert_eq!(state.create(args("c", 1)), b + 1);
    }
}
