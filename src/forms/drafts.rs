//! In-memory wizard drafts, one owner per draft.
//!
//! A draft is visible only to the session token that started it. Drafts idle
//! for longer than the TTL are dropped, and the oldest draft goes first once
//! the store is full.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::AssistantWizard;

pub const DRAFT_TTL_MINUTES: i64 = 120;
pub const MAX_DRAFTS: usize = 500;

#[derive(Debug)]
struct Draft {
    owner: String,
    touched_at: DateTime<Utc>,
    wizard: AssistantWizard,
}

#[derive(Debug)]
pub struct DraftStore {
    drafts: HashMap<Uuid, Draft>,
    ttl: Duration,
    capacity: usize,
}

impl Default for DraftStore {
    fn default() -> Self {
        Self::new(Duration::minutes(DRAFT_TTL_MINUTES), MAX_DRAFTS)
    }
}

impl DraftStore {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            drafts: HashMap::new(),
            ttl,
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    /// Stores a new draft for `owner`, sweeping expired drafts first.
    pub fn insert(&mut self, owner: &str, wizard: AssistantWizard, now: DateTime<Utc>) -> Uuid {
        self.sweep(now);
        while self.drafts.len() >= self.capacity {
            let Some(oldest) = self
                .drafts
                .iter()
                .min_by_key(|(_, d)| d.touched_at)
                .map(|(id, _)| *id)
            else {
                break;
            };
            tracing::debug!("draft store full, evicting {oldest}");
            self.drafts.remove(&oldest);
        }

        let id = Uuid::new_v4();
        self.drafts.insert(
            id,
            Draft {
                owner: owner.to_string(),
                touched_at: now,
                wizard,
            },
        );
        id
    }

    /// The draft, if it exists, belongs to `owner` and has not expired.
    /// Access refreshes its idle timer.
    pub fn get_mut(
        &mut self,
        id: &Uuid,
        owner: &str,
        now: DateTime<Utc>,
    ) -> Option<&mut AssistantWizard> {
        if self.drafts.get(id).is_some_and(|d| self.expired(d, now)) {
            self.drafts.remove(id);
            return None;
        }
        let draft = self.drafts.get_mut(id).filter(|d| d.owner == owner)?;
        draft.touched_at = now;
        Some(&mut draft.wizard)
    }

    pub fn remove(&mut self, id: &Uuid, owner: &str) -> Option<AssistantWizard> {
        if !self.drafts.get(id).is_some_and(|d| d.owner == owner) {
            return None;
        }
        self.drafts.remove(id).map(|d| d.wizard)
    }

    /// Drops every expired draft and returns how many went.
    pub fn sweep(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.drafts.len();
        let ttl = self.ttl;
        self.drafts.retain(|_, d| now - d.touched_at < ttl);
        let swept = before - self.drafts.len();
        if swept > 0 {
            tracing::debug!("swept {swept} stale wizard draft(s)");
        }
        swept
    }

    fn expired(&self, draft: &Draft, now: DateTime<Utc>) -> bool {
        now - draft.touched_at >= self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drafts_are_private_to_their_owner() {
        let mut store = DraftStore::default();
        let now = Utc::now();
        let id = store.insert("tok-a", AssistantWizard::new(vec![]), now);

        assert!(store.get_mut(&id, "tok-b", now).is_none());
        assert!(store.remove(&id, "tok-b").is_none());
        assert!(store.get_mut(&id, "tok-a", now).is_some());
        assert!(store.remove(&id, "tok-a").is_some());
        assert!(store.is_empty());
    }

    #[test]
    fn test_idle_drafts_expire() {
        let mut store = DraftStore::new(Duration::minutes(10), 10);
        let t0 = Utc::now();
        let kept = store.insert("tok", AssistantWizard::new(vec![]), t0);
        let idle = store.insert("tok", AssistantWizard::new(vec![]), t0);

        // touching a draft restarts its timer
        assert!(store.get_mut(&kept, "tok", t0 + Duration::minutes(8)).is_some());
        assert!(store.get_mut(&idle, "tok", t0 + Duration::minutes(11)).is_none());
        assert_eq!(store.len(), 1);

        assert_eq!(store.sweep(t0 + Duration::minutes(19)), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_full_store_evicts_oldest() {
        let mut store = DraftStore::new(Duration::minutes(60), 2);
        let t0 = Utc::now();
        let first = store.insert("tok", AssistantWizard::new(vec![]), t0);
        let second = store.insert("tok", AssistantWizard::new(vec![]), t0 + Duration::seconds(1));
        let third = store.insert("tok", AssistantWizard::new(vec![]), t0 + Duration::seconds(2));

        let now = t0 + Duration::seconds(3);
        assert_eq!(store.len(), 2);
        assert!(store.get_mut(&first, "tok", now).is_none());
        assert!(store.get_mut(&second, "tok", now).is_some());
        assert!(store.get_mut(&third, "tok", now).is_some());
    }
}
