//! Notification sink
//!
//! Append-only per-user notification lists, most-recent-first, capped at
//! 50 entries with silent eviction. Persistence is fire-and-forget: a
//! failed write never fails the operation that produced the notification.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::models::Notification;
use crate::store::Store;

/// Maximum notifications retained per user
pub const NOTIFICATION_CAP: usize = 50;

/// Notification key for the administrator account
pub const ADMIN_USER_KEY: &str = "admin";

pub struct NotificationSink {
    entries: Mutex<HashMap<String, Vec<Notification>>>,
    store: Arc<dyn Store>,
}

impl NotificationSink {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            store,
        }
    }

    fn storage_key(user: &str) -> String {
        format!("notifications_{user}")
    }

    /// Load a user's list from the store the first time it is touched
    fn hydrate<'a>(
        &self,
        entries: &'a mut HashMap<String, Vec<Notification>>,
        user: &str,
    ) -> &'a mut Vec<Notification> {
        if !entries.contains_key(user) {
            let loaded = match self.store.get(&Self::storage_key(user)) {
                Ok(Some(value)) => serde_json::from_value(value).unwrap_or_else(|e| {
                    tracing::warn!(user, error = %e, "stored notifications unreadable");
                    Vec::new()
                }),
                Ok(None) => Vec::new(),
                Err(e) => {
                    tracing::warn!(user, error = %e, "store unreachable for notifications");
                    Vec::new()
                }
            };
            entries.insert(user.to_string(), loaded);
        }
        entries.get_mut(user).unwrap()
    }

    fn persist(&self, user: &str, list: &[Notification]) {
        let value = match serde_json::to_value(list) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(user, error = %e, "could not serialize notifications");
                return;
            }
        };
        if let Err(e) = self.store.put(&Self::storage_key(user), &value) {
            tracing::warn!(user, error = %e, "notification write failed");
        }
    }

    /// Prepend a notification to the user's list and trim to the cap.
    /// Returns the stored entry.
    pub fn append(&self, user: &str, notification: Notification) -> Notification {
        let mut entries = self.entries.lock().unwrap();
        let list = self.hydrate(&mut entries, user);
        list.insert(0, notification.clone());
        list.truncate(NOTIFICATION_CAP);
        self.persist(user, list);
        notification
    }

    /// Most-recent-first; empty if the user has none yet
    pub fn list(&self, user: &str) -> Vec<Notification> {
        let mut entries = self.entries.lock().unwrap();
        self.hydrate(&mut entries, user).clone()
    }

    pub fn unread_count(&self, user: &str) -> usize {
        let mut entries = self.entries.lock().unwrap();
        self.hydrate(&mut entries, user)
            .iter()
            .filter(|n| !n.read)
            .count()
    }

    /// Mark one entry read; silently does nothing if the id is unknown
    pub fn mark_read(&self, user: &str, id: Uuid) {
        let mut entries = self.entries.lock().unwrap();
        let list = self.hydrate(&mut entries, user);
        if let Some(note) = list.iter_mut().find(|n| n.id == id) {
            note.read = true;
        }
        self.persist(user, list);
    }

    pub fn mark_all_read(&self, user: &str) {
        let mut entries = self.entries.lock().unwrap();
        let list = self.hydrate(&mut entries, user);
        for note in list.iter_mut() {
            note.read = true;
        }
        self.persist(user, list);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NotificationKind;
    use crate::store::MemoryStore;

    fn make_sink() -> NotificationSink {
        NotificationSink::new(Arc::new(MemoryStore::new()))
    }

    fn make_note(message: &str) -> Notification {
        Notification::new(
            NotificationKind::Registration,
            message.to_string(),
            None,
            None,
        )
    }

    #[test]
    fn test_list_empty_for_unknown_user() {
        let sink = make_sink();
        assert!(sink.list("STU001").is_empty());
    }

    #[test]
    fn test_append_is_most_recent_first() {
        let sink = make_sink();
        sink.append("STU001", make_note("first"));
        sink.append("STU001", make_note("second"));

        let list = sink.list("STU001");
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].message, "second");
        assert_eq!(list[1].message, "first");
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let sink = make_sink();
        for i in 0..60 {
            sink.append("STU001", make_note(&format!("note {i}")));
        }
        let list = sink.list("STU001");
        assert_eq!(list.len(), NOTIFICATION_CAP);
        assert_eq!(list[0].message, "note 59");
        assert_eq!(list[NOTIFICATION_CAP - 1].message, "note 10");
    }

    #[test]
    fn test_mark_read_and_unread_count() {
        let sink = make_sink();
        let stored = sink.append("STU001", make_note("one"));
        sink.append("STU001", make_note("two"));
        assert_eq!(sink.unread_count("STU001"), 2);

        sink.mark_read("STU001", stored.id);
        assert_eq!(sink.unread_count("STU001"), 1);

        // Unknown id is a silent no-op
        sink.mark_read("STU001", Uuid::new_v4());
        assert_eq!(sink.unread_count("STU001"), 1);
    }

    #[test]
    fn test_mark_all_read() {
        let sink = make_sink();
        for _ in 0..5 {
            sink.append("STU002", make_note("hello"));
        }
        sink.mark_all_read("STU002");
        assert!(sink.list("STU002").iter().all(|n| n.read));
        assert_eq!(sink.unread_count("STU002"), 0);
    }

    #[test]
    fn test_lists_are_per_user() {
        let sink = make_sink();
        sink.append("STU001", make_note("for alice"));
        assert!(sink.list("STU002").is_empty());
        assert!(sink.list(ADMIN_USER_KEY).is_empty());
    }

    #[test]
    fn test_hydrates_from_store() {
        let store = Arc::new(MemoryStore::new());
        {
            let sink = NotificationSink::new(store.clone());
            sink.append("STU001", make_note("persisted"));
        }
        let sink = NotificationSink::new(store);
        let list = sink.list("STU001");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].message, "persisted");
    }
}
