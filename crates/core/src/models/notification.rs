//! Notification model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a notification is about. `Reminder` is part of the wire vocabulary
/// but the engine never emits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Registration,
    Attendance,
    Points,
    Reminder,
}

/// A per-user message, created as a side effect of engine operations.
/// Never deleted, only marked read or evicted past the list cap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub activity_id: Option<Uuid>,
    pub activity_name: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        kind: NotificationKind,
        message: String,
        activity_id: Option<Uuid>,
        activity_name: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message,
            activity_id,
            activity_name,
            read: false,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_unread() {
        let note = Notification::new(
            NotificationKind::Registration,
            "You've successfully registered.".to_string(),
            None,
            None,
        );
        assert!(!note.read);
    }

    #[test]
    fn test_kind_wire_names() {
        let json = serde_json::to_value(NotificationKind::Points).unwrap();
        assert_eq!(json, "points");
        let kind: NotificationKind = serde_json::from_value("reminder".into()).unwrap();
        assert_eq!(kind, NotificationKind::Reminder);
    }
}
