//! Hub assembly
//!
//! Wires the shared state container, the store, and the three services
//! together so callers get one handle.

use std::sync::{Arc, RwLock};

use crate::config::HubConfig;
use crate::engine::ActivityEngine;
use crate::identity::IdentityService;
use crate::notify::NotificationSink;
use crate::state::HubState;
use crate::store::Store;

pub struct Hub {
    pub engine: ActivityEngine,
    pub identity: IdentityService,
    pub notifications: Arc<NotificationSink>,
}

impl Hub {
    pub fn new(store: Arc<dyn Store>, config: &HubConfig) -> Self {
        let state = Arc::new(RwLock::new(HubState::load(store.as_ref())));
        let notifications = Arc::new(NotificationSink::new(store.clone()));
        let engine = ActivityEngine::new(
            state.clone(),
            store.clone(),
            notifications.clone(),
            config.durability,
        );
        let identity = IdentityService::new(state, store, config.admin.clone(), config.durability);
        Self {
            engine,
            identity,
            notifications,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityDraft, ActivityKind, StudentDraft};
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    #[test]
    fn test_hub_services_share_state() {
        let hub = Hub::new(Arc::new(MemoryStore::new()), &HubConfig::default());
        let student = hub
            .identity
            .register_student(StudentDraft {
                student_id: "STU001".to_string(),
                name: "Alice Johnson".to_string(),
                email: "alice@university.edu".to_string(),
                password: "student123".to_string(),
            })
            .unwrap();

        let activity = hub
            .engine
            .create(ActivityDraft {
                name: "Debate Club Open Round".to_string(),
                kind: ActivityKind::Club,
                date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
                time: "17:00".to_string(),
                venue: "Lecture Hall B".to_string(),
                description: "Open debate round.".to_string(),
                default_points: 25,
            })
            .unwrap();

        hub.engine.register(activity.id, &student).unwrap();
        assert_eq!(hub.notifications.unread_count("STU001"), 1);
    }

    #[test]
    fn test_hub_rehydrates_from_store() {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let config = HubConfig::default();
        {
            let hub = Hub::new(store.clone(), &config);
            hub.identity
                .register_student(StudentDraft {
                    student_id: "STU002".to_string(),
                    name: "Bob Martinez".to_string(),
                    email: "bob@university.edu".to_string(),
                    password: "student123".to_string(),
                })
                .unwrap();
        }
        let hub = Hub::new(store, &config);
        assert!(hub
            .identity
            .authenticate_student("STU002", "student123")
            .is_ok());
    }
}
