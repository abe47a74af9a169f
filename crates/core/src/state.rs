//! In-memory projection of the store-backed collections
//!
//! The hub works against this container and writes it back to the store
//! after each mutation. Lifecycle is explicit: hydrate on construction,
//! `reset` to clear. The container is injected into the services that
//! use it rather than held in module-level statics.

use uuid::Uuid;

use crate::models::{Activity, Student};
use crate::store::{Store, ACTIVITIES_KEY, USERS_KEY};

#[derive(Debug, Default)]
pub struct HubState {
    pub activities: Vec<Activity>,
    pub students: Vec<Student>,
}

impl HubState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate from the store. A missing or unreadable collection degrades
    /// to empty rather than failing startup.
    pub fn load(store: &dyn Store) -> Self {
        Self {
            activities: load_collection(store, ACTIVITIES_KEY),
            students: load_collection(store, USERS_KEY),
        }
    }

    pub fn reset(&mut self) {
        self.activities.clear();
        self.students.clear();
    }

    pub fn activity(&self, id: Uuid) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    pub fn activity_mut(&mut self, id: Uuid) -> Option<&mut Activity> {
        self.activities.iter_mut().find(|a| a.id == id)
    }

    pub fn student_by_student_id(&self, student_id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.student_id == student_id)
    }
}

fn load_collection<T: serde::de::DeserializeOwned>(store: &dyn Store, key: &str) -> Vec<T> {
    match store.get(key) {
        Ok(Some(value)) => match serde_json::from_value(value) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(key, error = %e, "stored collection unreadable, starting empty");
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "store unreachable, starting empty");
            Vec::new()
        }
    }
}
