//! Identity service
//!
//! Admin login is a single fixed credential pair from configuration.
//! Student login matches the business-key student id or the email,
//! case-sensitively, against a verbatim stored password. Not a security
//! system.

use std::sync::{Arc, RwLock};

use chrono::Utc;
use tracing::info;

use crate::config::{AdminCredentials, Durability};
use crate::error::{Error, Result};
use crate::models::{Student, StudentDraft};
use crate::state::HubState;
use crate::store::{self, Store, USERS_KEY};

pub struct IdentityService {
    state: Arc<RwLock<HubState>>,
    store: Arc<dyn Store>,
    admin: AdminCredentials,
    durability: Durability,
}

impl IdentityService {
    pub fn new(
        state: Arc<RwLock<HubState>>,
        store: Arc<dyn Store>,
        admin: AdminCredentials,
        durability: Durability,
    ) -> Self {
        Self {
            state,
            store,
            admin,
            durability,
        }
    }

    fn persist_users(&self, state: &HubState) -> Result<()> {
        let value = serde_json::to_value(&state.students)?;
        store::persist(self.store.as_ref(), self.durability, USERS_KEY, &value)
    }

    pub fn authenticate_admin(&self, username: &str, password: &str) -> Result<()> {
        if username == self.admin.username && password == self.admin.password {
            Ok(())
        } else {
            Err(Error::InvalidCredentials)
        }
    }

    /// `identifier` is either the student id or the email, matched
    /// case-sensitively
    pub fn authenticate_student(&self, identifier: &str, password: &str) -> Result<Student> {
        let state = self.state.read().unwrap();
        state
            .students
            .iter()
            .find(|u| {
                (u.student_id == identifier || u.email == identifier) && u.password == password
            })
            .cloned()
            .ok_or(Error::InvalidCredentials)
    }

    /// Create a student account. Uniqueness checks in order: student id,
    /// then email.
    pub fn register_student(&self, draft: StudentDraft) -> Result<Student> {
        let mut state = self.state.write().unwrap();
        if state.students.iter().any(|u| u.student_id == draft.student_id) {
            return Err(Error::DuplicateStudentId(draft.student_id));
        }
        if state.students.iter().any(|u| u.email == draft.email) {
            return Err(Error::DuplicateEmail(draft.email));
        }

        let student = Student::from_draft(draft, Utc::now().date_naive());
        state.students.push(student.clone());
        if let Err(e) = self.persist_users(&state) {
            state.students.pop();
            return Err(e);
        }
        info!(student_id = %student.student_id, "student account created");
        Ok(student)
    }

    /// Snapshot of all student accounts
    pub fn students(&self) -> Vec<Student> {
        self.state.read().unwrap().students.clone()
    }

    pub fn student_by_student_id(&self, student_id: &str) -> Option<Student> {
        self.state
            .read()
            .unwrap()
            .student_by_student_id(student_id)
            .cloned()
    }
}
