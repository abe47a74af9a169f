//! Activity lifecycle engine
//!
//! Owns every rule governing registration and attendance across an
//! activity's life. The state machine per activity is small: UNLOCKED
//! (registration open, attendance editable) and LOCKED (set by `finalize`,
//! cleared by `reopen`, which discards prior marks).
//!
//! All check-then-act operations are serialized per activity through a
//! lock registry keyed by activity id, so concurrent callers cannot both
//! pass a precondition before either persists.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::config::Durability;
use crate::error::{Error, Result};
use crate::invariants::{assert_activity_invariants, assert_registration_defaults};
use crate::models::{
    Activity, ActivityDraft, ActivityUpdate, Notification, NotificationKind, Registration, Student,
};
use crate::notify::NotificationSink;
use crate::state::HubState;
use crate::store::{self, Store, ACTIVITIES_KEY};

pub struct ActivityEngine {
    state: Arc<RwLock<HubState>>,
    store: Arc<dyn Store>,
    sink: Arc<NotificationSink>,
    durability: Durability,
    /// Per-activity locks serializing check-then-act sequences
    locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl ActivityEngine {
    pub fn new(
        state: Arc<RwLock<HubState>>,
        store: Arc<dyn Store>,
        sink: Arc<NotificationSink>,
        durability: Durability,
    ) -> Self {
        Self {
            state,
            store,
            sink,
            durability,
            locks: Mutex::new(HashMap::new()),
        }
    }

    fn activity_lock(&self, id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        locks.entry(id).or_default().clone()
    }

    fn persist_activities(&self, state: &HubState) -> Result<()> {
        let value = serde_json::to_value(&state.activities)?;
        store::persist(self.store.as_ref(), self.durability, ACTIVITIES_KEY, &value)
    }

    /// Persist the activity list after mutating one activity. A write
    /// failure (strict durability only; best-effort never fails) restores
    /// the activity's previous value, so a reported failure leaves no
    /// trace in the projection.
    fn persist_or_restore(&self, state: &mut HubState, id: Uuid, previous: Activity) -> Result<()> {
        if let Err(e) = self.persist_activities(state) {
            if let Some(activity) = state.activity_mut(id) {
                *activity = previous;
            }
            return Err(e);
        }
        Ok(())
    }

    /// Snapshot of all activities
    pub fn activities(&self) -> Vec<Activity> {
        self.state.read().unwrap().activities.clone()
    }

    pub fn activity(&self, id: Uuid) -> Result<Activity> {
        self.state
            .read()
            .unwrap()
            .activity(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Create a new activity: fresh id, unlocked, no registrations.
    /// Validation of the draft is the caller's concern.
    pub fn create(&self, draft: ActivityDraft) -> Result<Activity> {
        let activity = Activity::from_draft(draft, Utc::now().date_naive());
        assert_activity_invariants(&activity);

        let mut state = self.state.write().unwrap();
        state.activities.push(activity.clone());
        if let Err(e) = self.persist_activities(&state) {
            state.activities.pop();
            return Err(e);
        }
        info!(activity_id = %activity.id, name = %activity.name, "activity created");
        Ok(activity)
    }

    /// Apply an allow-listed partial update.
    ///
    /// Deliberately no lock-state guard: details stay editable after
    /// finalization. Only registration and attendance changes honor the
    /// lock.
    pub fn edit(&self, id: Uuid, updates: &ActivityUpdate) -> Result<Activity> {
        let slot = self.activity_lock(id);
        let _serialized = slot.lock().unwrap();

        let mut state = self.state.write().unwrap();
        let activity = state
            .activity_mut(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        let previous = activity.clone();
        updates.apply(activity);
        let snapshot = activity.clone();
        assert_activity_invariants(&snapshot);
        self.persist_or_restore(&mut state, id, previous)?;
        Ok(snapshot)
    }

    /// Delete an activity and its registrations. Deleting an unknown or
    /// already-deleted id is a no-op, matching the REST contract's
    /// unconditional 204.
    pub fn remove(&self, id: Uuid) -> Result<()> {
        let mut state = self.state.write().unwrap();
        let pos = match state.activities.iter().position(|a| a.id == id) {
            Some(pos) => pos,
            None => return Ok(()),
        };
        let removed = state.activities.remove(pos);
        if let Err(e) = self.persist_activities(&state) {
            state.activities.insert(pos, removed);
            return Err(e);
        }
        self.locks.lock().unwrap().remove(&id);
        info!(activity_id = %id, "activity deleted");
        Ok(())
    }

    /// Register a student. Precondition order: activity exists, not
    /// locked, not already registered.
    pub fn register(&self, activity_id: Uuid, student: &Student) -> Result<Activity> {
        let slot = self.activity_lock(activity_id);
        let _serialized = slot.lock().unwrap();

        let snapshot = {
            let mut state = self.state.write().unwrap();
            let activity = state
                .activity_mut(activity_id)
                .ok_or_else(|| Error::NotFound(activity_id.to_string()))?;
            if activity.attendance_locked {
                return Err(Error::RegistrationClosed);
            }
            if activity.is_registered(&student.student_id) {
                return Err(Error::AlreadyRegistered(student.student_id.clone()));
            }
            let previous = activity.clone();
            let registration =
                Registration::new(student.student_id.clone(), student.name.clone());
            assert_registration_defaults(&registration);
            activity.registrations.push(registration);
            let snapshot = activity.clone();
            assert_activity_invariants(&snapshot);
            self.persist_or_restore(&mut state, activity_id, previous)?;
            snapshot
        };

        self.sink.append(
            &student.student_id,
            Notification::new(
                NotificationKind::Registration,
                format!(
                    "You've successfully registered for \"{}\" on {}.",
                    snapshot.name, snapshot.date
                ),
                Some(activity_id),
                Some(snapshot.name.clone()),
            ),
        );
        info!(activity_id = %activity_id, student_id = %student.student_id, "student registered");
        Ok(snapshot)
    }

    /// Remove a student's registration. Blocked permanently once locked:
    /// reopening restores attendance editing, not registration changes.
    /// An unregistered student is a silent no-op.
    pub fn unregister(&self, activity_id: Uuid, student_id: &str) -> Result<()> {
        let slot = self.activity_lock(activity_id);
        let _serialized = slot.lock().unwrap();

        let mut state = self.state.write().unwrap();
        let activity = state
            .activity_mut(activity_id)
            .ok_or_else(|| Error::NotFound(activity_id.to_string()))?;
        if activity.attendance_locked {
            return Err(Error::AttendanceLocked);
        }
        let previous = activity.clone();
        activity.registrations.retain(|r| r.student_id != student_id);
        self.persist_or_restore(&mut state, activity_id, previous)?;
        info!(activity_id = %activity_id, student_id, "student unregistered");
        Ok(())
    }

    /// Scratch attendance marking before finalization. A student missing
    /// from the map keeps their current mark; points track the mark at the
    /// activity's default rate. Does not lock.
    pub fn mark_attendance(
        &self,
        activity_id: Uuid,
        attendance: &HashMap<String, bool>,
    ) -> Result<Activity> {
        let slot = self.activity_lock(activity_id);
        let _serialized = slot.lock().unwrap();

        let mut state = self.state.write().unwrap();
        let activity = state
            .activity_mut(activity_id)
            .ok_or_else(|| Error::NotFound(activity_id.to_string()))?;
        if activity.attendance_locked {
            return Err(Error::AlreadyLocked);
        }

        let previous = activity.clone();
        let default_points = activity.default_points;
        for reg in &mut activity.registrations {
            reg.attended = attendance.get(&reg.student_id).copied().unwrap_or(reg.attended);
            reg.points = if reg.attended { default_points } else { 0 };
        }
        let snapshot = activity.clone();
        self.persist_or_restore(&mut state, activity_id, previous)?;
        Ok(snapshot)
    }

    /// Finalize attendance: set marks (missing from the map means absent),
    /// award points, lock, and notify every registered student exactly
    /// once. A second finalize fails with `AlreadyLocked` so points are
    /// never double-awarded.
    pub fn finalize(
        &self,
        activity_id: Uuid,
        attendance: &HashMap<String, bool>,
    ) -> Result<Activity> {
        let slot = self.activity_lock(activity_id);
        let _serialized = slot.lock().unwrap();

        let snapshot = {
            let mut state = self.state.write().unwrap();
            let activity = state
                .activity_mut(activity_id)
                .ok_or_else(|| Error::NotFound(activity_id.to_string()))?;
            if activity.attendance_locked {
                return Err(Error::AlreadyLocked);
            }

            let previous = activity.clone();
            let default_points = activity.default_points;
            for reg in &mut activity.registrations {
                reg.attended = attendance.get(&reg.student_id).copied().unwrap_or(false);
                reg.points = if reg.attended { default_points } else { 0 };
            }
            activity.attendance_locked = true;
            let snapshot = activity.clone();
            assert_activity_invariants(&snapshot);
            self.persist_or_restore(&mut state, activity_id, previous)?;
            snapshot
        };

        for reg in &snapshot.registrations {
            let (kind, message) = if reg.attended {
                (
                    NotificationKind::Points,
                    format!(
                        "Attendance marked for \"{}\". You earned {} points!",
                        snapshot.name, snapshot.default_points
                    ),
                )
            } else {
                (
                    NotificationKind::Attendance,
                    format!(
                        "Attendance finalized for \"{}\". You were marked absent.",
                        snapshot.name
                    ),
                )
            };
            self.sink.append(
                &reg.student_id,
                Notification::new(kind, message, Some(activity_id), Some(snapshot.name.clone())),
            );
        }
        info!(
            activity_id = %activity_id,
            attended = snapshot.attended_count(),
            registered = snapshot.registrations.len(),
            "attendance finalized"
        );
        Ok(snapshot)
    }

    /// Unlock attendance. Always resets every registration to absent with
    /// zero points, even when the activity was not locked. No notifications
    /// are emitted.
    pub fn reopen(&self, activity_id: Uuid) -> Result<Activity> {
        let slot = self.activity_lock(activity_id);
        let _serialized = slot.lock().unwrap();

        let mut state = self.state.write().unwrap();
        let activity = state
            .activity_mut(activity_id)
            .ok_or_else(|| Error::NotFound(activity_id.to_string()))?;
        let previous = activity.clone();
        for reg in &mut activity.registrations {
            reg.attended = false;
            reg.points = 0;
        }
        activity.attendance_locked = false;
        let snapshot = activity.clone();
        assert_activity_invariants(&snapshot);
        self.persist_or_restore(&mut state, activity_id, previous)?;
        info!(activity_id = %activity_id, "attendance reopened");
        Ok(snapshot)
    }
}
