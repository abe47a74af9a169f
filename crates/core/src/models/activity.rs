//! Activity and registration models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed activity categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Event,
    Sport,
    Club,
    Workshop,
    Seminar,
    Cultural,
    Volunteering,
    Competition,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Event => "event",
            ActivityKind::Sport => "sport",
            ActivityKind::Club => "club",
            ActivityKind::Workshop => "workshop",
            ActivityKind::Seminar => "seminar",
            ActivityKind::Cultural => "cultural",
            ActivityKind::Volunteering => "volunteering",
            ActivityKind::Competition => "competition",
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A student's enrollment record within one Activity.
///
/// Owned exclusively by its parent Activity; at most one entry per
/// `student_id` within an activity's registration list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub student_id: String,
    /// Snapshot of the student's display name at registration time
    pub student_name: String,
    pub attended: bool,
    /// Set only by finalize/reopen, never by direct edit
    pub points: u32,
}

impl Registration {
    pub fn new(student_id: String, student_name: String) -> Self {
        Self {
            student_id,
            student_name,
            attended: false,
            points: 0,
        }
    }
}

/// A schedulable occurrence students can register for
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub date: NaiveDate,
    pub time: String,
    pub venue: String,
    pub description: String,
    /// Points awarded per attendee when attendance is finalized
    pub default_points: u32,
    /// Once true, registration changes and re-finalization are blocked
    /// until explicitly reopened
    pub attendance_locked: bool,
    pub created_at: NaiveDate,
    /// Insertion order = registration order
    pub registrations: Vec<Registration>,
}

impl Activity {
    /// Build a fresh activity from a draft: unlocked, no registrations
    pub fn from_draft(draft: ActivityDraft, today: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            kind: draft.kind,
            date: draft.date,
            time: draft.time,
            venue: draft.venue,
            description: draft.description,
            default_points: draft.default_points,
            attendance_locked: false,
            created_at: today,
            registrations: Vec::new(),
        }
    }

    pub fn registration(&self, student_id: &str) -> Option<&Registration> {
        self.registrations
            .iter()
            .find(|r| r.student_id == student_id)
    }

    pub fn is_registered(&self, student_id: &str) -> bool {
        self.registration(student_id).is_some()
    }

    pub fn attended_count(&self) -> usize {
        self.registrations.iter().filter(|r| r.attended).count()
    }

    /// Attendance percentage, rounded; 0 when nobody registered
    pub fn attendance_rate(&self) -> u32 {
        if self.registrations.is_empty() {
            return 0;
        }
        let attended = self.attended_count() as f64;
        let total = self.registrations.len() as f64;
        (attended / total * 100.0).round() as u32
    }
}

/// Creation input for an activity. Caller-validated: non-empty fields,
/// `default_points >= 1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub date: NaiveDate,
    pub time: String,
    pub venue: String,
    pub description: String,
    pub default_points: u32,
}

/// Allow-listed partial update for an activity.
///
/// Replaces the generic shallow-merge edit path: `registrations`,
/// `attendance_locked`, and `created_at` cannot be reached through here,
/// only through their dedicated engine operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityUpdate {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<ActivityKind>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub description: Option<String>,
    pub default_points: Option<u32>,
}

impl ActivityUpdate {
    /// Apply the set fields onto an activity, leaving the rest untouched
    pub fn apply(&self, activity: &mut Activity) {
        if let Some(name) = &self.name {
            activity.name = name.clone();
        }
        if let Some(kind) = self.kind {
            activity.kind = kind;
        }
        if let Some(date) = self.date {
            activity.date = date;
        }
        if let Some(time) = &self.time {
            activity.time = time.clone();
        }
        if let Some(venue) = &self.venue {
            activity.venue = venue.clone();
        }
        if let Some(description) = &self.description {
            activity.description = description.clone();
        }
        if let Some(points) = self.default_points {
            activity.default_points = points;
        }
    }
}
