//! Student account model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A student account.
///
/// `student_id` is the human-facing business key (e.g. "STU001"), distinct
/// from the opaque `id`. The password is stored verbatim; a known
/// weakness, not remediated here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub joined_at: NaiveDate,
}

impl Student {
    pub fn from_draft(draft: StudentDraft, today: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            student_id: draft.student_id,
            name: draft.name,
            email: draft.email,
            password: draft.password,
            role: "student".to_string(),
            joined_at: today,
        }
    }
}

/// Sign-up input for a new student account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDraft {
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_draft_assigns_role_and_join_date() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let student = Student::from_draft(
            StudentDraft {
                student_id: "STU001".to_string(),
                name: "Alice Johnson".to_string(),
                email: "alice@university.edu".to_string(),
                password: "student123".to_string(),
            },
            today,
        );
        assert_eq!(student.role, "student");
        assert_eq!(student.joined_at, today);
        assert_ne!(student.id, Uuid::nil());
    }

    #[test]
    fn test_serde_wire_names() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let student = Student::from_draft(
            StudentDraft {
                student_id: "STU002".to_string(),
                name: "Bob Martinez".to_string(),
                email: "bob@university.edu".to_string(),
                password: "student123".to_string(),
            },
            today,
        );
        let json = serde_json::to_value(&student).unwrap();
        assert_eq!(json["studentId"], "STU002");
        assert_eq!(json["joinedAt"], "2026-02-01");
    }
}
