//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use crate::models::{Activity, Registration};

/// Validate that an Activity's state is internally consistent
pub fn assert_activity_invariants(activity: &Activity) {
    // Name must not be empty
    debug_assert!(
        !activity.name.trim().is_empty(),
        "Activity {} has empty name",
        activity.id
    );

    // At most one registration per student
    let mut seen = std::collections::HashSet::new();
    for reg in &activity.registrations {
        debug_assert!(
            seen.insert(reg.student_id.as_str()),
            "Activity {} has duplicate registration for {}",
            activity.id,
            reg.student_id
        );
    }

    for reg in &activity.registrations {
        // Points only exist for attendees. Awarded points are not checked
        // against default_points: the default stays editable after
        // finalization, so already-awarded points may lag behind it.
        debug_assert!(
            reg.points == 0 || reg.attended,
            "Activity {}: {} has {} points but attended=false",
            activity.id,
            reg.student_id,
            reg.points
        );
    }
}

/// Validate that a just-created registration carries the defaults
pub fn assert_registration_defaults(reg: &Registration) {
    debug_assert!(
        !reg.attended,
        "fresh registration for {} starts attended",
        reg.student_id
    );
    debug_assert!(
        reg.points == 0,
        "fresh registration for {} starts with {} points",
        reg.student_id,
        reg.points
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Activity, ActivityDraft, ActivityKind, Registration};
    use chrono::NaiveDate;

    fn make_activity() -> Activity {
        Activity::from_draft(
            ActivityDraft {
                name: "Basketball Tournament".to_string(),
                kind: ActivityKind::Sport,
                date: NaiveDate::from_ymd_opt(2026, 3, 20).unwrap(),
                time: "14:00".to_string(),
                venue: "Sports Complex".to_string(),
                description: "Teams of 5.".to_string(),
                default_points: 75,
            },
            NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
        )
    }

    #[test]
    fn test_fresh_activity_is_valid() {
        assert_activity_invariants(&make_activity());
    }

    #[test]
    fn test_finalized_activity_is_valid() {
        let mut activity = make_activity();
        activity.attendance_locked = true;
        activity.registrations = vec![
            Registration {
                student_id: "STU001".into(),
                student_name: "Alice Johnson".into(),
                attended: true,
                points: 75,
            },
            Registration::new("STU004".into(), "David Wilson".into()),
        ];
        assert_activity_invariants(&activity);
    }

    #[test]
    fn test_awarded_points_survive_default_points_edit() {
        let mut activity = make_activity();
        activity.attendance_locked = true;
        activity.registrations = vec![Registration {
            student_id: "STU001".into(),
            student_name: "Alice Johnson".into(),
            attended: true,
            points: 75,
        }];
        activity.default_points = 100;
        assert_activity_invariants(&activity);
    }

    #[test]
    fn test_fresh_registration_defaults() {
        assert_registration_defaults(&Registration::new(
            "STU001".into(),
            "Alice Johnson".into(),
        ));
    }

    #[test]
    #[should_panic(expected = "duplicate registration")]
    fn test_duplicate_registration_panics() {
        let mut activity = make_activity();
        activity.registrations = vec![
            Registration::new("STU001".into(), "Alice Johnson".into()),
            Registration::new("STU001".into(), "Alice Johnson".into()),
        ];
        assert_activity_invariants(&activity);
    }

    #[test]
    #[should_panic(expected = "attended=false")]
    fn test_points_without_attendance_panics() {
        let mut activity = make_activity();
        activity.registrations = vec![Registration {
            student_id: "STU001".into(),
            student_name: "Alice Johnson".into(),
            attended: false,
            points: 75,
        }];
        assert_activity_invariants(&activity);
    }
}
