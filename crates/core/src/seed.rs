//! Demo seed data
//!
//! Populates an empty hub with a handful of students and activities so a
//! local run has something to show. Skipped when any activity already
//! exists. Everything goes through the public operations so the seeded
//! state obeys the same rules as live traffic.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::info;

use crate::error::Result;
use crate::hub::Hub;
use crate::models::{ActivityDraft, ActivityKind, StudentDraft};

const DEMO_STUDENTS: &[(&str, &str, &str)] = &[
    ("STU001", "Alice Johnson", "alice@university.edu"),
    ("STU002", "Bob Martinez", "bob@university.edu"),
    ("STU003", "Carol Davis", "carol@university.edu"),
    ("STU004", "David Wilson", "david@university.edu"),
    ("STU005", "Emma Thompson", "emma@university.edu"),
];

fn draft(
    name: &str,
    kind: ActivityKind,
    date: (i32, u32, u32),
    time: &str,
    venue: &str,
    description: &str,
    default_points: u32,
) -> ActivityDraft {
    ActivityDraft {
        name: name.to_string(),
        kind,
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("valid seed date"),
        time: time.to_string(),
        venue: venue.to_string(),
        description: description.to_string(),
        default_points,
    }
}

/// Seed demo students and activities into an empty hub
pub fn seed_demo_data(hub: &Hub) -> Result<()> {
    if !hub.engine.activities().is_empty() {
        info!("hub already has activities, skipping demo seed");
        return Ok(());
    }

    for (student_id, name, email) in DEMO_STUDENTS {
        hub.identity.register_student(StudentDraft {
            student_id: student_id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password: "student123".to_string(),
        })?;
    }
    let students: HashMap<String, _> = hub
        .identity
        .students()
        .into_iter()
        .map(|s| (s.student_id.clone(), s))
        .collect();

    let fair = hub.engine.create(draft(
        "Annual Science Fair",
        ActivityKind::Event,
        (2026, 3, 15),
        "10:00",
        "Main Auditorium",
        "Annual science fair showcasing student projects across departments.",
        50,
    ))?;
    hub.engine.register(fair.id, &students["STU001"])?;
    hub.engine.register(fair.id, &students["STU002"])?;
    hub.engine.register(fair.id, &students["STU003"])?;
    hub.engine.finalize(
        fair.id,
        &HashMap::from([("STU001".to_string(), true), ("STU002".to_string(), true)]),
    )?;

    let tournament = hub.engine.create(draft(
        "Basketball Tournament",
        ActivityKind::Sport,
        (2026, 3, 20),
        "14:00",
        "Sports Complex",
        "Inter-department basketball tournament. Teams of 5.",
        75,
    ))?;
    hub.engine.register(tournament.id, &students["STU001"])?;
    hub.engine.register(tournament.id, &students["STU004"])?;

    let meetup = hub.engine.create(draft(
        "Photography Club Meetup",
        ActivityKind::Club,
        (2026, 4, 5),
        "16:00",
        "Room 201, Arts Building",
        "Monthly photography club meetup with portfolio review.",
        30,
    ))?;
    hub.engine.register(meetup.id, &students["STU003"])?;
    hub.engine.register(meetup.id, &students["STU005"])?;

    hub.engine.create(draft(
        "Coding Hackathon 2026",
        ActivityKind::Event,
        (2026, 4, 20),
        "09:00",
        "Tech Hub, Block C",
        "24-hour hackathon. Build something awesome. Food provided!",
        100,
    ))?;

    info!("demo data seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HubConfig;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn make_hub() -> Hub {
        Hub::new(Arc::new(MemoryStore::new()), &HubConfig::default())
    }

    #[test]
    fn test_seed_populates_empty_hub() {
        let hub = make_hub();
        seed_demo_data(&hub).unwrap();

        assert_eq!(hub.identity.students().len(), 5);
        let activities = hub.engine.activities();
        assert_eq!(activities.len(), 4);

        let fair = activities
            .iter()
            .find(|a| a.name == "Annual Science Fair")
            .unwrap();
        assert!(fair.attendance_locked);
        assert_eq!(fair.registration("STU001").unwrap().points, 50);
        assert_eq!(fair.registration("STU003").unwrap().points, 0);
    }

    #[test]
    fn test_seed_skips_populated_hub() {
        let hub = make_hub();
        seed_demo_data(&hub).unwrap();
        seed_demo_data(&hub).unwrap();
        assert_eq!(hub.engine.activities().len(), 4);
        assert_eq!(hub.identity.students().len(), 5);
    }
}
