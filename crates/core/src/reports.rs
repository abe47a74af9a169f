//! Report builder
//!
//! Turns activities and student histories into tabular sheets, written out
//! as one CSV file per sheet. Sheet construction is pure so it can be
//! tested without touching the filesystem.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{Activity, Student};

/// One named table of string rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSheet {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl ReportSheet {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rows: Vec::new(),
        }
    }

    fn row(&mut self, cells: &[&str]) {
        self.rows.push(cells.iter().map(|c| c.to_string()).collect());
    }
}

/// Sum of a student's awarded points across all activities
pub fn total_points(student_id: &str, activities: &[Activity]) -> u32 {
    activities
        .iter()
        .filter_map(|a| a.registration(student_id))
        .map(|r| r.points)
        .sum()
}

/// Per-event attendance report: event info, attended, absent, and a
/// combined sheet
pub fn attendance_report(activity: &Activity) -> Vec<ReportSheet> {
    let attended: Vec<_> = activity.registrations.iter().filter(|r| r.attended).collect();
    let absent: Vec<_> = activity.registrations.iter().filter(|r| !r.attended).collect();

    let mut info = ReportSheet::new("Event Info");
    info.row(&["Event Name", activity.name.as_str()]);
    info.row(&["Date", &activity.date.to_string()]);
    info.row(&["Venue", activity.venue.as_str()]);
    info.row(&["Default Points", &activity.default_points.to_string()]);
    info.row(&["Total Registered", &activity.registrations.len().to_string()]);
    info.row(&["Total Present", &attended.len().to_string()]);
    info.row(&["Total Absent", &absent.len().to_string()]);
    info.row(&["Attendance %", &format!("{}%", activity.attendance_rate())]);

    let header = ["Student ID", "Student Name", "Status", "Points Awarded"];

    let mut present_sheet = ReportSheet::new("Attended Students");
    present_sheet.row(&header);
    for reg in &attended {
        present_sheet.row(&[
            reg.student_id.as_str(),
            reg.student_name.as_str(),
            "Present",
            &activity.default_points.to_string(),
        ]);
    }

    let mut absent_sheet = ReportSheet::new("Absent Students");
    absent_sheet.row(&header);
    for reg in &absent {
        absent_sheet.row(&[reg.student_id.as_str(), reg.student_name.as_str(), "Absent", "0"]);
    }

    let mut all_sheet = ReportSheet::new("All Students");
    all_sheet.row(&["Student ID", "Student Name", "Attendance Status", "Points Awarded"]);
    for reg in &activity.registrations {
        all_sheet.row(&[
            reg.student_id.as_str(),
            reg.student_name.as_str(),
            if reg.attended { "Present" } else { "Absent" },
            &reg.points.to_string(),
        ]);
    }

    vec![info, present_sheet, absent_sheet, all_sheet]
}

/// Per-student report: summary plus event history. An event that is not
/// yet finalized shows as Pending rather than Absent.
pub fn student_report(student: &Student, activities: &[Activity]) -> Vec<ReportSheet> {
    let registered: Vec<_> = activities
        .iter()
        .filter(|a| a.is_registered(&student.student_id))
        .collect();

    let points = total_points(&student.student_id, activities);
    let attended = registered
        .iter()
        .filter(|a| {
            a.registration(&student.student_id)
                .map(|r| r.attended)
                .unwrap_or(false)
        })
        .count();

    let mut summary = ReportSheet::new("Summary");
    summary.row(&["Student Name", student.name.as_str()]);
    summary.row(&["Student ID", student.student_id.as_str()]);
    summary.row(&["Total Points", &points.to_string()]);
    summary.row(&["Events Registered", &registered.len().to_string()]);
    summary.row(&["Events Attended", &attended.to_string()]);

    let mut history = ReportSheet::new("Event History");
    history.row(&["Event Name", "Type", "Date", "Venue", "Status", "Points"]);
    for activity in &registered {
        let reg = activity.registration(&student.student_id);
        let status = match reg {
            Some(r) if r.attended => "Present",
            _ if activity.attendance_locked => "Absent",
            _ => "Pending",
        };
        history.row(&[
            activity.name.as_str(),
            activity.kind.as_str(),
            &activity.date.to_string(),
            activity.venue.as_str(),
            status,
            &reg.map(|r| r.points).unwrap_or(0).to_string(),
        ]);
    }

    vec![summary, history]
}

/// Hub-wide summary for administrators: one row per event, one per student
pub fn admin_summary(activities: &[Activity], students: &[Student]) -> Vec<ReportSheet> {
    let mut events = ReportSheet::new("Events Summary");
    events.row(&[
        "Event Name",
        "Type",
        "Date",
        "Venue",
        "Registered",
        "Attended",
        "Attendance %",
        "Points Each",
        "Total Points Distributed",
    ]);
    for activity in activities {
        let attended = activity.attended_count();
        events.row(&[
            activity.name.as_str(),
            activity.kind.as_str(),
            &activity.date.to_string(),
            activity.venue.as_str(),
            &activity.registrations.len().to_string(),
            &attended.to_string(),
            &format!("{}%", activity.attendance_rate()),
            &activity.default_points.to_string(),
            &(attended as u32 * activity.default_points).to_string(),
        ]);
    }

    let mut roster = ReportSheet::new("Students Summary");
    roster.row(&[
        "Student ID",
        "Student Name",
        "Events Registered",
        "Events Attended",
        "Total Points",
    ]);
    for student in students {
        let registered = activities
            .iter()
            .filter(|a| a.is_registered(&student.student_id))
            .count();
        let attended = activities
            .iter()
            .filter(|a| {
                a.registration(&student.student_id)
                    .map(|r| r.attended)
                    .unwrap_or(false)
            })
            .count();
        roster.row(&[
            student.student_id.as_str(),
            student.name.as_str(),
            &registered.to_string(),
            &attended.to_string(),
            &total_points(&student.student_id, activities).to_string(),
        ]);
    }

    vec![events, roster]
}

/// Write each sheet to `<dir>/<slug>.csv`; returns the written paths
pub fn write_csv(sheets: &[ReportSheet], dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(sheets.len());
    for sheet in sheets {
        let path = dir.join(format!("{}.csv", slug(&sheet.name)));
        let mut writer = csv::Writer::from_path(&path)?;
        for row in &sheet.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        written.push(path);
    }
    Ok(written)
}

fn slug(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
