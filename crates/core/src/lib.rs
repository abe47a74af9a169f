//! ActivityHub Core Library
//!
//! Models, lifecycle engine, identity, notifications, reports, and storage
//! for the ActivityHub platform.

pub mod badge;
pub mod config;
pub mod engine;
pub mod error;
pub mod hub;
pub mod identity;
pub mod invariants;
pub mod models;
pub mod notify;
pub mod reports;
pub mod seed;
pub mod state;
pub mod store;

pub use badge::Badge;
pub use config::{AdminCredentials, Durability, HubConfig, StorageBackend};
pub use engine::ActivityEngine;
pub use error::{Error, Result};
pub use hub::Hub;
pub use identity::IdentityService;
pub use models::*;
pub use notify::{NotificationSink, ADMIN_USER_KEY, NOTIFICATION_CAP};
pub use reports::{
    admin_summary, attendance_report, student_report, total_points, write_csv, ReportSheet,
};
pub use state::HubState;
pub use store::{JsonFileStore, MemoryStore, Store, ACTIVITIES_KEY, USERS_KEY};
