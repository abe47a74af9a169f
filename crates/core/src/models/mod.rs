//! Data models for ActivityHub

mod activity;
mod notification;
mod student;

pub use activity::*;
pub use notification::*;
pub use student::*;
