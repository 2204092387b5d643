//! Presentation hints derived from data. How they look is up to the front-end.

use crate::model::entity::{CourseLevel, EnrollmentStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Default,
    Secondary,
    Destructive,
}

pub fn level_badge(level: &CourseLevel) -> BadgeVariant {
    match level {
        CourseLevel::Beginner => BadgeVariant::Secondary,
        CourseLevel::Intermediate => BadgeVariant::Default,
        CourseLevel::Advanced | CourseLevel::Other(_) => BadgeVariant::Destructive,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Success,
    Danger,
    Info,
}

pub fn status_tone(status: EnrollmentStatus) -> StatusTone {
    match status {
        EnrollmentStatus::Completed => StatusTone::Success,
        EnrollmentStatus::Overdue => StatusTone::Danger,
        EnrollmentStatus::InProgress | EnrollmentStatus::Unknown => StatusTone::Info,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressTone {
    High,
    Medium,
    Low,
}

pub fn progress_tone(progress: u8) -> ProgressTone {
    match progress {
        80.. => ProgressTone::High,
        50..=79 => ProgressTone::Medium,
        _ => ProgressTone::Low,
    }
}

/// Ten-cell text bar, e.g. `[######----]`.
pub fn progress_bar(progress: u8) -> String {
    let filled = (progress.min(100) as usize + 5) / 10;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(10 - filled))
}
