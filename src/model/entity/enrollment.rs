use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::{lenient_f64, opt_string_or_number, string_or_number};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnrollmentStatus {
    InProgress,
    Completed,
    Overdue,
    #[default]
    #[serde(other)]
    Unknown,
}

impl EnrollmentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Overdue => "overdue",
            Self::InProgress | Self::Unknown => "in progress",
        }
    }
}

/// One enrolled module of the current user, decorated for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub course_id: String,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub module_id: Option<String>,
    #[serde(default)]
    pub course_title: String,
    #[serde(default)]
    pub module_title: String,
    /// Raw percent as sent; the backend may send fractions.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub progress: f64,
    #[serde(default)]
    pub enrolled_date: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub status: EnrollmentStatus,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub duration: String,
}

impl Enrollment {
    /// Percent complete, rounded and clamped to 0..=100.
    pub fn progress(&self) -> u8 {
        percent(self.progress)
    }

    /// Module this enrollment belongs to.
    ///
    /// Uses `moduleId` when the backend sends it, otherwise strips the `"{courseId}-"` prefix the
    /// backend puts in front of enrollment ids. Module ids containing `-` survive this.
    pub fn module_id(&self) -> &str {
        if let Some(id) = self.module_id.as_deref() {
            return id;
        }

        self.id
            .strip_prefix(self.course_id.as_str())
            .and_then(|rest| rest.strip_prefix('-'))
            .filter(|rest| !rest.is_empty())
            .unwrap_or(self.id.as_str())
    }

    pub fn matches(&self, course_id: &str, module_id: &str) -> bool {
        self.course_id == course_id && self.module_id() == module_id
    }

    pub fn enrolled_on(&self) -> Option<NaiveDate> {
        parse_date(&self.enrolled_date)
    }

    pub fn due_on(&self) -> Option<NaiveDate> {
        parse_date(&self.due_date)
    }
}

/// Rounds a raw percent into 0..=100.
pub(crate) fn percent(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}
