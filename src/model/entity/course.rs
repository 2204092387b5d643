use serde::{Deserialize, Serialize};

use crate::model::{lenient_u32, string_or_number};

/// Difficulty level of a course. Unknown levels are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
    Other(String),
}

impl Default for CourseLevel {
    /// A course without a level.
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for CourseLevel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Beginner" => Self::Beginner,
            "Intermediate" => Self::Intermediate,
            "Advanced" => Self::Advanced,
            _ => Self::Other(value),
        }
    }
}

impl From<CourseLevel> for String {
    fn from(value: CourseLevel) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Beginner => write!(f, "Beginner"),
            Self::Intermediate => write!(f, "Intermediate"),
            Self::Advanced => write!(f, "Advanced"),
            Self::Other(level) => write!(f, "{level}"),
        }
    }
}

/// Course as returned by the catalogue listing, `modules` is a count here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub duration: String,
    #[serde(rename = "students", default, deserialize_with = "lenient_u32")]
    pub student_count: u32,
    #[serde(default)]
    pub level: CourseLevel,
    #[serde(rename = "modules", default, deserialize_with = "lenient_u32")]
    pub module_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Module entry embedded into a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSummary {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub order: u32,
    #[serde(default)]
    pub is_locked: bool,
}

/// Full course with its modules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub duration: String,
    #[serde(rename = "students", default, deserialize_with = "lenient_u32")]
    pub student_count: u32,
    #[serde(default)]
    pub level: CourseLevel,
    #[serde(default)]
    pub modules: Vec<ModuleSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl Course {
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Puts modules into their `order`; ties keep the server order.
    pub fn sort_modules(&mut self) {
        self.modules.sort_by_key(|m| m.order);
    }
}

/// Optional filters for the catalogue listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilters {
    pub level: Option<String>,
    pub search: Option<String>,
}

impl CourseFilters {
    pub fn with_level<S: Into<String>>(mut self, level: S) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn with_search<S: Into<String>>(mut self, search: S) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Query pairs for the filters that are set and non-empty.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(level) = self.level.as_deref().filter(|l| !l.is_empty()) {
            pairs.push(("level", level));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search", search));
        }
        pairs
    }
}
