//! Response envelope: every body carries `success` and maybe `message` next to the payload.

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::api::{ApiError, ApiResult};
use crate::model::{
    entity::{Course, CourseSummary, Enrollment, Module, ModuleSummary, UserProfile},
    lenient_f64,
};

#[derive(Deserialize)]
struct Status {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// Turns a raw body into the endpoint payload, or into `Rejected` with the server message
/// (`fallback` when the server sends none).
pub fn parse_envelope<T: DeserializeOwned>(body: &[u8], fallback: &str) -> ApiResult<T> {
    let value: Value = serde_json::from_slice(body)?;
    let status = Status::deserialize(&value)?;

    if !status.success {
        let message = status
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        return Err(ApiError::Rejected { message });
    }

    Ok(serde_json::from_value(value)?)
}

/// Token and profile handed out by login and registration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthGrant {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Ack {}

#[derive(Debug, Deserialize)]
pub(crate) struct CoursesPayload {
    #[serde(default)]
    pub courses: Vec<CourseSummary>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CoursePayload {
    pub course: Course,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModulesPayload {
    #[serde(default)]
    pub modules: Vec<ModuleSummary>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModulePayload {
    pub module: Module,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EnrollmentsPayload {
    #[serde(default)]
    pub modules: Vec<Enrollment>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProgressPayload {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub progress: f64,
}
