//! Typed access to the UniPortal REST API.
//!
//! Every call is a single attempt: no retries, no caching. Failures come back as [`ApiError`],
//! whose [`ApiError::client_display`] is what the user gets to see.

mod error;
pub use error::{ApiError, ApiResult, CONNECTION_FAILED};

mod envelope;
pub use envelope::{AuthGrant, parse_envelope};

mod client;
pub use client::ApiClient;

mod auth;
mod courses;
mod modules;
mod user;

use async_trait::async_trait;

use crate::model::entity::{
    Course, CourseFilters, CourseSummary, Credentials, Enrollment, Module, ModuleSummary,
    Registration,
};

/// Operations offered by the backend, grouped the way views use them.
///
/// Authenticated calls take the bearer token of the current session.
#[async_trait]
pub trait PortalApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> ApiResult<AuthGrant>;

    async fn register(&self, registration: &Registration) -> ApiResult<AuthGrant>;

    async fn logout(&self, token: &str) -> ApiResult<()>;

    async fn list_courses(&self, filters: &CourseFilters) -> ApiResult<Vec<CourseSummary>>;

    /// Course with modules in display order.
    async fn get_course(&self, course_id: &str) -> ApiResult<Course>;

    async fn list_course_modules(&self, course_id: &str) -> ApiResult<Vec<ModuleSummary>>;

    async fn get_module(&self, course_id: &str, module_id: &str) -> ApiResult<Module>;

    async fn enroll_module(&self, token: &str, course_id: &str, module_id: &str) -> ApiResult<()>;

    async fn drop_module(&self, token: &str, course_id: &str, module_id: &str) -> ApiResult<()>;

    async fn list_enrolled_modules(&self, token: &str) -> ApiResult<Vec<Enrollment>>;

    async fn update_progress(
        &self,
        token: &str,
        course_id: &str,
        module_id: &str,
        progress: u8,
    ) -> ApiResult<()>;

    async fn get_progress(&self, token: &str, course_id: &str, module_id: &str) -> ApiResult<u8>;
}

#[async_trait]
impl PortalApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> ApiResult<AuthGrant> {
        ApiClient::login(self, credentials).await
    }

    async fn register(&self, registration: &Registration) -> ApiResult<AuthGrant> {
        ApiClient::register(self, registration).await
    }

    async fn logout(&self, token: &str) -> ApiResult<()> {
        ApiClient::logout(self, token).await
    }

    async fn list_courses(&self, filters: &CourseFilters) -> ApiResult<Vec<CourseSummary>> {
        ApiClient::list_courses(self, filters).await
    }

    async fn get_course(&self, course_id: &str) -> ApiResult<Course> {
        ApiClient::get_course(self, course_id).await
    }

    async fn list_course_modules(&self, course_id: &str) -> ApiResult<Vec<ModuleSummary>> {
        ApiClient::list_course_modules(self, course_id).await
    }

    async fn get_module(&self, course_id: &str, module_id: &str) -> ApiResult<Module> {
        ApiClient::get_module(self, course_id, module_id).await
    }

    async fn enroll_module(&self, token: &str, course_id: &str, module_id: &str) -> ApiResult<()> {
        ApiClient::enroll_module(self, token, course_id, module_id).await
    }

    async fn drop_module(&self, token: &str, course_id: &str, module_id: &str) -> ApiResult<()> {
        ApiClient::drop_module(self, token, course_id, module_id).await
    }

    async fn list_enrolled_modules(&self, token: &str) -> ApiResult<Vec<Enrollment>> {
        ApiClient::list_enrolled_modules(self, token).await
    }

    async fn update_progress(
        &self,
        token: &str,
        course_id: &str,
        module_id: &str,
        progress: u8,
    ) -> ApiResult<()> {
        ApiClient::update_progress(self, token, course_id, module_id, progress).await
    }

    async fn get_progress(&self, token: &str, course_id: &str, module_id: &str) -> ApiResult<u8> {
        ApiClient::get_progress(self, token, course_id, module_id).await
    }
}
