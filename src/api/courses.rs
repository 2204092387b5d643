use reqwest::Method;

use crate::{
    api::{
        ApiClient, ApiResult,
        envelope::{CoursePayload, CoursesPayload, ModulesPayload},
    },
    model::entity::{Course, CourseFilters, CourseSummary, ModuleSummary},
};

impl ApiClient {
    #[tracing::instrument(skip(self))]
    pub async fn list_courses(&self, filters: &CourseFilters) -> ApiResult<Vec<CourseSummary>> {
        let url = self.endpoint(&["courses"])?;
        let request = self.request(Method::GET, url).query(&filters.query_pairs());
        let payload: CoursesPayload = self.send(request, "Failed to fetch courses").await?;
        Ok(payload.courses)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_course(&self, course_id: &str) -> ApiResult<Course> {
        let url = self.endpoint(&["courses", course_id])?;
        let request = self.request(Method::GET, url);
        let mut payload: CoursePayload = self.send(request, "Failed to fetch course").await?;
        payload.course.sort_modules();
        Ok(payload.course)
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_course_modules(&self, course_id: &str) -> ApiResult<Vec<ModuleSummary>> {
        let url = self.endpoint(&["courses", course_id, "modules"])?;
        let request = self.request(Method::GET, url);
        let mut payload: ModulesPayload = self.send(request, "Failed to fetch modules").await?;
        payload.modules.sort_by_key(|m| m.order);
        Ok(payload.modules)
    }
}
