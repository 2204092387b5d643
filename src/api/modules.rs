use reqwest::Method;
use serde_json::json;

use crate::{
    api::{
        ApiClient, ApiResult,
        envelope::{Ack, ModulePayload},
    },
    model::entity::Module,
};

impl ApiClient {
    #[tracing::instrument(skip(self))]
    pub async fn get_module(&self, course_id: &str, module_id: &str) -> ApiResult<Module> {
        let url = self.endpoint(&["courses", course_id, "modules", module_id])?;
        let request = self.request(Method::GET, url);
        let payload: ModulePayload = self.send(request, "Failed to fetch module").await?;
        Ok(payload.module)
    }

    #[tracing::instrument(skip(self, token))]
    pub async fn enroll_module(
        &self,
        token: &str,
        course_id: &str,
        module_id: &str,
    ) -> ApiResult<()> {
        let url = self.endpoint(&["modules", module_id, "enroll"])?;
        let request = self
            .authorized(Method::POST, url, token)
            .json(&json!({ "courseId": course_id }));
        self.send::<Ack>(request, "Failed to enroll in module").await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, token))]
    pub async fn drop_module(
        &self,
        token: &str,
        course_id: &str,
        module_id: &str,
    ) -> ApiResult<()> {
        let url = self.endpoint(&["modules", module_id, "enroll"])?;
        let request = self
            .authorized(Method::DELETE, url, token)
            .query(&[("courseId", course_id)]);
        self.send::<Ack>(request, "Failed to drop module").await?;
        Ok(())
    }
}
