use reqwest::Method;
use serde::Serialize;

use crate::{
    api::{
        ApiClient, ApiResult,
        envelope::{Ack, EnrollmentsPayload, ProgressPayload},
    },
    model::entity::{Enrollment, percent},
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressUpdate<'a> {
    course_id: &'a str,
    module_id: &'a str,
    progress: u8,
}

impl ApiClient {
    #[tracing::instrument(skip_all)]
    pub async fn list_enrolled_modules(&self, token: &str) -> ApiResult<Vec<Enrollment>> {
        let url = self.endpoint(&["user", "enrolled-modules"])?;
        let request = self.authorized(Method::GET, url, token);
        let payload: EnrollmentsPayload = self
            .send(request, "Failed to fetch enrolled modules")
            .await?;
        Ok(payload.modules)
    }

    #[tracing::instrument(skip(self, token))]
    pub async fn update_progress(
        &self,
        token: &str,
        course_id: &str,
        module_id: &str,
        progress: u8,
    ) -> ApiResult<()> {
        let url = self.endpoint(&["user", "progress"])?;
        let request = self.authorized(Method::PUT, url, token).json(&ProgressUpdate {
            course_id,
            module_id,
            progress,
        });
        self.send::<Ack>(request, "Failed to update progress").await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, token))]
    pub async fn get_progress(
        &self,
        token: &str,
        course_id: &str,
        module_id: &str,
    ) -> ApiResult<u8> {
        let url = self.endpoint(&["user", "progress"])?;
        let request = self
            .authorized(Method::GET, url, token)
            .query(&[("courseId", course_id), ("moduleId", module_id)]);
        let payload: ProgressPayload = self.send(request, "Failed to fetch progress").await?;
        Ok(percent(payload.progress))
    }
}
