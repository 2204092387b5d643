use reqwest::Method;

use crate::{
    api::{ApiClient, ApiResult, AuthGrant, envelope::Ack},
    model::entity::{Credentials, Registration},
};

impl ApiClient {
    #[tracing::instrument(skip_all, fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<AuthGrant> {
        let url = self.endpoint(&["auth", "login"])?;
        let request = self.request(Method::POST, url).json(credentials);
        self.send(request, "Login failed").await
    }

    #[tracing::instrument(skip_all, fields(email = %registration.email))]
    pub async fn register(&self, registration: &Registration) -> ApiResult<AuthGrant> {
        let url = self.endpoint(&["auth", "register"])?;
        let request = self.request(Method::POST, url).json(registration);
        self.send(request, "Registration failed").await
    }

    #[tracing::instrument(skip_all)]
    pub async fn logout(&self, token: &str) -> ApiResult<()> {
        let url = self.endpoint(&["auth", "logout"])?;
        let request = self.authorized(Method::POST, url, token);
        self.send::<Ack>(request, "Logout failed").await?;
        Ok(())
    }
}
