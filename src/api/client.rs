use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    Config,
    api::{ApiError, ApiResult, envelope::parse_envelope},
};

/// HTTP access to the UniPortal backend. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base: Url) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("uniportal/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base })
    }

    pub fn from_config(config: &Config) -> ApiResult<Self> {
        let base = Url::parse(config.api().base_url())?;
        Self::new(base)
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Base url with `segments` appended, each one percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!("{} {}", method, url.path());
        self.http.request(method, url)
    }

    pub(crate) fn authorized(&self, method: Method, url: Url, token: &str) -> RequestBuilder {
        self.request(method, url).bearer_auth(token)
    }

    /// Sends exactly once and reads the envelope, whatever the status code.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> ApiResult<T> {
        let response = request.send().await.inspect_err(|e| {
            tracing::warn!("request failed: {}", e);
        })?;

        let status = response.status();
        let body = response.bytes().await?;
        tracing::trace!("response {} ({} bytes)", status, body.len());

        parse_envelope(&body, fallback).inspect_err(|e| {
            tracing::warn!("{} ({}): {}", fallback, status, e);
        })
    }
}
