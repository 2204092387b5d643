pub mod config;
pub use config::{Config, ConfigError, ConfigResult};

pub mod api;
pub mod error;
pub mod model;
pub mod session;
pub mod view;

use crate::{
    api::ApiClient,
    error::AppResult,
    session::{SessionContext, SessionStore},
};

static APPLICATION_NAME: &str = "uniportal";

/// Everything a front-end needs: configuration, the API client and the session context.
#[derive(Debug)]
pub struct Portal {
    config: Config,
    api: ApiClient,
    session: SessionContext,
}

impl Portal {
    pub fn new(config: Config) -> AppResult<Self> {
        let api = ApiClient::from_config(&config)?;
        let session = SessionContext::open(SessionStore::new(config.session_path()));
        tracing::debug!("api at {}", api.base_url());

        Ok(Self {
            config,
            api,
            session,
        })
    }

    #[tracing::instrument]
    pub async fn init(use_local: bool) -> AppResult<Self> {
        let config = Config::get_or_init(use_local).await;
        Self::new(config.clone())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// API client and session context together, for login and logout.
    pub fn parts_mut(&mut self) -> (&ApiClient, &mut SessionContext) {
        (&self.api, &mut self.session)
    }
}

pub fn setup_trace() {
    use tracing_error::ErrorLayer;
    use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

    // load .env file for RUST_LOG etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .with(ErrorLayer::default())
        .init();

    tracing::debug!("tracing initialized.");
}
