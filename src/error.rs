use thiserror::Error;
use tracing::error;
use tracing_error::SpanTrace;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("config error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),
    #[error("api error: {0}")]
    ApiError(#[from] crate::api::ApiError),
    #[error("session error: {0}")]
    SessionError(#[from] crate::session::SessionError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

pub async fn run_with_error_handler<F, T>(run: F) -> T
where
    F: AsyncFnOnce() -> AppResult<T>,
{
    match run().await {
        Ok(value) => value,
        Err(e) => {
            default_error_handler(e);
            std::process::exit(1);
        }
    }
}

fn default_error_handler(error: AppError) {
    let span = SpanTrace::capture();
    error!("{}\n{}", error, span);
}

pub fn log_error<E: std::error::Error + std::fmt::Display>(error: &E) {
    let span = SpanTrace::capture();
    error!("{}\n{}", error, span);
}
