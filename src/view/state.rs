use std::future::Future;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::api::ApiResult;

/// Where a view sends the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Signup,
    Courses,
    Course { course_id: String },
    Module { course_id: String, module_id: String },
    Dashboard,
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Home => write!(f, "/"),
            Self::Login => write!(f, "/login"),
            Self::Signup => write!(f, "/signup"),
            Self::Courses => write!(f, "/courses"),
            Self::Course { course_id } => write!(f, "/courses/{course_id}"),
            Self::Module {
                course_id,
                module_id,
            } => write!(f, "/courses/{course_id}/modules/{module_id}"),
            Self::Dashboard => write!(f, "/dashboard"),
        }
    }
}

/// Returned by `mount` instead of a view when the view may not be shown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("redirect to {to}")]
pub struct Redirect {
    pub to: Route,
}

impl Redirect {
    pub fn login() -> Self {
        Self { to: Route::Login }
    }
}

/// Loading / error / content.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<ApiResult<T>> for ViewState<T> {
    fn from(value: ApiResult<T>) -> Self {
        match value {
            Ok(value) => Self::Ready(value),
            Err(e) => Self::Failed(e.client_display()),
        }
    }
}

/// Lifetime of a mounted view. Responses that arrive after `unmount` are dropped.
#[derive(Debug, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unmount(&self) {
        self.token.cancel();
    }

    pub fn is_unmounted(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Token to unmount the view from elsewhere, e.g. on navigation.
    pub fn handle(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Drives `fut` unless the view goes away first; `None` means the result must be ignored.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            out = fut => (!self.token.is_cancelled()).then_some(out),
        }
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
