//! Page views: mount guard, fetch, then loading / error / content.
//!
//! Views render themselves as text through `Display`. Every view owns a [`ViewScope`], so a
//! response arriving after `unmount` never touches the view.

mod state;
pub use state::{Redirect, Route, ViewScope, ViewState};

pub mod style;

mod home;
pub use home::HomeView;

mod courses;
pub use courses::CourseListView;

mod course;
pub use course::CourseDetailView;

mod module;
pub use module::ModuleDetailView;

mod dashboard;
pub use dashboard::{DashboardStats, DashboardView, EnrollmentLinks};

use std::fmt;

use crate::{
    api::PortalApi,
    session::{Session, SessionContext, SessionResult},
};

/// Outcome of a user action, shown once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Failure(message) => message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(message) => write!(f, "{message}"),
            Self::Failure(message) => write!(f, "error: {message}"),
        }
    }
}

/// Logout action available from every signed-in view. Always ends on the home page.
pub async fn logout<A: PortalApi + ?Sized>(
    context: &mut SessionContext,
    api: &A,
) -> SessionResult<Route> {
    context.logout(api).await?;
    Ok(Route::Home)
}

pub(crate) fn write_header(
    f: &mut fmt::Formatter<'_>,
    session: &Session,
    active: Option<Route>,
) -> fmt::Result {
    let mark = |route: Route| if active.as_ref() == Some(&route) { "*" } else { "" };

    writeln!(
        f,
        "UniPortal    {}Courses {}  {}Dashboard {}    Welcome, {}",
        mark(Route::Courses),
        Route::Courses,
        mark(Route::Dashboard),
        Route::Dashboard,
        session.user().display_name()
    )
}
