use std::fmt;

use crate::{
    session::Session,
    view::{Route, write_header},
};

/// Landing page. Needs no session and no network.
#[derive(Debug)]
pub struct HomeView {
    session: Option<Session>,
}

impl HomeView {
    pub fn mount(session: Option<&Session>) -> Self {
        Self {
            session: session.cloned(),
        }
    }

    /// Navigation targets offered on the landing page.
    pub fn links(&self) -> Vec<Route> {
        match self.session {
            Some(_) => vec![Route::Courses, Route::Dashboard],
            None => vec![Route::Courses, Route::Login, Route::Signup],
        }
    }
}

impl fmt::Display for HomeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.session {
            Some(session) => write_header(f, session, None)?,
            None => writeln!(
                f,
                "UniPortal    login: {}  sign up: {}",
                Route::Login,
                Route::Signup
            )?,
        }

        writeln!(f)?;
        writeln!(f, "Welcome to UniPortal")?;
        writeln!(
            f,
            "Your gateway to academic excellence. Explore courses, manage your learning journey, \
             and achieve your educational goals."
        )?;
        writeln!(f)?;
        writeln!(f, "Explore courses: {}", Route::Courses)
    }
}
