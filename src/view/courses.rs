use std::fmt;

use crate::{
    api::PortalApi,
    model::entity::{CourseFilters, CourseSummary},
    session::Session,
    view::{Redirect, Route, ViewScope, ViewState, style::level_badge, write_header},
};

/// Course catalogue.
#[derive(Debug)]
pub struct CourseListView {
    scope: ViewScope,
    session: Session,
    filters: CourseFilters,
    courses: ViewState<Vec<CourseSummary>>,
}

impl CourseListView {
    pub fn mount(session: Option<&Session>, filters: CourseFilters) -> Result<Self, Redirect> {
        let session = session.ok_or_else(Redirect::login)?;

        Ok(Self {
            scope: ViewScope::new(),
            session: session.clone(),
            filters,
            courses: ViewState::Loading,
        })
    }

    #[tracing::instrument(skip_all)]
    pub async fn load<A: PortalApi + ?Sized>(&mut self, api: &A) {
        let Some(result) = self.scope.run(api.list_courses(&self.filters)).await else {
            tracing::debug!("course list unmounted, dropping response");
            return;
        };

        self.courses = result.into();
    }

    /// Retry action shown with the error.
    pub async fn retry<A: PortalApi + ?Sized>(&mut self, api: &A) {
        self.courses = ViewState::Loading;
        self.load(api).await;
    }

    pub fn unmount(&self) {
        self.scope.unmount();
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn state(&self) -> &ViewState<Vec<CourseSummary>> {
        &self.courses
    }
}

impl fmt::Display for CourseListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, &self.session, Some(Route::Courses))?;
        writeln!(f)?;
        writeln!(f, "Available Courses")?;
        writeln!(f, "Explore our comprehensive course catalog")?;
        writeln!(f)?;

        let courses = match &self.courses {
            ViewState::Loading => return writeln!(f, "Loading courses..."),
            ViewState::Failed(message) => {
                writeln!(f, "{message}")?;
                return writeln!(f, "[Retry]");
            }
            ViewState::Ready(courses) => courses,
        };

        if courses.is_empty() {
            return writeln!(f, "No courses available");
        }

        for course in courses {
            writeln!(f, "{}  [{}] ({:?})", course.title, course.level, level_badge(&course.level))?;
            if !course.description.is_empty() {
                writeln!(f, "  {}", course.description)?;
            }
            writeln!(f, "  Instructor: {}", course.instructor)?;
            writeln!(f, "  Duration: {}", course.duration)?;
            writeln!(f, "  {} modules", course.module_count)?;
            writeln!(f, "  {} students enrolled", course.student_count)?;
            writeln!(
                f,
                "  View Course Details: {}",
                Route::Course {
                    course_id: course.id.clone()
                }
            )?;
            writeln!(f)?;
        }

        Ok(())
    }
}
