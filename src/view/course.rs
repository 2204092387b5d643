use std::fmt;

use crate::{
    api::PortalApi,
    model::entity::Course,
    session::Session,
    view::{Redirect, Route, ViewScope, ViewState, style::level_badge, write_header},
};

/// One course with its ordered modules.
#[derive(Debug)]
pub struct CourseDetailView {
    scope: ViewScope,
    session: Session,
    course_id: String,
    course: ViewState<Course>,
}

impl CourseDetailView {
    pub fn mount(session: Option<&Session>, course_id: &str) -> Result<Self, Redirect> {
        let session = session.ok_or_else(Redirect::login)?;

        Ok(Self {
            scope: ViewScope::new(),
            session: session.clone(),
            course_id: course_id.to_string(),
            course: ViewState::Loading,
        })
    }

    #[tracing::instrument(skip_all, fields(course_id = %self.course_id))]
    pub async fn load<A: PortalApi + ?Sized>(&mut self, api: &A) {
        let Some(result) = self.scope.run(api.get_course(&self.course_id)).await else {
            return;
        };

        self.course = result.into();
    }

    pub async fn retry<A: PortalApi + ?Sized>(&mut self, api: &A) {
        self.course = ViewState::Loading;
        self.load(api).await;
    }

    pub fn unmount(&self) {
        self.scope.unmount();
    }

    pub fn state(&self) -> &ViewState<Course> {
        &self.course
    }

    /// Link per module; `None` for locked modules.
    pub fn module_links(&self) -> Vec<Option<Route>> {
        let Some(course) = self.course.ready() else {
            return Vec::new();
        };

        course
            .modules
            .iter()
            .map(|module| {
                (!module.is_locked).then(|| Route::Module {
                    course_id: self.course_id.clone(),
                    module_id: module.id.clone(),
                })
            })
            .collect()
    }
}

impl fmt::Display for CourseDetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, &self.session, None)?;
        writeln!(f, "Back to Courses: {}", Route::Courses)?;
        writeln!(f)?;

        let course = match &self.course {
            ViewState::Loading => return writeln!(f, "Loading course..."),
            ViewState::Failed(message) => {
                writeln!(f, "{message}")?;
                return writeln!(f, "[Retry]");
            }
            ViewState::Ready(course) => course,
        };

        writeln!(f, "{}  [{}] ({:?})", course.title, course.level, level_badge(&course.level))?;
        writeln!(f, "{}", course.description)?;
        writeln!(f, "Instructor: {}", course.instructor)?;
        writeln!(f, "Duration: {}", course.duration)?;
        writeln!(f, "{} modules", course.module_count())?;
        writeln!(f, "{} students", course.student_count)?;
        writeln!(f)?;
        writeln!(f, "Course Modules")?;

        for ((index, module), link) in course.modules.iter().enumerate().zip(self.module_links()) {
            writeln!(f, "{:>3}. {}  ({})", index + 1, module.title, module.duration)?;
            if !module.description.is_empty() {
                writeln!(f, "     {}", module.description)?;
            }
            match link {
                Some(route) => writeln!(f, "     View Module Details: {route}")?,
                None => writeln!(f, "     Locked")?,
            }
        }

        Ok(())
    }
}
