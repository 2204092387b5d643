use std::fmt;

use crate::{
    api::PortalApi,
    model::entity::{Enrollment, EnrollmentStatus},
    session::Session,
    view::{
        Redirect, Route, ViewScope, ViewState,
        style::{progress_bar, progress_tone, status_tone},
        write_header,
    },
};

/// Figures shown above the enrolled module list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    /// Rounded mean of all progress values, 0 without enrollments.
    pub average_progress: u8,
}

impl DashboardStats {
    pub fn from_enrollments(enrollments: &[Enrollment]) -> Self {
        let count = |status| enrollments.iter().filter(|e| e.status == status).count();

        let average_progress = if enrollments.is_empty() {
            0
        } else {
            let sum: u32 = enrollments.iter().map(|e| u32::from(e.progress())).sum();
            (f64::from(sum) / enrollments.len() as f64).round() as u8
        };

        Self {
            total: enrollments.len(),
            completed: count(EnrollmentStatus::Completed),
            in_progress: count(EnrollmentStatus::InProgress),
            average_progress,
        }
    }
}

/// Links offered for one enrollment card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentLinks {
    pub continue_learning: Route,
    pub view_course: Route,
}

impl From<&Enrollment> for EnrollmentLinks {
    fn from(e: &Enrollment) -> Self {
        Self {
            continue_learning: Route::Module {
                course_id: e.course_id.clone(),
                module_id: e.module_id().to_string(),
            },
            view_course: Route::Course {
                course_id: e.course_id.clone(),
            },
        }
    }
}

/// Learning dashboard of the current user.
#[derive(Debug)]
pub struct DashboardView {
    scope: ViewScope,
    session: Session,
    enrolled: ViewState<Vec<Enrollment>>,
}

impl DashboardView {
    pub fn mount(session: Option<&Session>) -> Result<Self, Redirect> {
        let session = session.ok_or_else(Redirect::login)?;

        Ok(Self {
            scope: ViewScope::new(),
            session: session.clone(),
            enrolled: ViewState::Loading,
        })
    }

    #[tracing::instrument(skip_all)]
    pub async fn load<A: PortalApi + ?Sized>(&mut self, api: &A) {
        let request = api.list_enrolled_modules(self.session.token());
        let Some(result) = self.scope.run(request).await else {
            return;
        };

        self.enrolled = result.into();
    }

    pub async fn retry<A: PortalApi + ?Sized>(&mut self, api: &A) {
        self.enrolled = ViewState::Loading;
        self.load(api).await;
    }

    pub fn unmount(&self) {
        self.scope.unmount();
    }

    pub fn state(&self) -> &ViewState<Vec<Enrollment>> {
        &self.enrolled
    }

    /// Enrolled modules; empty unless loaded successfully.
    pub fn enrollments(&self) -> &[Enrollment] {
        self.enrolled.ready().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats::from_enrollments(self.enrollments())
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, &self.session, Some(Route::Dashboard))?;
        writeln!(f)?;
        writeln!(f, "My Learning Dashboard")?;
        writeln!(f, "Track your progress and manage your enrolled modules")?;
        writeln!(f)?;

        let stats = self.stats();
        writeln!(f, "Total Modules: {:<6} Enrolled modules", stats.total)?;
        writeln!(f, "Completed:     {:<6} Modules completed", stats.completed)?;
        writeln!(f, "In Progress:   {:<6} Active modules", stats.in_progress)?;
        let average = format!("{}%", stats.average_progress);
        writeln!(f, "Avg Progress:  {:<6} Overall progress", average)?;
        writeln!(f)?;
        writeln!(f, "My Enrolled Modules")?;

        let enrollments = match &self.enrolled {
            ViewState::Loading => return writeln!(f, "Loading your modules..."),
            ViewState::Failed(message) => {
                writeln!(f, "{message}")?;
                return writeln!(f, "[Retry]");
            }
            ViewState::Ready(enrollments) => enrollments,
        };

        if enrollments.is_empty() {
            writeln!(f, "No modules enrolled yet")?;
            writeln!(f, "Start your learning journey by enrolling in some modules")?;
            return writeln!(f, "Browse Courses: {}", Route::Courses);
        }

        for enrollment in enrollments {
            let links = EnrollmentLinks::from(enrollment);
            let due = enrollment
                .due_on()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| enrollment.due_date.clone());

            writeln!(
                f,
                "{}  [{}] ({:?})",
                enrollment.module_title,
                enrollment.status.label(),
                status_tone(enrollment.status)
            )?;
            writeln!(f, "  {}", enrollment.course_title)?;
            writeln!(
                f,
                "  {} | {} | Due: {}",
                enrollment.instructor, enrollment.duration, due
            )?;
            let progress = enrollment.progress();
            writeln!(
                f,
                "  Progress {} {}% ({:?})",
                progress_bar(progress),
                progress,
                progress_tone(progress)
            )?;
            writeln!(f, "  Continue Learning: {}", links.continue_learning)?;
            writeln!(f, "  View Course: {}", links.view_course)?;
            writeln!(f)?;
        }

        Ok(())
    }
}
