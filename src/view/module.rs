use std::fmt;

use crate::{
    api::PortalApi,
    model::entity::Module,
    session::Session,
    view::{Notice, Redirect, Route, ViewScope, ViewState, write_header},
};

/// Module detail with the enroll/drop action.
#[derive(Debug)]
pub struct ModuleDetailView {
    scope: ViewScope,
    session: Session,
    course_id: String,
    module_id: String,
    module: ViewState<Module>,
    enrolled: bool,
    notice: Option<Notice>,
}

impl ModuleDetailView {
    pub fn mount(
        session: Option<&Session>,
        course_id: &str,
        module_id: &str,
    ) -> Result<Self, Redirect> {
        let session = session.ok_or_else(Redirect::login)?;

        Ok(Self {
            scope: ViewScope::new(),
            session: session.clone(),
            course_id: course_id.to_string(),
            module_id: module_id.to_string(),
            module: ViewState::Loading,
            enrolled: false,
            notice: None,
        })
    }

    /// Fetches the module and the enrollment list together and applies both once both settled.
    /// A failed enrollment check keeps the previous flag and doesn't fail the view.
    #[tracing::instrument(
        skip_all,
        fields(course_id = %self.course_id, module_id = %self.module_id)
    )]
    pub async fn load<A: PortalApi + ?Sized>(&mut self, api: &A) {
        let joined = self
            .scope
            .run(async {
                tokio::join!(
                    api.get_module(&self.course_id, &self.module_id),
                    api.list_enrolled_modules(self.session.token()),
                )
            })
            .await;

        let Some((module, enrollments)) = joined else {
            return;
        };

        match enrollments {
            Ok(enrollments) => {
                self.enrolled = enrollments
                    .iter()
                    .any(|e| e.matches(&self.course_id, &self.module_id));
            }
            Err(e) => tracing::warn!("enrollment check failed: {}", e),
        }

        self.module = module.into();
    }

    pub async fn retry<A: PortalApi + ?Sized>(&mut self, api: &A) {
        self.module = ViewState::Loading;
        self.load(api).await;
    }

    /// Drops the module when enrolled, enrolls otherwise. The flag only flips once the backend
    /// confirmed. `None` when the view was unmounted meanwhile.
    #[tracing::instrument(
        skip_all,
        fields(course_id = %self.course_id, module_id = %self.module_id)
    )]
    pub async fn toggle_enrollment<A: PortalApi + ?Sized>(&mut self, api: &A) -> Option<Notice> {
        let token = self.session.token();
        let (course_id, module_id) = (self.course_id.as_str(), self.module_id.as_str());

        let notice = if self.enrolled {
            let result = self.scope.run(api.drop_module(token, course_id, module_id)).await?;
            match result {
                Ok(()) => {
                    self.enrolled = false;
                    Notice::Success(String::from("Successfully dropped from module"))
                }
                Err(e) => Notice::Failure(e.client_display()),
            }
        } else {
            let result = self.scope.run(api.enroll_module(token, course_id, module_id)).await?;
            match result {
                Ok(()) => {
                    self.enrolled = true;
                    Notice::Success(String::from("Successfully enrolled in module"))
                }
                Err(e) => Notice::Failure(e.client_display()),
            }
        };

        self.notice = Some(notice.clone());
        Some(notice)
    }

    pub fn unmount(&self) {
        self.scope.unmount();
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn state(&self) -> &ViewState<Module> {
        &self.module
    }

    pub fn is_enrolled(&self) -> bool {
        self.enrolled
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }
}

impl fmt::Display for ModuleDetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let back = Route::Course {
            course_id: self.course_id.clone(),
        };

        write_header(f, &self.session, None)?;
        writeln!(f, "Back to Course: {back}")?;
        writeln!(f)?;

        let module = match &self.module {
            ViewState::Loading => return writeln!(f, "Loading module..."),
            ViewState::Failed(message) => {
                writeln!(f, "{message}")?;
                return writeln!(f, "[Retry]");
            }
            ViewState::Ready(module) => module,
        };

        write!(f, "{}  [{}]", module.title, module.difficulty)?;
        if self.enrolled {
            write!(f, "  [Enrolled]")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", module.description)?;
        writeln!(f, "Duration: {}", module.duration)?;
        writeln!(f, "Prerequisites: {}", module.prerequisites)?;
        writeln!(f)?;

        if self.enrolled {
            writeln!(f, "[Drop Module]  [Start Learning]")?;
        } else {
            writeln!(f, "[Register for Module]")?;
        }
        if let Some(notice) = &self.notice {
            writeln!(f, "{notice}")?;
        }
        writeln!(f)?;

        writeln!(f, "Module Overview")?;
        writeln!(f, "{}", module.content)?;
        writeln!(f)?;

        writeln!(f, "Learning Objectives")?;
        for objective in &module.objectives {
            writeln!(f, "  - {objective}")?;
        }

        if !module.resources.is_empty() {
            writeln!(f)?;
            writeln!(f, "Resources")?;
            for resource in &module.resources {
                writeln!(f, "  - {} ({}): {}", resource.title, resource.kind, resource.url)?;
            }
        }

        Ok(())
    }
}
