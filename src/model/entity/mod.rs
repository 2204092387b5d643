mod course;
pub use course::{Course, CourseFilters, CourseLevel, CourseSummary, ModuleSummary};

mod module;
pub use module::{Module, Resource};

mod enrollment;
pub use enrollment::{Enrollment, EnrollmentStatus};
pub(crate) use enrollment::percent;

mod user;
pub use user::{Credentials, Registration, UserProfile};
