pub mod assessments;
pub mod auth;
pub mod courses;
pub mod grades;
pub mod remarks;
pub mod system;
pub mod users;

pub use assessments::AssessmentService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use grades::GradeService;
pub use remarks::RemarkService;
pub use system::SystemService;
pub use users::UserService;
