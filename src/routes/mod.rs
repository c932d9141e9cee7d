pub mod assessments;
pub mod auth;
pub mod courses;
pub mod grades;
pub mod remarks;
pub mod system;
pub mod users;

pub use assessments::configure_assessments_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_courses_routes;
pub use grades::configure_grades_routes;
pub use remarks::configure_remarks_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;
