pub mod guard;
pub mod require_role;
pub mod require_session;

pub use guard::{GuardDecision, RouteMeta};
pub use require_role::RequireRole;
pub use require_session::RequireSession;

use actix_web::HttpResponse;
use actix_web::http::header::LOCATION;

/// 被拒绝的导航是一次静默重定向，不携带任何错误信息。
pub(crate) fn create_login_redirect() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, "/login"))
        .finish()
}
