use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::middlewares::RequireSession;
use crate::models::users::responses::RosterResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 讲师名册
/// GET /lecturers/{username}/students
///
/// 名册 = 讲师所授课程的全部学生，去重后保持出现顺序。
/// 讲师只能查询自己的名册。
pub async fn handle_lecturer_students(
    service: &CourseService,
    lecturer_username: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireSession::extract_identity(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    if current_user.username != lecturer_username {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只能查看自己的名册",
        )));
    }

    // 读取失败降级为空名册
    let items = match storage.list_students_for_lecturer(current_user.id).await {
        Ok(students) => students,
        Err(e) => {
            tracing::error!(
                "Failed to list students for lecturer {}: {}",
                current_user.username,
                e
            );
            Vec::new()
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(RosterResponse { items }, "查询成功")))
}
