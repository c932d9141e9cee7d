use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::middlewares::RequireSession;
use crate::models::grades::{
    requests::{GradeQuery, StudentMarksQuery},
    responses::GradeListResponse,
};
use crate::models::{ApiResponse, ErrorCode};

/// 当前学生的成绩列表
/// GET /student-marks?course_id=
///
/// 结果永远以当前身份为范围；course_id 提供时再按课程过滤。
/// 返回顺序即录入顺序，不做排序。
pub async fn handle_student_marks(
    service: &GradeService,
    query: StudentMarksQuery,
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

    let grade_query = GradeQuery {
        student_id: Some(current_user.id),
        course_id: query.course_id,
    };

    // 读取失败降级为空列表
    let items = match storage.list_grades(grade_query).await {
        Ok(grades) => grades,
        Err(e) => {
            tracing::error!("Failed to list grades for student {}: {}", current_user.id, e);
            Vec::new()
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(GradeListResponse { items }, "查询成功")))
}
