use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::RemarkService;
use crate::middlewares::RequireSession;
use crate::models::remarks::{requests::RemarkListQuery, responses::RemarkListResponse};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 复核申请列表
/// GET /remark-requests
///
/// 按角色收敛可见范围：学生只看自己的申请，讲师只看自己课程的申请，
/// 导师只看名下学生，管理员不过滤。
pub async fn handle_list(
    service: &RemarkService,
    query: RemarkListQuery,
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

    let mut effective = query;
    match current_user.role {
        UserRole::Admin => {
            // 管理员可查看全部申请
        }
        UserRole::Student => {
            // 学生范围强制收敛到本人，忽略查询参数里的 student_id
            effective.student_id = Some(current_user.id);
        }
        UserRole::Lecturer | UserRole::Advisor => {
            // 讲师/导师在结果侧过滤
        }
    }

    let items = match storage.list_remark_requests(effective).await {
        Ok(remarks) => remarks,
        Err(e) => {
            tracing::error!("Failed to list remark requests: {}", e);
            Vec::new()
        }
    };

    // 讲师只保留自己课程的申请；导师只保留名下学生的申请
    let items = match current_user.role {
        UserRole::Lecturer => {
            let courses = storage
                .list_courses_for_lecturer(current_user.id)
                .await
                .unwrap_or_default();
            items
                .into_iter()
                .filter(|r| courses.iter().any(|c| c.id == r.course_id))
                .collect()
        }
        UserRole::Advisor => items
            .into_iter()
            .filter(|r| current_user.advisees.contains(&r.student_id))
            .collect(),
        _ => items,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(RemarkListResponse { items }, "查询成功")))
}
