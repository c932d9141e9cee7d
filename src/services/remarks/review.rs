use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::RemarkService;
use crate::errors::PortalError;
use crate::middlewares::RequireSession;
use crate::models::remarks::{
    entities::RemarkStatus,
    requests::ReviewRemarkRequest,
    responses::RemarkResponse,
};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 讲师裁定复核申请
/// PATCH /remark-requests/{remark_id}/review
///
/// 管理员可裁定任意申请；讲师只能裁定自己课程的申请。
/// 只允许 Pending -> Approved/Rejected，已结案的申请返回冲突。
pub async fn handle_review(
    service: &RemarkService,
    remark_id: i64,
    review_request: ReviewRemarkRequest,
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

    if review_request.decision == RemarkStatus::Pending {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "裁定结果必须是 approved 或 rejected",
        )));
    }

    // 获取申请以确定归属课程
    let remark = match storage.get_remark_request_by_id(remark_id).await {
        Ok(Some(remark)) => remark,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::RemarkRequestNotFound,
                "复核申请不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询复核申请失败: {e}"),
                )),
            );
        }
    };

    // 权限：管理员放行；讲师必须是该课程的授课讲师
    if current_user.role != UserRole::Admin {
        let is_course_lecturer = match storage.get_course_by_id(&remark.course_id).await {
            Ok(Some(course)) => {
                current_user.role == UserRole::Lecturer && course.lecturer_id == current_user.id
            }
            Ok(None) => false,
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询课程失败: {e}"),
                    )),
                );
            }
        };

        if !is_course_lecturer {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "没有裁定该复核申请的权限",
            )));
        }
    }

    match storage
        .review_remark_request(remark_id, review_request.decision, review_request.response)
        .await
    {
        Ok(Some(remark_request)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RemarkResponse { remark_request },
            "复核申请已裁定",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::RemarkRequestNotFound,
            "复核申请不存在",
        ))),
        Err(PortalError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::RemarkAlreadySettled, msg),
        )),
        Err(e) => {
            error!("Remark review failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("裁定复核申请失败: {e}"),
                )),
            )
        }
    }
}
