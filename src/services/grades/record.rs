use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::GradeService;
use crate::errors::PortalError;
use crate::models::grades::{
    requests::{RecordGradeRequest, UpdateGradeRequest},
    responses::GradeResponse,
};
use crate::models::{ApiResponse, ErrorCode};

/// 讲师录入成绩
/// POST /grades
///
/// assessment_id 不做引用完整性校验：指向不存在考核项的成绩允许落库，
/// 聚合时被静默跳过。同一 (student, assessment) 的重复录入被拒绝。
pub async fn handle_record_grade(
    service: &GradeService,
    grade_request: RecordGradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Some(marks) = grade_request.marks {
        if marks < 0.0 {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "marks must not be negative",
            )));
        }
    }

    match storage.add_grade(grade_request).await {
        Ok(grade) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(GradeResponse { grade }, "成绩已录入")))
        }
        Err(PortalError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::GradeAlreadyRecorded, msg),
        )),
        Err(e) => {
            error!("Grade recording failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("录入成绩失败: {e}"),
                )),
            )
        }
    }
}

/// 讲师修改成绩
/// PATCH /grades/{grade_id}
///
/// 未知 ID 是无操作而不是错误：集合保持不变，返回成功但不带记录。
pub async fn handle_update_grade(
    service: &GradeService,
    grade_id: i64,
    update: UpdateGradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Some(marks) = update.marks {
        if marks < 0.0 {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "marks must not be negative",
            )));
        }
    }

    match storage.update_grade(grade_id, update).await {
        Ok(Some(grade)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(GradeResponse { grade }, "成绩已更新")))
        }
        Ok(None) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("没有匹配的成绩记录"))),
        Err(e) => {
            error!("Grade update failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("更新成绩失败: {e}"),
                )),
            )
        }
    }
}
