use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, warn};

use super::AssessmentService;
use crate::middlewares::RequireSession;
use crate::models::assessments::{
    requests::{AssessmentListQuery, CreateAssessmentRequest},
    responses::AssessmentResponse,
};
use crate::models::{ApiResponse, ErrorCode};

/// 讲师发布考核项
/// POST /assessment-components
///
/// 课程权重和不强制等于 100：超过 100 只记一条警告日志，创建照常进行。
pub async fn handle_create_assessment(
    service: &AssessmentService,
    create_request: CreateAssessmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 讲师只能为自己的课程发布考核项
    let current_user = match RequireSession::extract_identity(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    match storage.get_course_by_id(&create_request.course_id).await {
        Ok(Some(course)) => {
            if course.lecturer_id != current_user.id {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "只能为自己的课程发布考核项",
                )));
            }
        }
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "课程不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询课程失败: {e}"),
                )),
            );
        }
    }

    let course_id = create_request.course_id.clone();

    match storage.add_assessment(create_request).await {
        Ok(assessment) => {
            // 权重和检查放在创建之后，只警告不拦截
            if let Ok(assessments) = storage
                .list_assessments(AssessmentListQuery {
                    course_id: Some(course_id.clone()),
                })
                .await
            {
                let weightage_sum: f64 = assessments.iter().map(|a| a.weightage).sum();
                if weightage_sum > 100.0 {
                    warn!(
                        "Course {} assessment weightage now sums to {:.1}",
                        course_id, weightage_sum
                    );
                }
            }

            Ok(HttpResponse::Created().json(ApiResponse::success(
                AssessmentResponse { assessment },
                "考核项已发布",
            )))
        }
        Err(e) => {
            error!("Assessment creation failed: {}", e);
            Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                format!("发布考核项失败: {e}"),
            )))
        }
    }
}
