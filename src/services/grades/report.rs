use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::GradeService;
use super::summary::{fetch_course_records, weighted_course_total};
use crate::middlewares::RequireSession;
use crate::models::grades::responses::{
    AdviseeReport, AdviseeReportResponse, CourseTotalResponse,
};
use crate::models::{ApiResponse, ErrorCode};

/// 导师名下学生总评报表
/// GET /advisors/{username}/advisees
///
/// 导师只能查询自己的名册。每个学生按其课程逐门计算加权总评，
/// 单门课程读取失败按零总评降级，不中断整张报表。
pub async fn handle_advisee_report(
    service: &GradeService,
    advisor_username: String,
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

    // 名册按用户名声明，但只允许本人访问
    if current_user.username != advisor_username {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只能查看自己的名册",
        )));
    }

    let timeout_ms = service.get_config().server.timeouts.storage_fetch;
    let mut items = Vec::with_capacity(current_user.advisees.len());

    for advisee_id in &current_user.advisees {
        let advisee = match storage.get_user_by_id(*advisee_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                // 名册里的悬空引用直接跳过
                continue;
            }
            Err(e) => {
                error!("Failed to load advisee {}: {}", advisee_id, e);
                continue;
            }
        };

        let mut totals = Vec::with_capacity(advisee.courses.len());
        for course_id in &advisee.courses {
            let total =
                match fetch_course_records(&storage, advisee.id, course_id, timeout_ms).await {
                    Ok((grades, assessments)) => weighted_course_total(&assessments, &grades),
                    Err(e) => {
                        error!(
                            "Failed to fetch records for advisee {} in {}: {}",
                            advisee.id, course_id, e
                        );
                        0.0
                    }
                };
            totals.push(CourseTotalResponse {
                student_id: advisee.id,
                course_id: course_id.clone(),
                total,
            });
        }

        items.push(AdviseeReport {
            student_id: advisee.id,
            display_name: advisee.display_name,
            totals,
        });
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AdviseeReportResponse { items },
        "查询成功",
    )))
}
