use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssessmentService;
use crate::models::ApiResponse;
use crate::models::assessments::{requests::AssessmentListQuery, responses::AssessmentListResponse};

/// 考核项列表
/// GET /assessment-components?course_id=
///
/// 返回顺序即发布顺序。读取失败降级为空列表。
pub async fn handle_list_assessments(
    service: &AssessmentService,
    query: AssessmentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let items = match storage.list_assessments(query).await {
        Ok(assessments) => assessments,
        Err(e) => {
            tracing::error!("Failed to list assessments: {}", e);
            Vec::new()
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AssessmentListResponse { items },
        "查询成功",
    )))
}
