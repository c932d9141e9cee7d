use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::courses::responses::{CourseListResponse, CourseResponse};
use crate::models::{ApiResponse, ErrorCode};

/// 课程列表
/// GET /courses
pub async fn handle_list_courses(
    service: &CourseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let items = match storage.list_courses().await {
        Ok(courses) => courses,
        Err(e) => {
            tracing::error!("Failed to list courses: {}", e);
            Vec::new()
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(CourseListResponse { items }, "查询成功")))
}

/// 课程详情
/// GET /courses/{course_id}
pub async fn handle_get_course(
    service: &CourseService,
    course_id: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_course_by_id(&course_id).await {
        Ok(Some(course)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(CourseResponse { course }, "查询成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "课程不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询课程失败: {e}"),
            )),
        ),
    }
}
