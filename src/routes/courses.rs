use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::{CourseService, GradeService};

// 懒加载的全局服务实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);
static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

pub async fn list_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req).await
}

pub async fn get_course(
    req: HttpRequest,
    course_id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(course_id.into_inner(), &req).await
}

pub async fn course_total(
    req: HttpRequest,
    path: web::Path<(String, i64)>,
) -> ActixResult<HttpResponse> {
    let (course_id, student_id) = path.into_inner();
    GRADE_SERVICE.course_total(course_id, student_id, &req).await
}

pub async fn lecturer_students(
    req: HttpRequest,
    username: web::Path<String>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .lecturer_students(username.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_courses_routes(cfg: &mut web::ServiceConfig) {
    // 课程与总评：登录即可，总评的细粒度权限在服务层裁定
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireSession)
            .route("", web::get().to(list_courses))
            .route("/{course_id}", web::get().to(get_course))
            .route(
                "/{course_id}/students/{student_id}/total",
                web::get().to(course_total),
            ),
    );

    // 讲师名册
    cfg.service(
        web::scope("/api/v1/lecturers")
            .wrap(middlewares::RequireSession)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new(&UserRole::Lecturer))
                    .route("/{username}/students", web::get().to(lecturer_students)),
            ),
    );
}
