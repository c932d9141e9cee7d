use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::grades::requests::{
    RecordGradeRequest, StudentMarksQuery, UpdateGradeRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::GradeService;
use crate::utils::SafeGradeIdI64;

// 懒加载的全局 GradeService 实例
static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

pub async fn student_marks(
    req: HttpRequest,
    query: web::Query<StudentMarksQuery>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.student_marks(query.into_inner(), &req).await
}

pub async fn record_grade(
    req: HttpRequest,
    grade_data: web::Json<RecordGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.record_grade(grade_data.into_inner(), &req).await
}

pub async fn update_grade(
    req: HttpRequest,
    grade_id: SafeGradeIdI64,
    update_data: web::Json<UpdateGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .update_grade(grade_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn advisee_report(
    req: HttpRequest,
    username: web::Path<String>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.advisee_report(username.into_inner(), &req).await
}

// 配置路由
pub fn configure_grades_routes(cfg: &mut web::ServiceConfig) {
    // 学生查看自己的成绩
    cfg.service(
        web::scope("/api/v1/student-marks")
            .wrap(middlewares::RequireSession)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new(&UserRole::Student))
                    .route("", web::get().to(student_marks)),
            ),
    );

    // 讲师录入与修改成绩
    cfg.service(
        web::scope("/api/v1/grades")
            .wrap(middlewares::RequireSession)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new(&UserRole::Lecturer))
                    .route("", web::post().to(record_grade))
                    .route("/{grade_id}", web::patch().to(update_grade)),
            ),
    );

    // 导师查看名下学生报表
    cfg.service(
        web::scope("/api/v1/advisors")
            .wrap(middlewares::RequireSession)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new(&UserRole::Advisor))
                    .route("/{username}/advisees", web::get().to(advisee_report)),
            ),
    );
}
