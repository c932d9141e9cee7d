use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, guard, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assessments::requests::{AssessmentListQuery, CreateAssessmentRequest};
use crate::models::users::entities::UserRole;
use crate::services::AssessmentService;

// 懒加载的全局 AssessmentService 实例
static ASSESSMENT_SERVICE: Lazy<AssessmentService> = Lazy::new(AssessmentService::new_lazy);

pub async fn list_assessments(
    req: HttpRequest,
    query: web::Query<AssessmentListQuery>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .list_assessments(query.into_inner(), &req)
        .await
}

pub async fn create_assessment(
    req: HttpRequest,
    assessment_data: web::Json<CreateAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .create_assessment(assessment_data.into_inner(), &req)
        .await
}

// 配置路由：查询仅要求登录，发布要求讲师角色
//
// POST 经 guard 进入带角色校验的子作用域，GET 落到外层路由。
pub fn configure_assessments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assessment-components")
            .wrap(middlewares::RequireSession)
            .service(
                web::scope("")
                    .guard(guard::Post())
                    .wrap(middlewares::RequireRole::new(&UserRole::Lecturer))
                    .route("", web::post().to(create_assessment)),
            )
            .route("", web::get().to(list_assessments)),
    );
}
