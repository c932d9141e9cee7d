use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, guard, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::remarks::requests::{
    RemarkListQuery, ReviewRemarkRequest, SubmitRemarkRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::RemarkService;
use crate::utils::SafeRemarkIdI64;

// 懒加载的全局 RemarkService 实例
static REMARK_SERVICE: Lazy<RemarkService> = Lazy::new(RemarkService::new_lazy);

pub async fn submit_remark(
    req: HttpRequest,
    remark_data: web::Json<SubmitRemarkRequest>,
) -> ActixResult<HttpResponse> {
    REMARK_SERVICE.submit(remark_data.into_inner(), &req).await
}

pub async fn list_remarks(
    req: HttpRequest,
    query: web::Query<RemarkListQuery>,
) -> ActixResult<HttpResponse> {
    REMARK_SERVICE.list(query.into_inner(), &req).await
}

pub async fn review_remark(
    req: HttpRequest,
    remark_id: SafeRemarkIdI64,
    review_data: web::Json<ReviewRemarkRequest>,
) -> ActixResult<HttpResponse> {
    REMARK_SERVICE
        .review(remark_id.0, review_data.into_inner(), &req)
        .await
}

// 配置路由
//
// 提交仅学生可达；列表对所有已登录角色开放（服务层按角色收敛范围）；
// 裁定的讲师/管理员权限在服务层判定。
pub fn configure_remarks_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/remark-requests")
            .wrap(middlewares::RequireSession)
            .service(
                web::scope("")
                    .guard(guard::Post())
                    .wrap(middlewares::RequireRole::new(&UserRole::Student))
                    .route("", web::post().to(submit_remark)),
            )
            .route("", web::get().to(list_remarks))
            .route("/{remark_id}/review", web::patch().to(review_remark)),
    );
}
