use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::RemarkService;
use crate::middlewares::RequireSession;
use crate::models::remarks::{requests::SubmitRemarkRequest, responses::RemarkResponse};
use crate::models::{ApiResponse, ErrorCode};

/// 学生提交复核申请
/// POST /remark-requests
///
/// 申请归属当前身份；请求体里的 status / created_at 被忽略，
/// 初始状态一律 Pending，创建时间由服务端落。
pub async fn handle_submit(
    service: &RemarkService,
    submit_request: SubmitRemarkRequest,
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

    if submit_request.reason.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "复核理由不能为空",
        )));
    }

    match storage
        .submit_remark_request(current_user.id, submit_request)
        .await
    {
        Ok(remark_request) => Ok(HttpResponse::Created().json(ApiResponse::success(
            RemarkResponse { remark_request },
            "复核申请已提交",
        ))),
        Err(e) => {
            error!("Remark request submission failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("提交复核申请失败: {e}"),
                )),
            )
        }
    }
}
