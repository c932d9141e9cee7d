use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::middlewares::RequireSession;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::responses::{RefreshTokenResponse, TokenVerificationResponse, UserInfoResponse},
};
use crate::utils::jwt::JwtUtils;

use super::AuthService;

/// 使用 refresh cookie 换发新的 access token
pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    let Some(refresh_token) = JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Missing refresh token",
        )));
    };

    let claims = match JwtUtils::verify_refresh_token(&refresh_token) {
        Ok(claims) => claims,
        Err(e) => {
            info!("Refresh token verification failed: {}", e);
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Invalid refresh token",
            )));
        }
    };

    let access_token = match JwtUtils::refresh_access_token(&refresh_token) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Failed to refresh access token: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Unable to refresh token",
                )),
            );
        }
    };

    // 新 token 即新会话键，补一份身份记录避免下个请求回源存储
    if let Ok(user_id) = claims.sub.parse::<i64>() {
        let storage = service.get_storage(request);
        if let Ok(Some(user)) = storage.get_user_by_id(user_id).await {
            if let Ok(user_json) = serde_json::to_string(&user) {
                let session = service.get_session(request);
                session
                    .insert_raw(
                        format!("session:{access_token}"),
                        user_json,
                        config.session.default_ttl,
                    )
                    .await;
            }
        }
    }

    let response = RefreshTokenResponse {
        access_token,
        expires_in: config.jwt.access_token_expiry * 60,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Token refreshed")))
}

/// 验证当前 access token
///
/// 走到这里说明 RequireSession 已放行，令牌必然有效。
pub async fn handle_verify_token(
    _service: &AuthService,
    _request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TokenVerificationResponse { is_valid: true },
        "Token is valid",
    )))
}

/// 获取当前身份信息
pub async fn handle_get_user(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match RequireSession::extract_identity(request) {
        Some(user) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(UserInfoResponse { user }, "查询成功"))),
        None => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        ))),
    }
}
