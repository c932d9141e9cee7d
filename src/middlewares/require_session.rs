/*!
 * 会话认证中间件
 *
 * 验证请求携带的 access token，并从会话存储解析出当前身份。
 * 解析成功后身份记录写入请求扩展，供后续处理程序读取。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App, HttpServer};
 * use crate::middlewares::RequireSession;
 *
 * HttpServer::new(|| {
 *     App::new()
 *         .service(
 *             web::scope("/api")
 *                 .wrap(RequireSession)
 *                 .route("/protected", web::get().to(protected_handler))
 *         )
 * })
 * ```
 *
 * ## 判定流程
 *
 * 1. 客户端在请求头中包含 `Authorization: Bearer <ACCESS_TOKEN>`
 * 2. 中间件验证令牌并读取会话存储中的身份记录
 * 3. 身份有效则写入请求扩展并放行
 * 4. 否则静默重定向到 /login（不返回错误信息）
 *
 * 会话存储中的身份记录若无法反序列化，按损坏会话处理：
 * 清除该会话记录并重定向到登录页。
 */

use crate::config::AppConfig;
use crate::middlewares::guard::{self, GuardDecision, RouteMeta};
use crate::models::users::entities::{self, UserRole};
use crate::session::{SessionResult, SessionStore};
use crate::storage::Storage;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireSession;

/// 解析请求中的当前身份
///
/// 没有凭证时本地直接失败，不做任何存储访问。
async fn resolve_identity(req: &ServiceRequest) -> Result<entities::User, String> {
    let token = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| "Missing or invalid Authorization header".to_string())?;

    crate::utils::jwt::JwtUtils::verify_access_token(token).map_err(|err| {
        info!("Access token validation failed: {}", err);
        "Invalid access token".to_string()
    })?;

    let session = req
        .app_data::<actix_web::web::Data<Arc<dyn SessionStore>>>()
        .expect("Session store not found in app data")
        .get_ref()
        .clone();

    // 从会话存储中读取身份记录
    match session.get_raw(&format!("session:{token}")).await {
        SessionResult::Found(json) => match serde_json::from_str::<entities::User>(&json) {
            Ok(user) => return Ok(user),
            Err(_) => {
                // 损坏的会话记录：清除并按未登录处理
                session.remove(&format!("session:{token}")).await;
                info!("Malformed session record cleared for token: {}", token);
            }
        },
        _ => {
            debug!("Session record not found for token: {}", token);
        }
    };

    let storage = req
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone();

    let claims = crate::utils::jwt::JwtUtils::decode_token(token).map_err(|err| {
        info!("Failed to decode access token: {}", err);
        "Invalid access token format".to_string()
    })?;

    let user_id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| "Invalid user ID in access token".to_string())?;

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|_| "Failed to retrieve user from storage".to_string())?
        .ok_or_else(|| "User not found".to_string())?;

    if user.status != entities::UserStatus::Active {
        return Err("User is not active".to_string());
    }

    // 将身份记录写回会话存储
    let app_config = AppConfig::get();
    if let Ok(user_json) = serde_json::to_string(&user) {
        session
            .insert_raw(
                format!("session:{token}"),
                user_json,
                app_config.session.default_ttl,
            )
            .await;
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireSessionMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(
                    req.into_response(HttpResponse::NoContent().finish().map_into_right_body())
                );
            }

            // 解析当前身份并走守卫判定
            let identity = resolve_identity(&req).await;
            let meta = RouteMeta::authenticated();

            match identity {
                Ok(user) if guard::evaluate(&meta, Some(&user)) == GuardDecision::Allow => {
                    debug!("Session authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                _ => {
                    info!("Navigation to {} denied, redirecting to login", req.path());
                    Ok(req
                        .into_response(super::create_login_redirect().map_into_right_body()))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取身份信息
impl RequireSession {
    /// 从请求扩展中提取当前身份
    /// 此函数应该在应用了RequireSession中间件的路由处理程序中使用
    pub fn extract_identity(req: &actix_web::HttpRequest) -> Option<entities::User> {
        req.extensions().get::<entities::User>().cloned()
    }

    /// 从请求扩展中提取当前身份的用户ID
    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<entities::User>().map(|user| user.id)
    }

    /// 从请求扩展中提取当前身份的角色
    pub fn extract_user_role(req: &actix_web::HttpRequest) -> Option<UserRole> {
        req.extensions()
            .get::<entities::User>()
            .map(|user| user.role.clone())
    }
}
