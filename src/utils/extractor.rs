use actix_web::{FromRequest, HttpRequest, dev::Payload, error::ErrorBadRequest};
use futures_util::future::{Ready, err, ok};

/// 定义安全的 i64 路径参数提取器
///
/// 提取失败时直接返回 400，避免在各处理函数里重复解析逻辑。
#[macro_export]
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        pub struct $name(pub i64);

        impl actix_web::FromRequest for $name {
            type Error = actix_web::Error;
            type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _payload: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                match req.match_info().get($param).map(str::parse::<i64>) {
                    Some(Ok(value)) if value > 0 => futures_util::future::ok($name(value)),
                    _ => futures_util::future::err(actix_web::error::ErrorBadRequest(format!(
                        "Invalid path parameter: {}",
                        $param
                    ))),
                }
            }
        }
    };
}

/// 通用的 {id} 路径参数提取器
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.match_info().get("id").map(str::parse::<i64>) {
            Some(Ok(value)) if value > 0 => ok(SafeIDI64(value)),
            _ => err(ErrorBadRequest("Invalid path parameter: id")),
        }
    }
}

define_safe_i64_extractor!(SafeGradeIdI64, "grade_id");
define_safe_i64_extractor!(SafeRemarkIdI64, "remark_id");
