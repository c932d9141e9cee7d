//! 会话存储层
//!
//! 保存 token -> 序列化身份记录 的映射，带 TTL。
//! 后端通过插件注册表选择（moka 内存 / redis），启动时可回退到内存实现。

pub mod register;
pub mod store;

use async_trait::async_trait;

/// 会话存储查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum SessionResult<T> {
    Found(T),
    NotFound,
    // 后端暂不可用，调用方按未命中降级处理
    Unavailable,
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get_raw(&self, key: &str) -> SessionResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

/// 声明会话存储插件
///
/// 展开为一个 ctor 注册函数，在进程启动时把构造器写入注册表。
#[macro_export]
macro_rules! declare_session_store_plugin {
    ($name:literal, $ty:ident) => {
        paste::paste! {
            #[ctor::ctor]
            fn [<__register_session_store_ $ty:snake>]() {
                $crate::session::register::register_session_store_plugin(
                    $name,
                    std::sync::Arc::new(|| {
                        Box::pin(async {
                            $ty::new()
                                .map(|store| {
                                    Box::new(store) as Box<dyn $crate::session::SessionStore>
                                })
                                .map_err($crate::errors::PortalError::session_store_connection)
                        })
                            as $crate::session::register::BoxedSessionStoreFuture
                    }),
                );
            }
        }
    };
}
