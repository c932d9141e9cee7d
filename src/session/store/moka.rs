use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use crate::config::AppConfig;
use crate::declare_session_store_plugin;
use crate::session::{SessionResult, SessionStore};

declare_session_store_plugin!("moka", MokaSessionStore);

pub struct MokaSessionStore {
    inner: Cache<String, String>,
}

impl Default for MokaSessionStore {
    fn default() -> Self {
        Self::new().expect("MokaSessionStore 初始化失败，请检查配置")
    }
}

impl MokaSessionStore {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        let inner = Cache::builder()
            .max_capacity(config.session.memory.max_capacity)
            .time_to_live(std::time::Duration::from_secs(config.session.default_ttl))
            .build();

        debug!(
            "MokaSessionStore initialized with max capacity: {}",
            config.session.memory.max_capacity
        );
        Ok(Self { inner })
    }
}

#[async_trait]
impl SessionStore for MokaSessionStore {
    async fn get_raw(&self, key: &str) -> SessionResult<String> {
        if let Some(value) = self.inner.get(key).await {
            debug!("Session hit for key: {}", key);
            SessionResult::Found(value)
        } else {
            debug!("Session not found for key: {}", key);
            SessionResult::NotFound
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        // Moka 在创建时就设置了全局 TTL 策略，这里的 ttl 参数会被忽略
        self.inner.insert(key, value).await;

        if ttl != 0 {
            tracing::debug!("Moka session store ignores per-item TTL, using global TTL");
        }
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}
