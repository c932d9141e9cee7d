use crate::errors::Result;
use crate::session::SessionStore;
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, RwLock},
};

pub type BoxedSessionStoreFuture =
    Pin<Box<dyn Future<Output = Result<Box<dyn SessionStore>>> + Send>>;
pub type SessionStoreConstructor = Arc<dyn Fn() -> BoxedSessionStoreFuture + Send + Sync>;

static SESSION_STORE_REGISTRY: Lazy<RwLock<HashMap<String, SessionStoreConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub fn register_session_store_plugin<S: Into<String>>(
    name: S,
    constructor: SessionStoreConstructor,
) {
    let name = name.into();
    let mut registry = SESSION_STORE_REGISTRY
        .write()
        .expect("Session store registry lock poisoned");
    registry.insert(name, constructor);
}

pub fn get_session_store_plugin(name: &str) -> Option<SessionStoreConstructor> {
    SESSION_STORE_REGISTRY
        .read()
        .expect("Session store registry lock poisoned")
        .get(name)
        .cloned()
}

pub fn debug_session_store_registry() {
    let registry = SESSION_STORE_REGISTRY
        .read()
        .expect("Session store registry lock poisoned");
    if registry.is_empty() {
        tracing::debug!("No session store plugins registered.");
    } else {
        tracing::debug!("Registered session store plugins:");
        for key in registry.keys() {
            tracing::debug!(" - {}", key);
        }
    }
}
