#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use flotilla::prelude::*;
use flotilla::store::StoreError;
use wiremock::MockServer;

/// In-memory credential store for tests, with a switch to simulate a
/// failing backing store.
#[derive(Default)]
pub struct MemoryCredentialStore {
    values: Mutex<HashMap<CredentialKey, String>>,
    fail_reads: AtomicBool,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, key: CredentialKey, value: &str) {
        self.values
            .lock()
            .expect("store lock poisoned")
            .insert(key, value.to_string());
    }

    pub fn get_sync(&self, key: CredentialKey) -> Option<String> {
        self.values
            .lock()
            .expect("store lock poisoned")
            .get(&key)
            .cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.values.lock().expect("store lock poisoned").is_empty()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self, key: CredentialKey) -> std::result::Result<Option<String>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Io("simulated read failure".to_string()));
        }
        Ok(self.get_sync(key))
    }

    async fn set(&self, key: CredentialKey, value: &str) -> std::result::Result<(), StoreError> {
        self.seed(key, value);
        Ok(())
    }

    async fn remove(&self, key: CredentialKey) -> std::result::Result<(), StoreError> {
        self.values
            .lock()
            .expect("store lock poisoned")
            .remove(&key);
        Ok(())
    }

    async fn clear(&self) -> std::result::Result<(), StoreError> {
        self.values.lock().expect("store lock poisoned").clear();
        Ok(())
    }
}

/// Client wired to a wiremock server, with the transport timeout kept
/// short so timeout tests stay fast.
pub fn test_client(server: &MockServer, store: Arc<MemoryCredentialStore>) -> ApiClient {
    let config = Config::default()
        .with_base_url(format!("{}/api/", server.uri()))
        .with_timeout(Duration::from_secs(5));
    ApiClient::new(&config, store).expect("build test client")
}

/// Client with no backend; enough for store-only flows.
pub fn offline_client(store: Arc<MemoryCredentialStore>) -> ApiClient {
    ApiClient::new(&Config::default(), store).expect("build offline client")
}

pub fn seed_tokens(store: &MemoryCredentialStore, access: &str, refresh: &str) {
    store.seed(CredentialKey::AccessToken, access);
    store.seed(CredentialKey::RefreshToken, refresh);
}
