mod credential_service;
mod room_service;
mod token_service;

pub use credential_service::*;
pub use room_service::*;
pub use token_service::*;

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::Value;

    use crate::errors::BackendError;
    use crate::repositories::KeyValueStore;

    /// Fails every call as an unreachable store would.
    pub struct FailingStore;

    #[async_trait]
    impl KeyValueStore for FailingStore {
        async fn get_item(&self, _: &str, _: &str) -> Result<Option<Value>, BackendError> {
            Err(BackendError::Unavailable("connection refused".to_string()))
        }

        async fn put_item(&self, _: &str, _: &str, _: &Value) -> Result<(), BackendError> {
            Err(BackendError::Unavailable("connection refused".to_string()))
        }

        async fn delete_item(&self, _: &str, _: &str) -> Result<(), BackendError> {
            Err(BackendError::Unavailable("connection refused".to_string()))
        }
    }

    /// Empty store that records how often it was called.
    #[derive(Default)]
    pub struct CountingStore {
        calls: AtomicUsize,
    }

    impl CountingStore {
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl KeyValueStore for CountingStore {
        async fn get_item(&self, _: &str, _: &str) -> Result<Option<Value>, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }

        async fn put_item(&self, _: &str, _: &str, _: &Value) -> Result<(), BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn delete_item(&self, _: &str, _: &str) -> Result<(), BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// In-memory store that fails every call touching `failing_key`.
    pub struct PartialStore {
        failing_key: String,
        items: Mutex<HashMap<(String, String), Value>>,
    }

    impl PartialStore {
        pub fn new(failing_key: &str) -> Self {
            Self {
                failing_key: failing_key.to_string(),
                items: Mutex::new(HashMap::new()),
            }
        }

        fn check(&self, key: &str) -> Result<(), BackendError> {
            if key == self.failing_key {
                return Err(BackendError::Unavailable(format!("partition holding {key} is down")));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl KeyValueStore for PartialStore {
        async fn get_item(&self, table: &str, key: &str) -> Result<Option<Value>, BackendError> {
            self.check(key)?;
            let items = self.items.lock().unwrap();
            Ok(items.get(&(table.to_string(), key.to_string())).cloned())
        }

        async fn put_item(&self, table: &str, key: &str, item: &Value) -> Result<(), BackendError> {
            self.check(key)?;
            let mut items = self.items.lock().unwrap();
            items.insert((table.to_string(), key.to_string()), item.clone());
            Ok(())
        }

        async fn delete_item(&self, table: &str, key: &str) -> Result<(), BackendError> {
            self.check(key)?;
            let mut items = self.items.lock().unwrap();
            items.remove(&(table.to_string(), key.to_string()));
            Ok(())
        }
    }
}
