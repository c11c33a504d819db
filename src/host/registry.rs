//! Mounted widget instances.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::widget::ChatWidget;

/// Default idle timeout (30 minutes).
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// A widget mounted for one page load.
///
/// Cloning shares the same widget.
#[derive(Debug, Clone)]
pub struct WidgetHandle {
    inner: Arc<WidgetHandleInner>,
}

#[derive(Debug)]
struct WidgetHandleInner {
    /// Page id, used in the widget's routes.
    id: String,
    /// The widget itself; events are applied one at a time.
    widget: Mutex<ChatWidget>,
    /// Last time the page talked to the widget.
    last_activity: RwLock<DateTime<Utc>>,
}

impl WidgetHandle {
    fn new(id: String, widget: ChatWidget) -> Self {
        Self {
            inner: Arc::new(WidgetHandleInner {
                id,
                widget: Mutex::new(widget),
                last_activity: RwLock::new(Utc::now()),
            }),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Take exclusive access to the widget and record activity.
    pub async fn lock(&self) -> MutexGuard<'_, ChatWidget> {
        self.touch();
        self.inner.widget.lock().await
    }

    fn touch(&self) {
        let mut guard = self
            .inner
            .last_activity
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Utc::now();
    }

    /// Check if the widget has been idle longer than `timeout`.
    #[must_use]
    pub fn is_expired_with_timeout(&self, timeout: Duration) -> bool {
        let last = *self
            .inner
            .last_activity
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        // A negative span means clock skew; treat as fresh.
        (Utc::now() - last)
            .to_std()
            .is_ok_and(|idle| idle > timeout)
    }
}

/// Thread-safe store of mounted widgets, keyed by page id.
#[derive(Debug, Clone, Default)]
pub struct WidgetRegistry {
    inner: Arc<RwLock<HashMap<String, WidgetHandle>>>,
}

impl WidgetRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a widget under a fresh page id.
    pub fn mount(&self, widget: ChatWidget) -> WidgetHandle {
        let id = Uuid::new_v4().to_string();
        let handle = WidgetHandle::new(id.clone(), widget);
        self.write().insert(id, handle.clone());
        handle
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<WidgetHandle> {
        self.read().get(id).cloned()
    }

    pub fn remove(&self, id: &str) -> Option<WidgetHandle> {
        self.write().remove(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn list_ids(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// Drop widgets idle for longer than `timeout`.
    ///
    /// In-flight requests of dropped widgets run to completion detached.
    /// Returns the number of widgets removed.
    pub fn cleanup_expired_with_timeout(&self, timeout: Duration) -> usize {
        let mut guard = self.write();
        let before = guard.len();
        guard.retain(|_, handle| !handle.is_expired_with_timeout(timeout));
        before - guard.len()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, WidgetHandle>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, WidgetHandle>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{
        ConversationClient, CreateConversationResponse, PostMessageResponse, Result, SessionId,
    };
    use crate::widget::WidgetConfig;
    use async_trait::async_trait;

    struct NullClient;

    #[async_trait]
    impl ConversationClient for NullClient {
        async fn create_conversation(&self, _title: &str) -> Result<CreateConversationResponse> {
            Ok(CreateConversationResponse::default())
        }

        async fn post_message(
            &self,
            _id: &SessionId,
            _content: &str,
        ) -> Result<PostMessageResponse> {
            Ok(PostMessageResponse::default())
        }
    }

    fn widget() -> ChatWidget {
        ChatWidget::new(Arc::new(NullClient), Arc::new(WidgetConfig::default()))
    }

    #[tokio::test]
    async fn test_registry_lifecycle() {
        let registry = WidgetRegistry::new();
        assert!(registry.is_empty());

        let handle = registry.mount(widget());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.list_ids(), vec![handle.id().to_string()]);

        let again = registry.get(handle.id()).unwrap();
        again.lock().await.toggle_open();
        assert!(handle.lock().await.state().is_open());

        registry.remove(handle.id());
        assert!(registry.is_empty());
        assert!(registry.get(handle.id()).is_none());
    }

    #[tokio::test]
    async fn test_page_ids_are_unique() {
        let registry = WidgetRegistry::new();
        let a = registry.mount(widget());
        let b = registry.mount(widget());
        assert_ne!(a.id(), b.id());
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test]
    async fn test_cleanup_expired() {
        let registry = WidgetRegistry::new();
        registry.mount(widget());

        assert_eq!(registry.cleanup_expired_with_timeout(DEFAULT_IDLE_TIMEOUT), 0);
        assert_eq!(registry.len(), 1);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(registry.cleanup_expired_with_timeout(Duration::from_millis(1)), 1);
        assert!(registry.is_empty());
    }
}
