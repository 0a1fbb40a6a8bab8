use async_trait::async_trait;

use crate::error::AppResult;
use crate::infrastructure::optimistic::Mutation;
use crate::session::session_store::SessionStore;

/// Remote half of an optimistic mutation (a backend call, a sync queue...).
///
/// An `Err` makes the caller roll local state back to its pre-mutation snapshot.
#[async_trait]
pub trait MutationSink: Send + Sync {
    async fn commit(&self, mutation: &Mutation) -> AppResult<()>;
}

/// Accepts everything; the default when no backend is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalOnlySink;

#[async_trait]
impl MutationSink for LocalOnlySink {
    async fn commit(&self, mutation: &Mutation) -> AppResult<()> {
        tracing::debug!("Local-only commit of {}", mutation.label());
        Ok(())
    }
}

impl<T: SessionStore + ?Sized> SessionStoreExt for T {}

/// Typed JSON helpers over any string key-value session store
pub trait SessionStoreExt: SessionStore {
    fn get_json<V: serde::de::DeserializeOwned>(&self, key: &str) -> AppResult<Option<V>> {
        match self.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn set_json<V: serde::Serialize>(&self, key: &str, value: &V) -> AppResult<()> {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw)
    }
}
