//! Generic working-copy list shared by the task and provider stores.

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;

use crate::bridge;

/// A stored record addressed by a stable string id.
pub trait Record: Clone {
    /// Stable identifier for the record.
    fn id(&self) -> &str;
}

/// Adapter between a working copy and one section of the host bridge.
///
/// Implementations are cheap handles (typically wrapping an `Arc`), so a
/// commit can carry its own copy into a detached future.
#[async_trait]
pub trait Persistence: Clone + Send + Sync + 'static {
    /// Record type this adapter persists.
    type Item: Record + Send + Sync + 'static;

    /// Fetch the persisted list.
    async fn hydrate(&self) -> bridge::Result<Vec<Self::Item>>;

    /// Replace the persisted list.
    async fn persist(&self, items: Vec<Self::Item>) -> bridge::Result<()>;
}

/// In-memory list of records, edited eagerly in place and flushed explicitly.
///
/// Nothing reaches the host until [`WorkingCopy::commit`], which flushes a
/// snapshot of the whole list.
pub struct WorkingCopy<P: Persistence> {
    adapter: P,
    items: Vec<P::Item>,
}

impl<P: Persistence> WorkingCopy<P> {
    /// Create an empty working copy over the given adapter.
    pub const fn new(adapter: P) -> Self {
        Self {
            adapter,
            items: Vec::new(),
        }
    }

    /// Replace local state with the persisted list.
    ///
    /// # Errors
    ///
    /// Returns the bridge error on failure, leaving the local list untouched;
    /// a store hydrated at startup simply stays empty.
    pub async fn load(&mut self) -> bridge::Result<()> {
        match self.adapter.hydrate().await {
            Ok(items) => {
                self.items = items;
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "hydration failed, keeping local list");
                Err(error)
            }
        }
    }

    /// All records in insertion order.
    #[must_use]
    pub fn items(&self) -> &[P::Item] {
        &self.items
    }

    /// Look up a record by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&P::Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Append a record to the end of the list.
    pub fn append(&mut self, item: P::Item) {
        self.items.push(item);
    }

    /// Replace the record with a matching id, keeping its position.
    ///
    /// Returns `false` if no record matches.
    pub fn replace(&mut self, item: P::Item) -> bool {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.id() == item.id())
        {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Remove the record with the given id.
    ///
    /// Returns `false` if no record matches.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != before
    }

    /// Flush a snapshot of the current list to the host.
    ///
    /// The returned future owns its data: it captures the list as of this
    /// call plus a handle to the adapter, so the store can keep mutating (or
    /// be dropped) while the flush is in flight. When flushes overlap,
    /// whichever the host applies last wins wholesale.
    pub fn commit(&self) -> BoxFuture<'static, bridge::Result<()>> {
        let adapter = self.adapter.clone();
        let snapshot = self.items.clone();
        async move { adapter.persist(snapshot).await }.boxed()
    }
}
