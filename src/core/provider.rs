//! AI provider entries and their working-copy store.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::bridge::{self, Bridge};

use super::store::{Persistence, Record, WorkingCopy};

/// Connection settings for one AI provider.
///
/// `api_key` holds whatever the user last entered; the production host moves
/// it into the system keychain on save and hands it back on load. Field names
/// serialize in camelCase to match the stored wire format, and the manual
/// [`fmt::Debug`] impl keeps the key out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiProvider {
    /// Stable provider slug (e.g. "openai").
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether this provider's models are offered for execution.
    pub enabled: bool,
    /// API key as entered by the user; blank when unset.
    pub api_key: String,
    /// Where to obtain an API key.
    pub api_key_url: String,
}

impl fmt::Debug for AiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiProvider")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("enabled", &self.enabled)
            .field(
                "api_key",
                if self.api_key.is_empty() {
                    &"<unset>"
                } else {
                    &"<redacted>"
                },
            )
            .field("api_key_url", &self.api_key_url)
            .finish()
    }
}

impl Record for AiProvider {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone)]
struct ProviderAdapter {
    bridge: Arc<dyn Bridge>,
}

#[async_trait]
impl Persistence for ProviderAdapter {
    type Item = AiProvider;

    async fn hydrate(&self) -> bridge::Result<Vec<AiProvider>> {
        self.bridge.load_ai_providers().await
    }

    async fn persist(&self, items: Vec<AiProvider>) -> bridge::Result<()> {
        self.bridge.save_ai_providers(items).await
    }
}

/// Working copy of the provider list.
///
/// The population is fixed by the host (seeded from the catalog registry on
/// first load); entries can be looked up and edited here, never added or
/// removed.
pub struct ProviderStore {
    inner: WorkingCopy<ProviderAdapter>,
}

impl ProviderStore {
    /// Create an empty store over the given bridge.
    #[must_use]
    pub fn new(bridge: Arc<dyn Bridge>) -> Self {
        Self {
            inner: WorkingCopy::new(ProviderAdapter { bridge }),
        }
    }

    /// Hydrate from the host, replacing local state.
    ///
    /// # Errors
    ///
    /// Returns the bridge error on failure; the store keeps its current
    /// (initially empty) list and the caller may retry.
    pub async fn load(&mut self) -> bridge::Result<&[AiProvider]> {
        self.inner.load().await?;
        Ok(self.inner.items())
    }

    /// All provider entries in stored order.
    #[must_use]
    pub fn providers(&self) -> &[AiProvider] {
        self.inner.items()
    }

    /// Look up a provider by slug.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&AiProvider> {
        self.inner.get(id)
    }

    /// Replace the provider with a matching slug, keeping its position.
    ///
    /// Returns `false` if no provider matches.
    pub fn edit(&mut self, provider: AiProvider) -> bool {
        self.inner.replace(provider)
    }

    /// Flush a snapshot of the provider list to the host.
    ///
    /// See [`WorkingCopy::commit`] for the snapshot semantics.
    pub fn commit(&self) -> BoxFuture<'static, bridge::Result<()>> {
        tracing::debug!(count = self.providers().len(), "committing provider list");
        self.inner.commit()
    }
}
