//! Production bridge implementation: JSON document storage, system keychain,
//! and provider HTTP APIs.

pub mod keychain;
pub mod storage;

mod ai;

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;

use crate::bridge::{Bridge, BridgeError, Result};
use crate::config::Config;
use crate::core::catalog;
use crate::core::{AiProvider, Completion, ExecuteRequest, Task};

use storage::JsonStore;

const TASKS_SECTION: &str = "tasks";
const PROVIDERS_SECTION: &str = "ai_providers";

/// Appended to every task's instructions so replies stay paste-ready.
const OUTPUT_ONLY_SUFFIX: &str = "\n\n!Important: Output only the text of the response, do not include any additional information or formatting.";

/// Production [`Bridge`].
///
/// Tasks and provider entries live in one JSON document; API keys never do.
/// On save, non-blank keys move to the system keychain and the stored entry
/// is blanked; on load, blank entries are refilled from the keychain so
/// callers see what is configured.
pub struct HostBridge {
    store: JsonStore,
    http: reqwest::Client,
}

impl HostBridge {
    /// Create a bridge storing data at the given path.
    #[must_use]
    pub fn new(store_path: PathBuf, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            store: JsonStore::new(store_path),
            http,
        }
    }

    /// Create a bridge from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the store path cannot be resolved.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(config.store_path()?, config.request_timeout()))
    }
}

#[async_trait]
impl Bridge for HostBridge {
    async fn load_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.store.read_section(TASKS_SECTION)?.unwrap_or_default())
    }

    async fn save_tasks(&self, tasks: Vec<Task>) -> Result<()> {
        self.store.write_section(TASKS_SECTION, &tasks)?;
        Ok(())
    }

    async fn load_ai_providers(&self) -> Result<Vec<AiProvider>> {
        match self.store.read_section::<Vec<AiProvider>>(PROVIDERS_SECTION)? {
            None => {
                // First load: seed and persist the registry defaults.
                let defaults = catalog::default_providers();
                self.store.write_section(PROVIDERS_SECTION, &defaults)?;
                tracing::debug!(count = defaults.len(), "seeded default providers");
                Ok(defaults)
            }
            Some(mut providers) => {
                for provider in &mut providers {
                    if provider.api_key.is_empty() {
                        if let Some(key) = keychain::get_api_key(&provider.id) {
                            provider.api_key = key;
                        }
                    }
                }
                Ok(providers)
            }
        }
    }

    async fn save_ai_providers(&self, mut providers: Vec<AiProvider>) -> Result<()> {
        for provider in &mut providers {
            if provider.api_key.is_empty() {
                // Cleared key: drop any stored credential; a missing entry is fine.
                let _ = keychain::delete_api_key(&provider.id);
            } else {
                keychain::store_api_key(&provider.id, &provider.api_key)?;
                provider.api_key.clear();
            }
        }
        self.store.write_section(PROVIDERS_SECTION, &providers)?;
        Ok(())
    }

    async fn execute_task(&self, request: ExecuteRequest) -> Result<Completion> {
        let tasks = self.load_tasks().await?;
        let task = tasks
            .iter()
            .find(|task| task.id == request.task_id)
            .ok_or_else(|| BridgeError::TaskNotFound(request.task_id.clone()))?;

        let instructions = format!("{}{OUTPUT_ONLY_SUFFIX}", task.task_description);

        let api_key = keychain::get_api_key(&request.provider_id)
            .ok_or_else(|| BridgeError::ApiKeyMissing(request.provider_id.clone()))?;

        tracing::debug!(
            task_id = %request.task_id,
            provider = %request.provider_id,
            model = %request.model,
            "executing task"
        );
        ai::complete(
            &self.http,
            &request.provider_id,
            &request.model,
            &instructions,
            &request.input,
            &api_key,
        )
        .await
    }
}
