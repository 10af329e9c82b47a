//! Host boundary for persistence and task execution.
//!
//! The stores and the dispatcher never touch disk, keychain, or network
//! themselves; they hand whole lists and execution requests to a [`Bridge`]
//! and await the outcome. [`crate::host::HostBridge`] is the production
//! implementation, [`MemoryBridge`] the in-process one used by tests.

mod memory;

use async_trait::async_trait;

use crate::core::{AiProvider, Completion, ExecuteRequest, Task};

pub use memory::MemoryBridge;

/// Errors surfaced by bridge operations.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// Transport-level failure between core and host.
    #[error("transport error: {0}")]
    Transport(String),

    /// HTTP request failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        message: String,
    },

    /// Provider response did not have the expected shape.
    #[error("failed to parse response: {0}")]
    Response(String),

    /// Reading or writing the backing store failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Credential store access failed.
    #[error("credential error: {0}")]
    Credential(String),

    /// No API key stored for the provider.
    #[error("no API key configured for provider '{0}'")]
    ApiKeyMissing(String),

    /// Referenced task does not exist in the backing store.
    #[error("task not found: {0}")]
    TaskNotFound(String),

    /// Provider cannot execute tasks.
    #[error("provider '{0}' is not supported")]
    UnsupportedProvider(String),
}

/// Result type for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Host-side persistence and execution surface.
///
/// Every call is opaque to the core: lists go over whole, requests carry
/// everything the host needs, and all failures come back as [`BridgeError`].
#[async_trait]
pub trait Bridge: Send + Sync {
    /// Load all persisted tasks.
    async fn load_tasks(&self) -> Result<Vec<Task>>;

    /// Persist the full task list, replacing whatever was stored.
    async fn save_tasks(&self, tasks: Vec<Task>) -> Result<()>;

    /// Load all persisted provider entries.
    async fn load_ai_providers(&self) -> Result<Vec<AiProvider>>;

    /// Persist the full provider list, replacing whatever was stored.
    async fn save_ai_providers(&self, providers: Vec<AiProvider>) -> Result<()>;

    /// Run a task once and return the completion.
    async fn execute_task(&self, request: ExecuteRequest) -> Result<Completion>;
}
