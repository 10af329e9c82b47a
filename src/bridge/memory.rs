//! In-memory bridge for tests.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::core::{AiProvider, Completion, ExecuteRequest, Task};

use super::{Bridge, BridgeError, Result};

/// In-memory [`Bridge`] with injectable failures.
///
/// Lists live in plain `Vec`s behind a mutex; the failure toggles simulate a
/// host whose storage or execution surface is down. Unlike the production
/// bridge it stores API keys as-is, so saved provider entries read back
/// unchanged.
#[derive(Default)]
pub struct MemoryBridge {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    tasks: Vec<Task>,
    providers: Vec<AiProvider>,
    fail_loads: bool,
    fail_saves: bool,
    fail_execute: bool,
}

impl MemoryBridge {
    /// Create an empty bridge.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bridge pre-seeded with provider entries.
    #[must_use]
    pub fn with_providers(providers: Vec<AiProvider>) -> Self {
        let bridge = Self::default();
        bridge.state.lock().providers = providers;
        bridge
    }

    /// Make subsequent loads fail.
    pub fn fail_loads(&self, fail: bool) {
        self.state.lock().fail_loads = fail;
    }

    /// Make subsequent saves fail.
    pub fn fail_saves(&self, fail: bool) {
        self.state.lock().fail_saves = fail;
    }

    /// Make subsequent executions fail.
    pub fn fail_execute(&self, fail: bool) {
        self.state.lock().fail_execute = fail;
    }

    /// Snapshot of the stored task list.
    #[must_use]
    pub fn stored_tasks(&self) -> Vec<Task> {
        self.state.lock().tasks.clone()
    }

    /// Snapshot of the stored provider list.
    #[must_use]
    pub fn stored_providers(&self) -> Vec<AiProvider> {
        self.state.lock().providers.clone()
    }
}

#[async_trait]
impl Bridge for MemoryBridge {
    async fn load_tasks(&self) -> Result<Vec<Task>> {
        let state = self.state.lock();
        if state.fail_loads {
            return Err(BridgeError::Storage("simulated load failure".to_string()));
        }
        Ok(state.tasks.clone())
    }

    async fn save_tasks(&self, tasks: Vec<Task>) -> Result<()> {
        let mut state = self.state.lock();
        if state.fail_saves {
            return Err(BridgeError::Storage("simulated save failure".to_string()));
        }
        state.tasks = tasks;
        Ok(())
    }

    async fn load_ai_providers(&self) -> Result<Vec<AiProvider>> {
        let state = self.state.lock();
        if state.fail_loads {
            return Err(BridgeError::Storage("simulated load failure".to_string()));
        }
        Ok(state.providers.clone())
    }

    async fn save_ai_providers(&self, providers: Vec<AiProvider>) -> Result<()> {
        let mut state = self.state.lock();
        if state.fail_saves {
            return Err(BridgeError::Storage("simulated save failure".to_string()));
        }
        state.providers = providers;
        Ok(())
    }

    async fn execute_task(&self, request: ExecuteRequest) -> Result<Completion> {
        let state = self.state.lock();
        if state.fail_execute {
            return Err(BridgeError::Transport(
                "simulated execution failure".to_string(),
            ));
        }
        let task = state
            .tasks
            .iter()
            .find(|task| task.id == request.task_id)
            .ok_or_else(|| BridgeError::TaskNotFound(request.task_id.clone()))?;
        Ok(Completion {
            content: format!("[{} via {}] {}", task.name, request.model, request.input),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn execute_requires_a_stored_task() {
        let bridge = MemoryBridge::new();
        let result = bridge
            .execute_task(ExecuteRequest {
                task_id: "missing".to_string(),
                provider_id: "openai".to_string(),
                model: "gpt-4o-mini".to_string(),
                input: "hello".to_string(),
            })
            .await;
        assert!(matches!(result, Err(BridgeError::TaskNotFound(_))));
    }

    #[tokio::test]
    async fn failure_toggles_can_be_cleared() {
        let bridge = MemoryBridge::new();
        bridge.fail_saves(true);
        assert!(bridge.save_tasks(Vec::new()).await.is_err());
        bridge.fail_saves(false);
        assert!(bridge.save_tasks(Vec::new()).await.is_ok());
    }

    #[tokio::test]
    async fn execute_failure_toggle_beats_task_lookup() {
        let bridge = MemoryBridge::new();
        bridge
            .save_tasks(vec![Task {
                id: "t1".to_string(),
                name: "Echo".to_string(),
                task_description: "Echo the input".to_string(),
            }])
            .await
            .unwrap();

        bridge.fail_execute(true);
        let result = bridge
            .execute_task(ExecuteRequest {
                task_id: "t1".to_string(),
                provider_id: "openai".to_string(),
                model: "gpt-4o-mini".to_string(),
                input: "hello".to_string(),
            })
            .await;
        assert!(matches!(result, Err(BridgeError::Transport(_))));
    }
}
