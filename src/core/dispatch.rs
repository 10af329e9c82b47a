//! Execution dispatch with a busy flag for exclusive runs.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::bridge::{self, Bridge};

/// Everything the host needs to run a task once.
///
/// Field names serialize in camelCase to match the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    /// Id of the task whose instructions to apply.
    pub task_id: String,
    /// Slug of the provider to execute against.
    pub provider_id: String,
    /// Model identifier to use.
    pub model: String,
    /// Text the task transforms.
    pub input: String,
}

/// Result of a successful execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// Text produced by the model.
    pub content: String,
}

/// Forwards execution requests to the host and tracks whether one is in
/// flight.
///
/// The dispatcher does not queue or cancel. Callers check
/// [`Dispatcher::is_busy`] and start at most one execution at a time; the
/// flag exists so they can disable further submission while a run is
/// outstanding.
pub struct Dispatcher {
    bridge: Arc<dyn Bridge>,
    busy: Arc<AtomicBool>,
}

/// Clears the busy flag when the execution future settles or is dropped.
struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl BusyGuard {
    fn engage(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::Release);
        Self {
            flag: Arc::clone(flag),
        }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl Dispatcher {
    /// Create a dispatcher over the given bridge.
    #[must_use]
    pub fn new(bridge: Arc<dyn Bridge>) -> Self {
        Self {
            bridge,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether an execution is currently in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Start an execution.
    ///
    /// The busy flag is raised before this returns and cleared when the
    /// returned future completes, fails, or is dropped. The future owns its
    /// data and does not borrow the dispatcher.
    pub fn execute(
        &self,
        request: ExecuteRequest,
    ) -> BoxFuture<'static, bridge::Result<Completion>> {
        let guard = BusyGuard::engage(&self.busy);
        let bridge = Arc::clone(&self.bridge);
        tracing::debug!(task_id = %request.task_id, model = %request.model, "dispatching execution");
        async move {
            let _guard = guard;
            bridge.execute_task(request).await
        }
        .boxed()
    }
}
