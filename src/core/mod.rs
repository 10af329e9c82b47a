//! In-memory working state: task and provider stores, the static model
//! catalog, and the execution dispatcher.
//!
//! Mutations are synchronous and local. The only asynchronous points are the
//! explicit persistence edges: `load` hydrates a store from the host bridge,
//! `commit` flushes a snapshot back, and [`Dispatcher::execute`] forwards a
//! run request.

pub mod catalog;
pub mod dispatch;
pub mod provider;
pub mod store;
pub mod task;

pub use catalog::Model;
pub use dispatch::{Completion, Dispatcher, ExecuteRequest};
pub use provider::{AiProvider, ProviderStore};
pub use store::{Persistence, Record, WorkingCopy};
pub use task::{Task, TaskDraft, TaskStore};
