//! PromptDesk - reusable AI text tasks.
//!
//! This library provides the state and sync core of PromptDesk, including:
//! - Task and provider stores with explicit whole-list commits
//! - A static model catalog filtered by enabled providers
//! - An execution dispatcher with a busy flag
//! - A host bridge for storage, credentials, and provider calls
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │     CLI     │
//! └──────┬──────┘
//!        │
//! ┌──────┴──────┐   ┌─────────────┐
//! │    Core     │───│   Catalog   │
//! └──────┬──────┘   └─────────────┘
//!        │  Bridge trait
//! ┌──────┴──────┐
//! │    Host     │  storage / keychain / provider APIs
//! └─────────────┘
//! ```

pub mod bridge;
pub mod cli;
pub mod config;
pub mod core;
pub mod host;

pub use bridge::{Bridge, BridgeError, MemoryBridge};
pub use config::Config;
pub use core::{
    AiProvider, Completion, Dispatcher, ExecuteRequest, Model, ProviderStore, Task, TaskDraft,
    TaskStore,
};
pub use host::HostBridge;
