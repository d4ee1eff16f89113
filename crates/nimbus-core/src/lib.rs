//! nimbus-core
//!
//! Client-side building blocks for the cloud API's asynchronous tasks.
//!
//! Mutating calls (create, delete, resize, ...) return task ids. This crate
//! polls those tasks until they finish and hands the result to caller logic.
//!
//! # モジュール構成
//! - **domain**: Task, TaskState, TaskId/ResourceId, TaskResults, ApiError
//! - **ports**: `TaskFetcher` (read one task)
//! - **wait**: the polling loop and its wait-then-process helpers
//! - **client**: reqwest based `ApiClient` implementing the ports
//! - **impls**: in-memory `ScriptedTaskFetcher` for tests

pub mod client;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod wait;

pub use client::{ApiClient, ApiClientBuilder, ResourcePath};
pub use domain::{
    ApiError, ErrorKind, ResourceId, Task, TaskId, TaskResults, TaskResultsError, TaskState,
};
pub use ports::TaskFetcher;
pub use wait::{TaskResultError, WaitError, WaitOptions};
