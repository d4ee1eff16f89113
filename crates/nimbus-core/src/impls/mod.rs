//! Impls - ports の in-memory 実装
//!
//! For tests and local development; production code talks to the API through
//! `client::ApiClient`.

pub mod scripted;

pub use self::scripted::ScriptedTaskFetcher;
