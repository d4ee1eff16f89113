//! Ports - 抽象化レイヤー
//!
//! Seams between the waiter and the outside world. The waiter depends only on
//! these traits; `client::ApiClient` implements them over HTTP and
//! `impls::ScriptedTaskFetcher` in memory.

pub mod task_fetcher;

pub use self::task_fetcher::TaskFetcher;
