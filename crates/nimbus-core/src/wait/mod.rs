//! Task waiter: poll an asynchronous task until it reaches a terminal state.
//!
//! Mutating API calls (create, delete, resize, ...) return task ids instead of
//! results. This module turns "a task id" into "the finished task" (or a
//! classified failure), and optionally runs a caller supplied step afterwards.
//!
//! Design intent:
//! - Remote system owns the state machine; we only observe it.
//! - One fetch in flight per wait, fixed sleep between fetches.
//! - The wait blocks the calling task for its whole duration. Spawn it if you
//!   need to do something else meanwhile.

mod deleted;
mod options;
mod poller;
mod result;

pub use deleted::{DeleteCheckError, ensure_deleted};
pub use options::WaitOptions;
pub use poller::{WaitError, wait_for_status};
pub use result::{
    TaskResultError, wait_task_and_process_result, wait_task_and_process_result_with,
    wait_task_and_return_result, wait_task_and_return_result_with,
};
