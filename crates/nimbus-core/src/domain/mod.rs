//! Domain model: ids, task state, task snapshots, API errors.

pub mod errors;
pub mod ids;
pub mod state;
pub mod task;

pub use self::errors::{ApiError, ErrorKind};
pub use self::ids::{Id, IdMarker, ResourceId, TaskId};
pub use self::state::TaskState;
pub use self::task::{CreatedResources, Task, TaskResults, TaskResultsError};
