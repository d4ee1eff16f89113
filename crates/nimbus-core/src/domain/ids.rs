//! Domain identifiers (strongly-typed IDs).
//!
//! The remote API hands out opaque string handles for tasks and resources.
//! `Id<M>` wraps the string and carries a phantom marker so a task id cannot be
//! passed where a resource id is expected.
//!
//! ## Phantom Type パターン
//! `M` は実行時には使わないマーカー型（PhantomData）で、
//! コンパイル時の型安全性だけを提供します。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// IdMarker は各 ID 型のマーカー trait
///
/// `NAME` is only used by `Debug` so log lines say which kind of id they print.
pub trait IdMarker: Send + Sync + 'static {
    const NAME: &'static str;
}

/// Opaque id handed out by the remote API.
///
/// Serialized as a bare JSON string. `Display` prints the raw value because it
/// is interpolated into request URLs.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<M: IdMarker> {
    value: String,
    #[serde(skip)]
    _marker: PhantomData<M>,
}

impl<M: IdMarker> Id<M> {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_inner(self) -> String {
        self.value
    }
}

// derive だと `M: Clone` などの余計な境界が付くので手書きする
impl<M: IdMarker> Clone for Id<M> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<M: IdMarker> PartialEq for Id<M> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<M: IdMarker> Eq for Id<M> {}

impl<M: IdMarker> std::hash::Hash for Id<M> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<M: IdMarker> From<&str> for Id<M> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<M: IdMarker> From<String> for Id<M> {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<M: IdMarker> AsRef<str> for Id<M> {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl<M: IdMarker> fmt::Display for Id<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<M: IdMarker> fmt::Debug for Id<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", M::NAME, self.value)
    }
}

// ========================================
// マーカー型の定義
// ========================================

/// Task のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskMarker {}

impl IdMarker for TaskMarker {
    const NAME: &'static str = "TaskId";
}

/// Resource (cluster, router, volume, ...) のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceMarker {}

impl IdMarker for ResourceMarker {
    const NAME: &'static str = "ResourceId";
}

/// Identifier of an asynchronous task tracked by the remote system.
pub type TaskId = Id<TaskMarker>;

/// Identifier of a resource created or deleted by a task.
pub type ResourceId = Id<ResourceMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_raw_value() {
        let id = TaskId::new("f0d19cec-5c3f-4853-886e-304915960ff6");
        assert_eq!(id.to_string(), "f0d19cec-5c3f-4853-886e-304915960ff6");
        assert_eq!(format!("{id:?}"), "TaskId(\"f0d19cec-5c3f-4853-886e-304915960ff6\")");
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = ResourceId::new("cluster-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"cluster-1\"");

        let back: ResourceId = serde_json::from_str("\"cluster-1\"").unwrap();
        assert_eq!(back, id);

        // The whole point: you can't accidentally mix these types.
        // let _: TaskId = back; // <- does not compile
    }
}
