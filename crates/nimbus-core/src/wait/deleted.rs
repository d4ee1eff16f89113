//! Delete idiom: after a delete task finishes, the resource must answer 404.

use thiserror::Error;

use crate::domain::ApiError;

#[derive(Debug, Error)]
pub enum DeleteCheckError {
    #[error("{0} still exists after its delete task finished")]
    StillExists(String),

    #[error("could not confirm that {resource} is gone")]
    Lookup {
        resource: String,
        #[source]
        source: ApiError,
    },
}

/// Interpret a re-fetch of a just-deleted resource.
///
/// Not-Found is success. A successful fetch means the resource is still
/// there; any other error is passed through as a lookup failure.
pub fn ensure_deleted<T>(
    resource: &str,
    lookup: Result<T, ApiError>,
) -> Result<(), DeleteCheckError> {
    match lookup {
        Err(err) if err.is_not_found() => Ok(()),
        Ok(_) => Err(DeleteCheckError::StillExists(resource.to_string())),
        Err(source) => Err(DeleteCheckError::Lookup {
            resource: resource.to_string(),
            source,
        }),
    }
}
