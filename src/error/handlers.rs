//! Error handlers
//!
//! Maps file manager errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{error, warn};

use crate::error::types::{FileManagerError, StorageError, TreeError};

/// Log a file manager error at a level matching its severity
pub fn handle_error(err: &FileManagerError) {
    if error_to_status(err).is_server_error() {
        error!("File manager error: {}", err);
    } else {
        warn!("Rejected request: {}", err);
    }
}

/// Convert error to HTTP status code
pub fn error_to_status(err: &FileManagerError) -> StatusCode {
    match err {
        FileManagerError::Navigate(_) => StatusCode::NOT_FOUND,
        FileManagerError::Storage(StorageError::ContentNotFound(_)) => StatusCode::NOT_FOUND,
        FileManagerError::Storage(
            StorageError::IoError(_) | StorageError::IdentifierCollision { .. },
        ) => StatusCode::INTERNAL_SERVER_ERROR,
        FileManagerError::Tree(TreeError::InvalidName(_) | TreeError::RootRename) => {
            StatusCode::BAD_REQUEST
        }
        FileManagerError::Tree(TreeError::DuplicateName(_) | TreeError::NameNotFound(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        FileManagerError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for FileManagerError {
    fn into_response(self) -> Response {
        handle_error(&self);
        (error_to_status(&self), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::types::NavigateError;
    use std::io;

    #[test]
    fn unresolvable_paths_map_to_not_found() {
        let err = FileManagerError::from(NavigateError::NotFound("/files/x/".into()));
        assert_eq!(error_to_status(&err), StatusCode::NOT_FOUND);

        let err = FileManagerError::from(NavigateError::OutsideRoot("/etc/".into()));
        assert_eq!(error_to_status(&err), StatusCode::NOT_FOUND);

        let err = FileManagerError::from(StorageError::ContentNotFound("/files/a".into()));
        assert_eq!(error_to_status(&err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn rename_conflicts_and_io_failures_are_server_errors() {
        let err = FileManagerError::from(TreeError::DuplicateName("b.txt".into()));
        assert_eq!(error_to_status(&err), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("b.txt"));

        let err = FileManagerError::from(TreeError::NameNotFound("a.txt".into()));
        assert_eq!(error_to_status(&err), StatusCode::INTERNAL_SERVER_ERROR);

        let err = FileManagerError::from(io::Error::new(io::ErrorKind::Other, "disk gone"));
        assert_eq!(error_to_status(&err), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("disk gone"));

        let err = FileManagerError::from(StorageError::IdentifierCollision {
            path: "/files/a".into(),
            owner: "/files/b".into(),
        });
        assert_eq!(error_to_status(&err), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("/files/b"));
    }

    #[test]
    fn client_mistakes_are_bad_requests() {
        let err = FileManagerError::from(TreeError::InvalidName("..".into()));
        assert_eq!(error_to_status(&err), StatusCode::BAD_REQUEST);

        let err = FileManagerError::from(TreeError::RootRename);
        assert_eq!(error_to_status(&err), StatusCode::BAD_REQUEST);

        let err = FileManagerError::MalformedRequest("missing myFile".into());
        assert_eq!(error_to_status(&err), StatusCode::BAD_REQUEST);
    }
}
