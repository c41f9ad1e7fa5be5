//! Error types
//!
//! Defines domain-specific error types for each module of the file manager.

use std::fmt;
use std::io;

/// Navigate module errors
#[derive(Debug)]
pub enum NavigateError {
    OutsideRoot(String),
    NotFound(String),
}

impl fmt::Display for NavigateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigateError::OutsideRoot(p) => write!(f, "Path outside of root: {}", p),
            NavigateError::NotFound(p) => write!(f, "Folder not found: {}", p),
        }
    }
}

impl std::error::Error for NavigateError {}

/// Tree module errors
#[derive(Debug)]
pub enum TreeError {
    DuplicateName(String),
    NameNotFound(String),
    InvalidName(String),
    RootRename,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::DuplicateName(n) => write!(f, "Name already exists: {}", n),
            TreeError::NameNotFound(n) => write!(f, "No entry named: {}", n),
            TreeError::InvalidName(n) => write!(f, "Invalid name: {:?}", n),
            TreeError::RootRename => write!(f, "The root folder cannot be renamed"),
        }
    }
}

impl std::error::Error for TreeError {}

/// Storage module errors
#[derive(Debug)]
pub enum StorageError {
    ContentNotFound(String),
    IdentifierCollision { path: String, owner: String },
    IoError(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ContentNotFound(p) => write!(f, "File not found: {}", p),
            StorageError::IdentifierCollision { path, owner } => {
                write!(f, "Content identifier of {} is already used by {}", path, owner)
            }
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::IoError(e) => Some(e),
            StorageError::ContentNotFound(_) | StorageError::IdentifierCollision { .. } => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}

/// General file manager error that encompasses all error types
#[derive(Debug)]
pub enum FileManagerError {
    Navigate(NavigateError),
    Tree(TreeError),
    Storage(StorageError),
    MalformedRequest(String),
}

impl fmt::Display for FileManagerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileManagerError::Navigate(e) => write!(f, "{}", e),
            FileManagerError::Tree(e) => write!(f, "{}", e),
            FileManagerError::Storage(e) => write!(f, "{}", e),
            FileManagerError::MalformedRequest(e) => write!(f, "Malformed request: {}", e),
        }
    }
}

impl std::error::Error for FileManagerError {}

impl From<NavigateError> for FileManagerError {
    fn from(error: NavigateError) -> Self {
        FileManagerError::Navigate(error)
    }
}

impl From<TreeError> for FileManagerError {
    fn from(error: TreeError) -> Self {
        FileManagerError::Tree(error)
    }
}

impl From<StorageError> for FileManagerError {
    fn from(error: StorageError) -> Self {
        FileManagerError::Storage(error)
    }
}

impl From<io::Error> for FileManagerError {
    fn from(error: io::Error) -> Self {
        FileManagerError::Storage(StorageError::IoError(error))
    }
}
