//! Storage result types
//!
//! Defines result structures returned by storage operations.

use std::path::PathBuf;

use crate::navigate::VirtualPath;

/// Result of creating a folder
#[derive(Debug, Clone)]
pub struct CreateFolderResult {
    pub parent: VirtualPath,
    pub name: String,
}

/// Result of a file upload
#[derive(Debug, Clone)]
pub struct UploadResult {
    pub folder: VirtualPath,
    pub stored_name: String,
    pub identifier: u32,
    pub bytes_written: u64,
}

/// Result of copying stored content into the download directory
#[derive(Debug, Clone)]
pub struct DownloadResult {
    pub folder: VirtualPath,
    pub identifier: u32,
    pub target: PathBuf,
    pub bytes_copied: u64,
}

/// Result of a file deletion. `identifier` is `None` when nothing was removed.
#[derive(Debug, Clone)]
pub struct DeleteResult {
    pub folder: VirtualPath,
    pub removed: bool,
    pub identifier: Option<u32>,
}

/// Result of a file rename
#[derive(Debug, Clone)]
pub struct RenameResult {
    pub folder: VirtualPath,
    pub old_identifier: u32,
    pub new_identifier: u32,
}

/// Result of a folder rename
#[derive(Debug, Clone)]
pub struct FolderRenameResult {
    pub parent: VirtualPath,
    pub renamed: VirtualPath,
    pub moved_files: usize,
}
