//! Navigate module
//!
//! Parses virtual folder paths and resolves them against the folder tree.

pub mod operations;
pub mod path;

// Re-export public types and functions
pub use operations::{resolve_folder, resolve_folder_mut, walk, walk_mut};
pub use path::{ROOT_PREFIX, VirtualPath};
