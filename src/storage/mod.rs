//! Content storage
//!
//! Maps virtual file paths to flat content files and orchestrates the file
//! operations that touch both the tree and the disk.

pub mod addresser;
pub mod filesystem;
pub mod operations;
pub mod results;

pub use addresser::{ContentAddresser, identifier_for};
pub use operations::{FileStore, SharedFileStore};
