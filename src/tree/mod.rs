//! In-memory folder tree
//!
//! Holds folders and files, enforces sibling name uniqueness and generates
//! collision-free names.

pub mod node;
pub mod operations;
pub mod validation;

pub use node::{Entry, FileEntry, Folder, ROOT_NAME};
pub use operations::NEW_FOLDER_BASE;
pub use validation::validate_name;

/// `Loli/` holding `file.txt`, an empty `Holy/`, and a root `file.txt`
#[cfg(test)]
pub(crate) fn demo_tree() -> Folder {
    let mut loli = Folder::new("Loli");
    loli.insert_file("file.txt".to_string());

    let mut root = Folder::root();
    root.insert_folder(loli);
    root.insert_folder(Folder::new("Holy"));
    root.insert_file("file.txt".to_string());
    root
}
