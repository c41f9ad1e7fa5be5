//! Folder tree operations
//!
//! All operations act on a folder that was already resolved through
//! [`crate::navigate`]. Sibling names are unique regardless of entry kind.
//! Lookups are linear scans; folders are expected to stay small.

use crate::error::TreeError;
use crate::tree::node::{Entry, FileEntry, Folder};
use crate::tree::validation::validate_name;

/// Base name for folders created without an explicit name
pub const NEW_FOLDER_BASE: &str = "NewFolder";

impl Folder {
    /// Whether any entry, folder or file, carries this name
    pub fn has_entry(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name() == name)
    }

    pub fn has_file(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| matches!(entry, Entry::File(file) if file.name == name))
    }

    pub fn child_folder(&self, name: &str) -> Option<&Folder> {
        self.entries.iter().find_map(|entry| match entry {
            Entry::Folder(folder) if folder.name == name => Some(folder),
            _ => None,
        })
    }

    pub fn child_folder_mut(&mut self, name: &str) -> Option<&mut Folder> {
        self.entries.iter_mut().find_map(|entry| match entry {
            Entry::Folder(folder) if folder.name == name => Some(folder),
            _ => None,
        })
    }

    /// `NewFolder`, then `NewFolder1`, `NewFolder2`, ... until free
    pub fn unique_folder_name(&self) -> String {
        let mut candidate = NEW_FOLDER_BASE.to_string();
        let mut suffix = 0;
        while self.has_entry(&candidate) {
            suffix += 1;
            candidate = format!("{}{}", NEW_FOLDER_BASE, suffix);
        }
        candidate
    }

    /// `desired` if free, else `desired (1)`, `desired (2)`, ... until free
    pub fn unique_file_name(&self, desired: &str) -> String {
        let mut candidate = desired.to_string();
        let mut suffix = 0;
        while self.has_entry(&candidate) {
            suffix += 1;
            candidate = format!("{} ({})", desired, suffix);
        }
        candidate
    }

    /// Appends an empty folder with a generated name and returns that name
    pub fn add_folder(&mut self) -> String {
        let name = self.unique_folder_name();
        self.entries.push(Entry::Folder(Folder::new(name.clone())));
        name
    }

    /// Appends a file, disambiguating the name on collision. Returns the
    /// name actually stored.
    pub fn add_file(&mut self, desired: &str) -> String {
        let name = self.unique_file_name(desired);
        self.insert_file(name.clone());
        name
    }

    /// Appends a file under a name the caller already made unique
    pub(crate) fn insert_file(&mut self, name: String) {
        debug_assert!(!self.has_entry(&name));
        self.entries.push(Entry::File(FileEntry::new(name)));
    }

    pub(crate) fn insert_folder(&mut self, folder: Folder) {
        debug_assert!(!self.has_entry(&folder.name));
        self.entries.push(Entry::Folder(folder));
    }

    /// Removes the file called `name`. Returns false when there was none.
    pub fn delete_file(&mut self, name: &str) -> bool {
        let position = self
            .entries
            .iter()
            .position(|entry| matches!(entry, Entry::File(file) if file.name == name));

        match position {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Checks that `old` can be renamed to `new` without touching anything
    pub fn check_file_rename(&self, old: &str, new: &str) -> Result<(), TreeError> {
        validate_name(new)?;
        if self.has_entry(new) {
            return Err(TreeError::DuplicateName(new.to_string()));
        }
        if !self.has_file(old) {
            return Err(TreeError::NameNotFound(old.to_string()));
        }
        Ok(())
    }

    pub fn rename_file(&mut self, old: &str, new: &str) -> Result<(), TreeError> {
        self.check_file_rename(old, new)?;
        for entry in &mut self.entries {
            if let Entry::File(file) = entry {
                if file.name == old {
                    file.name = new.to_string();
                    break;
                }
            }
        }
        Ok(())
    }

    /// Checks that child folder `old` can be renamed to `new`
    pub fn check_folder_rename(&self, old: &str, new: &str) -> Result<(), TreeError> {
        validate_name(new)?;
        if self.child_folder(old).is_none() {
            return Err(TreeError::NameNotFound(old.to_string()));
        }
        if old != new && self.has_entry(new) {
            return Err(TreeError::DuplicateName(new.to_string()));
        }
        Ok(())
    }

    /// Renames the child folder `old`. Descendants need no update since
    /// their paths are derived on lookup.
    pub fn rename_folder(&mut self, old: &str, new: &str) -> Result<(), TreeError> {
        self.check_folder_rename(old, new)?;
        if let Some(folder) = self.child_folder_mut(old) {
            folder.name = new.to_string();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::demo_tree;
    use std::collections::HashSet;

    fn names(folder: &Folder) -> Vec<&str> {
        folder.entries().iter().map(Entry::name).collect()
    }

    #[test]
    fn repeated_folder_creation_yields_distinct_suffixed_names() {
        let mut root = demo_tree();
        let created: Vec<String> = (0..5).map(|_| root.add_folder()).collect();
        assert_eq!(
            created,
            ["NewFolder", "NewFolder1", "NewFolder2", "NewFolder3", "NewFolder4"]
        );
        let unique: HashSet<&str> = names(&root).into_iter().collect();
        assert_eq!(unique.len(), root.entries().len());
    }

    #[test]
    fn folder_name_skips_names_taken_by_files() {
        let mut folder = Folder::new("x");
        folder.add_file("NewFolder");
        assert_eq!(folder.add_folder(), "NewFolder1");
    }

    #[test]
    fn colliding_uploads_get_increasing_parenthesized_counters() {
        let mut root = demo_tree();
        assert_eq!(root.add_file("file.txt"), "file.txt (1)");
        assert_eq!(root.add_file("file.txt"), "file.txt (2)");
        assert_eq!(root.add_file("file.txt"), "file.txt (3)");
        assert_eq!(root.add_file("other.txt"), "other.txt");
        assert_eq!(
            names(&root),
            [
                "Loli",
                "Holy",
                "file.txt",
                "file.txt (1)",
                "file.txt (2)",
                "file.txt (3)",
                "other.txt"
            ]
        );
    }

    #[test]
    fn file_name_collides_with_folder_sibling() {
        let mut root = demo_tree();
        assert_eq!(root.add_file("Loli"), "Loli (1)");
    }

    #[test]
    fn delete_removes_file_once_and_ignores_folders() {
        let mut root = demo_tree();
        assert!(root.delete_file("file.txt"));
        assert!(!root.has_entry("file.txt"));
        assert!(!root.delete_file("file.txt"));
        assert!(!root.delete_file("Loli"));
        assert!(root.child_folder("Loli").is_some());
    }

    #[test]
    fn rename_file_rejects_duplicates_and_missing_sources() {
        let mut root = demo_tree();
        root.add_file("b.txt");

        assert!(matches!(
            root.rename_file("file.txt", "b.txt"),
            Err(TreeError::DuplicateName(n)) if n == "b.txt"
        ));
        assert!(root.has_file("file.txt") && root.has_file("b.txt"));

        assert!(matches!(
            root.rename_file("ghost.txt", "c.txt"),
            Err(TreeError::NameNotFound(n)) if n == "ghost.txt"
        ));
        assert!(matches!(
            root.rename_file("file.txt", "a/b"),
            Err(TreeError::InvalidName(_))
        ));

        root.rename_file("file.txt", "c.txt").unwrap();
        assert!(root.has_file("c.txt"));
        assert!(!root.has_file("file.txt"));
    }

    #[test]
    fn rename_folder_keeps_children_and_position() {
        let mut root = demo_tree();
        root.rename_folder("Loli", "Renamed").unwrap();
        assert_eq!(names(&root)[0], "Renamed");
        assert!(root.child_folder("Renamed").unwrap().has_file("file.txt"));

        assert!(matches!(
            root.rename_folder("Renamed", "Holy"),
            Err(TreeError::DuplicateName(_))
        ));
        assert!(matches!(
            root.rename_folder("file.txt", "x"),
            Err(TreeError::NameNotFound(_))
        ));
        root.rename_folder("Holy", "Holy").unwrap();
    }
}
