//! Folder tree nodes
//!
//! Nodes only carry their own name. Full virtual paths are derived from the
//! route taken through the tree, see [`crate::navigate::VirtualPath`].

/// Display name of the root folder
pub const ROOT_NAME: &str = "My finder";

/// A folder and its entries, kept in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub(crate) name: String,
    pub(crate) entries: Vec<Entry>,
}

/// A stored file. Its content lives on disk under the identifier bound to
/// its full path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub(crate) name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Folder(Folder),
    File(FileEntry),
}

impl Folder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn root() -> Self {
        Self::new(ROOT_NAME)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

impl FileEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Entry::Folder(folder) => folder.name(),
            Entry::File(file) => file.name(),
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Entry::Folder(_))
    }
}
