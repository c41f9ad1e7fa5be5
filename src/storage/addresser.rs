//! Content addressing
//!
//! File content is stored flat on disk under a 32-bit identifier derived from
//! the file's full virtual path. The identifier is not collision-resistant;
//! it only needs to be stable for a given path.

use std::collections::HashMap;

/// 32-bit FNV-1a over the full virtual path (folder path + filename)
pub fn identifier_for(full_path: &str) -> u32 {
    const FNV_OFFSET: u32 = 0x811C9DC5;
    const FNV_PRIME: u32 = 0x01000193;
    let mut hash = FNV_OFFSET;
    for b in full_path.as_bytes() {
        hash ^= *b as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// On-disk file name for an identifier (its decimal form)
pub fn content_file_name(identifier: u32) -> String {
    identifier.to_string()
}

/// Table of full virtual path -> content identifier
#[derive(Debug, Default)]
pub struct ContentAddresser {
    bonds: HashMap<String, u32>,
}

impl ContentAddresser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, full_path: &str) -> Option<u32> {
        self.bonds.get(full_path).copied()
    }

    pub fn insert(&mut self, full_path: String, identifier: u32) -> Option<u32> {
        self.bonds.insert(full_path, identifier)
    }

    pub fn remove(&mut self, full_path: &str) -> Option<u32> {
        self.bonds.remove(full_path)
    }

    /// Another path already bound to `identifier`, if any
    pub fn owner_of(&self, identifier: u32, except: &str) -> Option<&str> {
        self.bonds
            .iter()
            .find(|(path, id)| **id == identifier && path.as_str() != except)
            .map(|(path, _)| path.as_str())
    }

    /// Entries whose path starts with `prefix`, sorted by path
    pub fn entries_under(&self, prefix: &str) -> Vec<(String, u32)> {
        let mut entries: Vec<(String, u32)> = self
            .bonds
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, id)| (key.clone(), *id))
            .collect();
        entries.sort();
        entries
    }

    pub fn len(&self) -> usize {
        self.bonds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty()
    }
}
