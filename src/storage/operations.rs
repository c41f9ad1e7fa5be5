//! Storage operations
//!
//! `FileStore` owns the folder tree, the content identifier table and the two
//! on-disk directories. Every mutation does its disk step first and commits
//! the tree and table change only once the disk step succeeded.

use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::{FileManagerError, StorageError, TreeError};
use crate::navigate::{VirtualPath, resolve_folder, resolve_folder_mut, walk, walk_mut};
use crate::storage::addresser::{ContentAddresser, identifier_for};
use crate::storage::filesystem;
use crate::storage::results::{
    CreateFolderResult, DeleteResult, DownloadResult, FolderRenameResult, RenameResult,
    UploadResult,
};
use crate::tree::{Folder, validate_name};

/// Store shared between request handlers. The lock serializes every
/// operation on the tree, the table and the content directory.
pub type SharedFileStore = Arc<Mutex<FileStore>>;

pub struct FileStore {
    root: Folder,
    addresser: ContentAddresser,
    data_dir: PathBuf,
    download_dir: PathBuf,
}

impl FileStore {
    /// Opens a store over freshly wiped data and download directories
    pub fn open(data_dir: &Path, download_dir: &Path) -> Result<Self, FileManagerError> {
        filesystem::reset_directory(data_dir)?;
        filesystem::reset_directory(download_dir)?;
        info!(
            "File store ready (data: {}, downloads: {})",
            data_dir.display(),
            download_dir.display()
        );

        Ok(Self {
            root: Folder::root(),
            addresser: ContentAddresser::new(),
            data_dir: data_dir.to_path_buf(),
            download_dir: download_dir.to_path_buf(),
        })
    }

    /// Creates `Loli/` with `file.txt`, an empty `Holy/` and a root `file.txt`.
    /// Seeded files have empty content.
    pub fn seed_demo_entries(&mut self) -> Result<(), FileManagerError> {
        self.root.insert_folder(Folder::new("Loli"));
        self.upload("/files/Loli/", "file.txt", &[])?;
        self.root.insert_folder(Folder::new("Holy"));
        self.upload("/files/", "file.txt", &[])?;
        info!("Seeded demo folder tree");
        Ok(())
    }

    pub fn into_shared(self) -> SharedFileStore {
        Arc::new(Mutex::new(self))
    }

    pub fn root(&self) -> &Folder {
        &self.root
    }

    pub fn addresser(&self) -> &ContentAddresser {
        &self.addresser
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Folder at an already parsed path
    pub fn folder_at(&self, path: &VirtualPath) -> Result<&Folder, FileManagerError> {
        Ok(walk(&self.root, path)?)
    }

    /// Adds a `NewFolder`-style folder under `raw_path`
    pub fn create_folder(&mut self, raw_path: &str) -> Result<CreateFolderResult, FileManagerError> {
        let (parent, folder) = resolve_folder_mut(&mut self.root, raw_path)?;
        let name = folder.add_folder();
        info!("Created folder {}", parent.child(&name));
        Ok(CreateFolderResult { parent, name })
    }

    /// Stores `bytes` as `filename` in `raw_path`, disambiguating the name on
    /// collision
    pub fn upload(
        &mut self,
        raw_path: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<UploadResult, FileManagerError> {
        validate_name(filename)?;
        let (path, folder) = resolve_folder_mut(&mut self.root, raw_path)?;

        let stored_name = folder.unique_file_name(filename);
        let key = path.file_key(&stored_name);
        let identifier = identifier_for(&key);

        ensure_identifier_free(&self.addresser, identifier, &key, &key)?;

        filesystem::write_content(&self.data_dir, identifier, bytes)?;

        folder.insert_file(stored_name.clone());
        self.addresser.insert(key.clone(), identifier);

        info!(
            "Uploaded {} as {} ({} bytes)",
            key,
            identifier,
            bytes.len()
        );

        Ok(UploadResult {
            folder: path,
            stored_name,
            identifier,
            bytes_written: bytes.len() as u64,
        })
    }

    /// Copies the content of `filename` in `raw_path` into the download
    /// directory
    pub fn download(
        &self,
        raw_path: &str,
        filename: &str,
    ) -> Result<DownloadResult, FileManagerError> {
        let (path, folder) = resolve_folder(&self.root, raw_path)?;
        let key = path.file_key(filename);

        let identifier = match self.addresser.get(&key) {
            Some(identifier) if folder.has_file(filename) => identifier,
            _ => return Err(StorageError::ContentNotFound(key).into()),
        };

        let source = filesystem::content_path(&self.data_dir, identifier);
        let (target, bytes_copied) =
            filesystem::copy_to_downloads(&source, &self.download_dir, filename).map_err(|e| {
                error!("Failed to copy {} to downloads: {}", source.display(), e);
                StorageError::IoError(e)
            })?;

        info!(
            "Downloaded {} to {} ({} bytes)",
            key,
            target.display(),
            bytes_copied
        );

        Ok(DownloadResult {
            folder: path,
            identifier,
            target,
            bytes_copied,
        })
    }

    /// Deletes `filename` from `raw_path`. Deleting a missing name is a no-op.
    pub fn delete(
        &mut self,
        raw_path: &str,
        filename: &str,
    ) -> Result<DeleteResult, FileManagerError> {
        let (path, folder) = resolve_folder_mut(&mut self.root, raw_path)?;

        if !folder.has_file(filename) {
            info!("Nothing to delete at {}", path.file_key(filename));
            return Ok(DeleteResult {
                folder: path,
                removed: false,
                identifier: None,
            });
        }

        let key = path.file_key(filename);
        let identifier = self.addresser.get(&key);
        match identifier {
            Some(id) => filesystem::remove_content(&self.data_dir, id).map_err(|e| {
                error!("Failed to remove content {} of {}: {}", id, key, e);
                StorageError::IoError(e)
            })?,
            None => warn!("{} had no stored content", key),
        }

        folder.delete_file(filename);
        self.addresser.remove(&key);
        info!("Deleted {}", key);

        Ok(DeleteResult {
            folder: path,
            removed: true,
            identifier,
        })
    }

    /// Renames file `old_name` in `raw_path` to `new_name`, moving its content
    /// to the identifier of the new path
    pub fn rename_file(
        &mut self,
        raw_path: &str,
        old_name: &str,
        new_name: &str,
    ) -> Result<RenameResult, FileManagerError> {
        let (path, folder) = resolve_folder_mut(&mut self.root, raw_path)?;
        folder.check_file_rename(old_name, new_name)?;

        let old_key = path.file_key(old_name);
        let new_key = path.file_key(new_name);
        let old_identifier = self
            .addresser
            .get(&old_key)
            .ok_or_else(|| StorageError::ContentNotFound(old_key.clone()))?;
        let new_identifier = identifier_for(&new_key);
        ensure_identifier_free(&self.addresser, new_identifier, &new_key, &old_key)?;

        if old_identifier != new_identifier {
            filesystem::rename_content(&self.data_dir, old_identifier, new_identifier).map_err(
                |e| {
                    error!(
                        "Failed to move content {} -> {} for {}: {}",
                        old_identifier, new_identifier, old_key, e
                    );
                    StorageError::IoError(e)
                },
            )?;
        }

        folder.rename_file(old_name, new_name)?;
        self.addresser.remove(&old_key);
        self.addresser.insert(new_key.clone(), new_identifier);

        info!(
            "Renamed {} ({}) to {} ({})",
            old_key, old_identifier, new_key, new_identifier
        );

        Ok(RenameResult {
            folder: path,
            old_identifier,
            new_identifier,
        })
    }

    /// Renames the folder at `raw_path`. Content of every file below it
    /// moves to the identifier of the file's new path before the tree
    /// changes; a failed move puts back the ones already done.
    pub fn rename_folder(
        &mut self,
        raw_path: &str,
        new_name: &str,
    ) -> Result<FolderRenameResult, FileManagerError> {
        let (path, _) = resolve_folder(&self.root, raw_path)?;
        let (parent, old_name) = match (path.parent(), path.name()) {
            (Some(parent), Some(name)) => (parent, name.to_string()),
            _ => return Err(TreeError::RootRename.into()),
        };
        walk(&self.root, &parent)?.check_folder_rename(&old_name, new_name)?;

        let renamed = path.with_name(new_name);
        let old_prefix = path.to_string();
        let new_prefix = renamed.to_string();

        let moves: Vec<ContentMove> = self
            .addresser
            .entries_under(&old_prefix)
            .into_iter()
            .map(|(old_key, old_identifier)| {
                let new_key = format!("{}{}", new_prefix, &old_key[old_prefix.len()..]);
                let new_identifier = identifier_for(&new_key);
                ContentMove {
                    old_key,
                    new_key,
                    old_identifier,
                    new_identifier,
                }
            })
            .collect();

        if old_prefix != new_prefix {
            for (index, m) in moves.iter().enumerate() {
                ensure_identifier_free(&self.addresser, m.new_identifier, &m.new_key, &m.old_key)?;
                if let Some(other) = moves[..index]
                    .iter()
                    .find(|other| other.new_identifier == m.new_identifier)
                {
                    return Err(StorageError::IdentifierCollision {
                        path: m.new_key.clone(),
                        owner: other.new_key.clone(),
                    }
                    .into());
                }
            }

            let mut done: Vec<&ContentMove> = Vec::new();
            for m in &moves {
                if m.old_identifier == m.new_identifier {
                    continue;
                }
                if let Err(e) =
                    filesystem::rename_content(&self.data_dir, m.old_identifier, m.new_identifier)
                {
                    error!(
                        "Failed to move content {} -> {} for {}: {}",
                        m.old_identifier, m.new_identifier, m.old_key, e
                    );
                    self.undo_moves(&done);
                    return Err(StorageError::IoError(e).into());
                }
                done.push(m);
            }

            if let Err(e) = walk_mut(&mut self.root, &parent)
                .map_err(FileManagerError::from)
                .and_then(|folder| Ok(folder.rename_folder(&old_name, new_name)?))
            {
                self.undo_moves(&done);
                return Err(e);
            }

            for m in &moves {
                self.addresser.remove(&m.old_key);
            }
            for m in &moves {
                self.addresser.insert(m.new_key.clone(), m.new_identifier);
            }
        }

        info!(
            "Renamed folder {} to {} ({} stored files moved)",
            path,
            renamed,
            moves.len()
        );

        Ok(FolderRenameResult {
            parent,
            renamed,
            moved_files: moves.len(),
        })
    }

    /// Moves content back after a partially applied folder rename
    fn undo_moves(&self, done: &[&ContentMove]) {
        for m in done.iter().rev() {
            if let Err(e) =
                filesystem::rename_content(&self.data_dir, m.new_identifier, m.old_identifier)
            {
                error!(
                    "Could not restore content {} for {} (now at {}): {}",
                    m.old_identifier, m.old_key, m.new_identifier, e
                );
            }
        }
    }
}

/// Content relocation planned by a folder rename
struct ContentMove {
    old_key: String,
    new_key: String,
    old_identifier: u32,
    new_identifier: u32,
}

/// Refuses to bind `identifier` to `key` while another file's content lives
/// under it. `previous` is the key the content is currently bound to, if it
/// is being moved.
fn ensure_identifier_free(
    addresser: &ContentAddresser,
    identifier: u32,
    key: &str,
    previous: &str,
) -> Result<(), StorageError> {
    match addresser.owner_of(identifier, previous) {
        Some(owner) => {
            warn!(
                "Identifier {} for {} is already used by {}",
                identifier, key, owner
            );
            Err(StorageError::IdentifierCollision {
                path: key.to_string(),
                owner: owner.to_string(),
            })
        }
        None => Ok(()),
    }
}
