//! File system operations
//!
//! Disk primitives for the flat content directory and the download directory.

use log::{error, info, warn};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crate::storage::addresser::content_file_name;

const MAX_RETRIES: u32 = 3;

/// Remove a directory with everything in it, then create it empty
pub fn reset_directory(path: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => info!("Cleared directory {}", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    fs::create_dir_all(path)
}

/// Location of the content for `identifier`
pub fn content_path(data_dir: &Path, identifier: u32) -> PathBuf {
    data_dir.join(content_file_name(identifier))
}

/// Writes content for `identifier`.
///
/// Bytes go to `<id>.tmp` first and are renamed into place once flushed, so a
/// failed write never leaves a half-written content file behind.
pub fn write_content(data_dir: &Path, identifier: u32, bytes: &[u8]) -> io::Result<PathBuf> {
    let final_path = content_path(data_dir, identifier);
    let temp_path = data_dir.join(format!("{}.tmp", content_file_name(identifier)));

    let result = File::create(&temp_path)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.flush()
        })
        .and_then(|()| fs::rename(&temp_path, &final_path));

    if let Err(e) = result {
        error!(
            "Failed to write content {} ({} bytes): {}",
            final_path.display(),
            bytes.len(),
            e
        );
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(final_path)
}

/// Removes the content for `identifier`, retrying transient permission errors
pub fn remove_content(data_dir: &Path, identifier: u32) -> io::Result<()> {
    let path = content_path(data_dir, identifier);
    with_retries(|| fs::remove_file(&path))
}

/// Moves content from one identifier to another
pub fn rename_content(data_dir: &Path, from: u32, to: u32) -> io::Result<()> {
    let source = content_path(data_dir, from);
    let target = content_path(data_dir, to);
    with_retries(|| fs::rename(&source, &target))
}

/// Picks a free file name inside `dir`.
///
/// `report.pdf` becomes `report (1).pdf`, `report (2).pdf`, ... and a name
/// without extension becomes `notes (1)`.
pub fn available_download_path(dir: &Path, filename: &str) -> PathBuf {
    let candidate = dir.join(filename);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, extension) = split_extension(filename);
    let mut counter = 1u32;
    loop {
        let name = match extension {
            Some(ext) => format!("{} ({}).{}", stem, counter, ext),
            None => format!("{} ({})", stem, counter),
        };
        let candidate = dir.join(name);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Copies content into the download directory under a free name derived
/// from `filename`. Returns the target path and the bytes copied.
pub fn copy_to_downloads(
    source: &Path,
    download_dir: &Path,
    filename: &str,
) -> io::Result<(PathBuf, u64)> {
    let target = available_download_path(download_dir, filename);
    let copied = fs::copy(source, &target)?;
    Ok((target, copied))
}

/// Splits at the last dot. A leading dot (`.bashrc`) is not an extension.
fn split_extension(filename: &str) -> (&str, Option<&str>) {
    match filename.rfind('.') {
        Some(0) | None => (filename, None),
        Some(index) => (&filename[..index], Some(&filename[index + 1..])),
    }
}

fn with_retries<F>(mut operation: F) -> io::Result<()>
where
    F: FnMut() -> io::Result<()>,
{
    let mut attempt = 1;
    loop {
        match operation() {
            Ok(()) => return Ok(()),
            Err(e) if attempt < MAX_RETRIES && e.kind() == io::ErrorKind::PermissionDenied => {
                warn!(
                    "Transient file system error (attempt {}/{}): {}. Retrying...",
                    attempt, MAX_RETRIES, e
                );
                thread::sleep(Duration::from_millis(100 * attempt as u64));
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
