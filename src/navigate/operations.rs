//! Navigation operations implementation

use crate::error::NavigateError;
use crate::navigate::path::VirtualPath;
use crate::tree::Folder;

/// Resolves a raw virtual path to a folder in the tree
pub fn resolve_folder<'a>(
    root: &'a Folder,
    raw_path: &str,
) -> Result<(VirtualPath, &'a Folder), NavigateError> {
    let path = VirtualPath::parse(raw_path)?;
    let folder = walk(root, &path)?;
    Ok((path, folder))
}

/// Resolves a raw virtual path to a mutable folder handle.
///
/// The handle edits the live tree; callers hold the store lock for the whole
/// operation.
pub fn resolve_folder_mut<'a>(
    root: &'a mut Folder,
    raw_path: &str,
) -> Result<(VirtualPath, &'a mut Folder), NavigateError> {
    let path = VirtualPath::parse(raw_path)?;
    let folder = walk_mut(root, &path)?;
    Ok((path, folder))
}

/// Walks an already parsed path
pub fn walk<'a>(root: &'a Folder, path: &VirtualPath) -> Result<&'a Folder, NavigateError> {
    let mut current = root;
    for segment in path.segments() {
        current = current
            .child_folder(segment)
            .ok_or_else(|| NavigateError::NotFound(path.to_string()))?;
    }
    Ok(current)
}

pub fn walk_mut<'a>(
    root: &'a mut Folder,
    path: &VirtualPath,
) -> Result<&'a mut Folder, NavigateError> {
    let mut current = root;
    for segment in path.segments() {
        current = current
            .child_folder_mut(segment)
            .ok_or_else(|| NavigateError::NotFound(path.to_string()))?;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::demo_tree;

    #[test]
    fn root_path_resolves_to_root_folder() {
        let root = demo_tree();
        let (path, folder) = resolve_folder(&root, "/files/").unwrap();
        assert!(path.is_root());
        assert!(std::ptr::eq(folder, &root));
    }

    #[test]
    fn nested_folders_resolve_by_name() {
        let root = demo_tree();
        let (path, folder) = resolve_folder(&root, "/files/Loli/").unwrap();
        assert_eq!(path.to_string(), "/files/Loli/");
        assert_eq!(folder.name(), "Loli");
        assert!(folder.has_file("file.txt"));
    }

    #[test]
    fn missing_or_file_segments_are_not_found() {
        let root = demo_tree();
        assert!(matches!(
            resolve_folder(&root, "/files/Nope/"),
            Err(NavigateError::NotFound(_))
        ));
        // file.txt exists at root, but it is not a folder
        assert!(matches!(
            resolve_folder(&root, "/files/file.txt/"),
            Err(NavigateError::NotFound(_))
        ));
        assert!(matches!(
            resolve_folder(&root, "/files/Loli"),
            Err(NavigateError::NotFound(_))
        ));
    }

    #[test]
    fn mutable_handle_edits_live_tree() {
        let mut root = demo_tree();
        {
            let (_, holy) = resolve_folder_mut(&mut root, "/files/Holy/").unwrap();
            holy.add_folder();
        }
        let (_, folder) = resolve_folder(&root, "/files/Holy/NewFolder/").unwrap();
        assert!(folder.entries().is_empty());
    }
}
