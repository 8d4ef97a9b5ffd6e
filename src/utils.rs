use std::path::{Component, Path, PathBuf};

/// Lexically resolves `.` and `..` components without touching the filesystem.
pub fn normalize_path(source: &Path) -> PathBuf {
    let mut new_path = PathBuf::new();

    for component in source.components() {
        match component {
            // Skip the current-dir marker "."
            Component::CurDir => {}

            // ".." cancels a preceding name, is dropped at a root and kept otherwise
            Component::ParentDir => {
                let last = new_path.components().next_back();
                let cancels_name = matches!(last, Some(Component::Normal(_)));
                let at_root = matches!(last, Some(Component::RootDir | Component::Prefix(_)));

                if cancels_name {
                    new_path.pop();
                } else if !at_root {
                    new_path.push(Component::ParentDir.as_os_str());
                }
            }

            // Roots, prefixes and normal components are kept
            other => new_path.push(other.as_os_str()),
        }
    }

    if new_path.as_os_str().is_empty() {
        new_path.push(Component::CurDir.as_os_str());
    }

    new_path
}

/// Path leading from the directory `base` to `target`, both expected to be absolute and
/// normalized.
pub fn relative_path(base: &Path, target: &Path) -> PathBuf {
    let base: Vec<Component> = base.components().collect();
    let target: Vec<Component> = target.components().collect();

    let common = base
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push(Component::ParentDir.as_os_str());
    }
    for component in &target[common..] {
        relative.push(component.as_os_str());
    }

    if relative.as_os_str().is_empty() {
        relative.push(Component::CurDir.as_os_str());
    }

    relative
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path(Path::new("/opt/./tools/../shared/tsconfig")),
            PathBuf::from("/opt/shared/tsconfig")
        );
        assert_eq!(normalize_path(Path::new("a/b/../c")), PathBuf::from("a/c"));
        assert_eq!(normalize_path(Path::new("missing/../pkg")), PathBuf::from("pkg"));
    }

    #[test]
    fn test_normalize_path_keeps_leading_parent_dirs() {
        assert_eq!(normalize_path(Path::new("../../pkg")), PathBuf::from("../../pkg"));
        assert_eq!(normalize_path(Path::new("a/../../pkg")), PathBuf::from("../pkg"));
        assert_eq!(normalize_path(Path::new("/../pkg")), PathBuf::from("/pkg"));
        assert_eq!(normalize_path(Path::new("a/..")), PathBuf::from("."));
    }

    #[test]
    fn test_relative_path_sibling_trees() {
        assert_eq!(
            relative_path(Path::new("/repo/packages/widgets"), Path::new("/repo/shared")),
            PathBuf::from("../../shared")
        );
    }

    #[test]
    fn test_relative_path_descendant() {
        assert_eq!(
            relative_path(Path::new("/repo"), Path::new("/repo/shared/tsconfig")),
            PathBuf::from("shared/tsconfig")
        );
    }

    #[test]
    fn test_relative_path_same_directory() {
        assert_eq!(relative_path(Path::new("/repo"), Path::new("/repo")), PathBuf::from("."));
    }
}
