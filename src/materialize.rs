use crate::{
    errors::{FileOperation, IoError},
    utils::{normalize_path, relative_path},
    vfs::FileTreeNode,
};
use colored::Colorize;
use miette::Diagnostic;
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum MaterializeError {
    #[error("There exists a file or directory at the output location: '{path}'")]
    #[diagnostic(
        code(sprout::materialize::destination_exists),
        help("Choose an output directory that does not exist yet")
    )]
    DestinationExists { path: PathBuf },

    #[error("The root of a package tree must be a directory")]
    #[diagnostic(code(sprout::materialize::root_not_directory))]
    RootNotDirectory,

    #[error("I/O error while materializing package")]
    #[diagnostic(code(sprout::materialize::io))]
    Io(#[from] IoError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    File,
    Directory,
}

/// Shared build configuration linked into every package, by entry name under the shared root.
pub const SHARED_LINKS: &[(&str, LinkKind)] = &[
    ("tsconfig.json", LinkKind::File),
    ("tsconfig", LinkKind::Directory),
];

/// Writes `tree` under `target`, which must not exist yet.
///
/// Entries are created depth first in iteration order. There is no rollback: if a write
/// fails, whatever was already created stays on disk.
///
/// # Errors
///
/// Returns a [`MaterializeError`] if:
///
/// - `tree` is not a directory.
/// - Anything (file, directory or link) already exists at `target`.
/// - A directory or file cannot be created or written to.
pub fn materialize(tree: &FileTreeNode, target: &Path) -> Result<(), MaterializeError> {
    if !tree.is_directory() {
        return Err(MaterializeError::RootNotDirectory);
    }

    ensure_vacant(target)?;

    log::debug!("materializing package into {}", target.display());

    write_node(tree, target)
}

fn ensure_vacant(target: &Path) -> Result<(), MaterializeError> {
    match fs::symlink_metadata(target) {
        Ok(_) => Err(MaterializeError::DestinationExists {
            path: target.to_path_buf(),
        }),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(error) => Err(IoError::new(FileOperation::Stat, target.to_path_buf(), error).into()),
    }
}

fn write_node(node: &FileTreeNode, path: &Path) -> Result<(), MaterializeError> {
    match node {
        FileTreeNode::Leaf(contents) => write_file(path, contents),
        FileTreeNode::Directory(entries) => {
            create_directory(path)?;

            for (name, child) in entries {
                write_node(child, &path.join(name))?;
            }

            Ok(())
        }
    }
}

/// Creates a single directory; its parent must already exist.
fn create_directory(path: &Path) -> Result<(), MaterializeError> {
    fs::create_dir(path).map_err(|error| IoError::new(FileOperation::Mkdir, path.into(), error))?;

    log::debug!("...created dir: {}", path.display());

    Ok(())
}

/// Writes a fresh file, failing if one is already present at `path`.
fn write_file(path: &Path, contents: &str) -> Result<(), MaterializeError> {
    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .and_then(|mut file| file.write_all(contents.as_bytes()))
        .map_err(|error| IoError::new(FileOperation::Write, path.into(), error))?;

    println!("{} {}", "create".green(), path.display());

    Ok(())
}

/// Links each of [`SHARED_LINKS`] from `shared_root` into `target` using relative paths.
///
/// Link targets are not required to exist; a missing one only produces a debug log and
/// the dangling link is created anyway.
///
/// # Errors
///
/// Returns a [`MaterializeError::Io`] if either path cannot be resolved or a link cannot
/// be created.
pub fn link_shared_config(target: &Path, shared_root: &Path) -> Result<(), MaterializeError> {
    let target_dir = fs::canonicalize(target)
        .map_err(|error| IoError::new(FileOperation::Resolve, target.into(), error))?;
    let shared_dir = resolve(shared_root)?;
    let relative_root = relative_path(&target_dir, &shared_dir);

    for (name, kind) in SHARED_LINKS {
        if fs::symlink_metadata(shared_dir.join(name)).is_err() {
            log::debug!("shared config missing, linking anyway: {}", shared_dir.join(name).display());
        }

        let original = relative_root.join(name);
        let link = target.join(name);

        symlink(&original, &link, *kind)
            .map_err(|error| IoError::new(FileOperation::Symlink, link.clone(), error))?;

        println!(
            "{} {} -> {}",
            "link".cyan(),
            link.display(),
            original.display()
        );
    }

    Ok(())
}

/// Canonical path of `path` when it exists, otherwise its normalized absolute form.
fn resolve(path: &Path) -> Result<PathBuf, MaterializeError> {
    if let Ok(canonical) = fs::canonicalize(path) {
        return Ok(canonical);
    }

    let absolute = std::path::absolute(path)
        .map_err(|error| IoError::new(FileOperation::Resolve, path.into(), error))?;

    Ok(normalize_path(&absolute))
}

#[cfg(unix)]
fn symlink(original: &Path, link: &Path, _kind: LinkKind) -> io::Result<()> {
    std::os::unix::fs::symlink(original, link)
}

#[cfg(windows)]
fn symlink(original: &Path, link: &Path, kind: LinkKind) -> io::Result<()> {
    match kind {
        LinkKind::File => std::os::windows::fs::symlink_file(original, link),
        LinkKind::Directory => std::os::windows::fs::symlink_dir(original, link),
    }
}
