use indexmap::IndexMap;

/// A declarative description of a package skeleton, staged in memory before it is
/// written to disk.
///
/// Entries of a [`FileTreeNode::Directory`] keep their insertion order, which is
/// also the order they are written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileTreeNode {
    /// A file and its contents, written verbatim.
    Leaf(String),
    /// A directory mapping entry names to nested nodes.
    Directory(IndexMap<String, FileTreeNode>),
}
impl FileTreeNode {
    pub fn directory() -> Self {
        Self::Directory(IndexMap::new())
    }

    /// Adds an entry to a directory node, returning `self` so trees can be built inline.
    ///
    /// Inserting into a [`FileTreeNode::Leaf`] is a no-op. Reusing a name replaces the
    /// previous entry in place.
    pub fn with(mut self, name: impl Into<String>, node: FileTreeNode) -> Self {
        if let Self::Directory(entries) = &mut self {
            entries.insert(name.into(), node);
        }

        self
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory(_))
    }

    /// Looks up a node by a `/` separated relative path.
    #[cfg(test)]
    pub fn get(&self, path: &str) -> Option<&FileTreeNode> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |node, segment| match node {
                Self::Directory(entries) => entries.get(segment),
                Self::Leaf(_) => None,
            })
    }

    /// Contents of the leaf at `path`, if there is one.
    #[cfg(test)]
    pub fn contents(&self, path: &str) -> Option<&str> {
        match self.get(path)? {
            Self::Leaf(content) => Some(content),
            Self::Directory(_) => None,
        }
    }
}
