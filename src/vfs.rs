use crate::error::ResolveError;
use std::collections::BTreeMap;

/// A node in the in-memory tree. Children are kept in a sorted map so
/// listings come out in name order without extra work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VfsNode {
    File {
        content: String,
    },
    Directory {
        children: BTreeMap<String, VfsNode>,
    },
}

impl VfsNode {
    pub fn file(content: impl Into<String>) -> Self {
        VfsNode::File { content: content.into() }
    }

    pub fn empty_dir() -> Self {
        VfsNode::Directory { children: BTreeMap::new() }
    }

    pub fn dir<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, VfsNode)>,
        S: Into<String>,
    {
        VfsNode::Directory {
            children: entries.into_iter().map(|(name, node)| (name.into(), node)).collect(),
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, VfsNode::Directory { .. })
    }

    pub fn children(&self) -> Option<&BTreeMap<String, VfsNode>> {
        match self {
            VfsNode::Directory { children } => Some(children),
            VfsNode::File { .. } => None,
        }
    }
}

/// The whole tree. Built once by the loader and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualFileSystem {
    root: VfsNode,
}

impl VirtualFileSystem {
    pub fn from_children(children: BTreeMap<String, VfsNode>) -> Self {
        Self { root: VfsNode::Directory { children } }
    }

    pub fn with_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, VfsNode)>,
        S: Into<String>,
    {
        Self { root: VfsNode::dir(entries) }
    }

    /// Walk already-split components from the root. Hitting a file before the
    /// last component is `NotADirectory`; a missing name is `NotFound`.
    pub fn lookup<'a, I>(&self, components: I) -> Result<&VfsNode, ResolveError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut node = &self.root;
        for comp in components {
            match node {
                VfsNode::Directory { children } => {
                    node = children.get(comp).ok_or(ResolveError::NotFound)?;
                }
                VfsNode::File { .. } => return Err(ResolveError::NotADirectory),
            }
        }
        Ok(node)
    }

    // absolute path, no . or .. handling - callers normalize first
    pub fn resolve_path(&self, path: &str) -> Result<&VfsNode, ResolveError> {
        self.lookup(path.split('/').filter(|c| !c.is_empty()))
    }

    // ls - returns just names, already sorted
    pub fn list_dir(&self, path: &str) -> Result<Vec<String>, ResolveError> {
        match self.resolve_path(path)? {
            VfsNode::Directory { children } => Ok(children.keys().cloned().collect()),
            VfsNode::File { .. } => Err(ResolveError::NotADirectory),
        }
    }

    #[cfg(test)]
    pub fn read_file(&self, path: &str) -> Option<&str> {
        match self.resolve_path(path) {
            Ok(VfsNode::File { content }) => Some(content),
            _ => None,
        }
    }
}
