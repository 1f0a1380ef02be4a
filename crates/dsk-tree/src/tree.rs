//! Tree discovery by filesystem walking.
//!
//! Discovery happens in two phases. The walk collects every directory below
//! the root and turns each into an unlinked [`Node`]; linking then attaches
//! every node to the node of its parent directory. Nothing is cached: each
//! call walks the filesystem again.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Result, TreeError};
use crate::guard;
use crate::node::Node;

/// A rooted tree of nodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Tree {
    root: Node,
}

impl Tree {
    /// The node whose path equals the walked root.
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// All nodes in pre-order, root first.
    #[must_use]
    pub fn nodes(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        collect(&self.root, &mut out);
        out
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes().len()
    }

    /// A tree always contains at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Look up a node by URL.
    #[must_use]
    pub fn find(&self, url: &str) -> Option<&Node> {
        self.nodes().into_iter().find(|n| n.url() == url)
    }
}

fn collect<'a>(node: &'a Node, out: &mut Vec<&'a Node>) {
    out.push(node);
    for child in node.children() {
        collect(child, out);
    }
}

/// Walks a catalogue root and builds its node tree.
///
/// # Example
///
/// ```no_run
/// use dsk_tree::TreeBuilder;
///
/// let tree = TreeBuilder::new("/catalog").skip_hidden(true).build()?;
/// for node in tree.nodes() {
///     println!("{}: {}", node.url(), node.title());
/// }
/// # Ok::<(), dsk_tree::TreeError>(())
/// ```
#[derive(Clone, Debug)]
pub struct TreeBuilder {
    root: PathBuf,
    skip_hidden: bool,
}

impl TreeBuilder {
    /// Create a builder for `root`. The root is normalized lexically.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: guard::normalize(root.as_ref()),
            skip_hidden: false,
        }
    }

    /// Skip directories whose name starts with `.`, together with their subtree.
    #[must_use]
    pub fn skip_hidden(mut self, skip: bool) -> Self {
        self.skip_hidden = skip;
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the root and build the linked tree.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Walk`] if any part of the walk fails; no partial
    /// tree is returned.
    pub fn build(&self) -> Result<Tree> {
        let nodes = self.scan()?;
        let root = self.link(nodes)?;
        Ok(Tree { root })
    }

    /// Walk the root and return every node, each with its children linked.
    ///
    /// Order is pre-order but callers should not depend on it.
    ///
    /// # Errors
    ///
    /// See [`TreeBuilder::build`].
    pub fn list(&self) -> Result<Vec<Node>> {
        let tree = self.build()?;
        Ok(tree.nodes().into_iter().cloned().collect())
    }

    /// Walk the root and return unlinked nodes, one per directory.
    ///
    /// Directories that cannot be turned into a node are logged and skipped.
    ///
    /// # Errors
    ///
    /// See [`TreeBuilder::build`].
    pub fn scan(&self) -> Result<Vec<Node>> {
        let dirs = self.walk()?;
        Ok(self.nodes_from(dirs))
    }

    /// Direct children of `node`, unlinked, in file name order.
    ///
    /// Reads only the node's own directory, with the same rules as the full
    /// walk: symlinks are not followed, hidden directories are skipped when
    /// configured and unrepresentable directories are ghosted.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Walk`] if the node's directory cannot be read.
    pub fn children_of(&self, node: &Node) -> Result<Vec<Node>> {
        let dirs = self.subdirs(node.path())?;
        Ok(self.nodes_from(dirs))
    }

    fn nodes_from(&self, dirs: Vec<PathBuf>) -> Vec<Node> {
        let mut nodes = Vec::with_capacity(dirs.len());
        for dir in dirs {
            match Node::from_path(dir, &self.root) {
                Ok(node) => nodes.push(node),
                Err(e) => tracing::warn!(error = %e, "ghosting node"),
            }
        }
        nodes
    }

    /// Collect all directory paths below (and including) the root.
    fn walk(&self) -> Result<Vec<PathBuf>> {
        let meta = fs::metadata(&self.root).map_err(|e| self.walk_error(&self.root, e))?;
        if !meta.is_dir() {
            return Err(self.walk_error(&self.root, io::ErrorKind::NotADirectory.into()));
        }

        let mut dirs = Vec::new();
        self.walk_dir(self.root.clone(), &mut dirs)?;
        Ok(dirs)
    }

    fn walk_dir(&self, dir: PathBuf, dirs: &mut Vec<PathBuf>) -> Result<()> {
        let subdirs = self.subdirs(&dir)?;
        dirs.push(dir);
        for sub in subdirs {
            self.walk_dir(sub, dirs)?;
        }
        Ok(())
    }

    /// Subdirectories of `dir` sorted by file name.
    fn subdirs(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = fs::read_dir(dir)
            .and_then(|read_dir| read_dir.collect::<io::Result<Vec<_>>>())
            .map_err(|e| self.walk_error(dir, e))?;
        entries.sort_by_key(fs::DirEntry::file_name);

        let mut subdirs = Vec::new();
        for entry in entries {
            let file_type = entry
                .file_type()
                .map_err(|e| self.walk_error(&entry.path(), e))?;
            // Symlinks report their own type here, so they are never followed.
            if !file_type.is_dir() {
                continue;
            }
            if self.skip_hidden && entry.file_name().as_encoded_bytes().starts_with(b".") {
                continue;
            }
            subdirs.push(entry.path());
        }
        Ok(subdirs)
    }

    fn walk_error(&self, at: &Path, source: io::Error) -> TreeError {
        tracing::warn!(
            path = %at.display(),
            root = %self.root.display(),
            error = %source,
            "Directory walk failed"
        );
        TreeError::Walk {
            root: self.root.clone(),
            source,
        }
    }

    /// Attach every node to its parent directory's node and return the root.
    fn link(&self, nodes: Vec<Node>) -> Result<Node> {
        let index: HashMap<&Path, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.path(), i))
            .collect();

        let root_idx = index
            .get(self.root.as_path())
            .copied()
            .ok_or_else(|| TreeError::InvalidNode {
                path: self.root.clone(),
                reason: "root directory could not be turned into a node",
            })?;

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        for (i, node) in nodes.iter().enumerate() {
            if i == root_idx {
                continue;
            }
            match node.path().parent().and_then(|p| index.get(p)) {
                Some(&parent) => children[parent].push(i),
                // Only happens below a ghosted directory.
                None => tracing::debug!(url = node.url(), "dropping node without parent"),
            }
        }
        drop(index);

        let mut slots: Vec<Option<Node>> = nodes.into_iter().map(Some).collect();
        Ok(assemble(root_idx, &mut slots, &children))
    }
}

fn assemble(idx: usize, slots: &mut [Option<Node>], children: &[Vec<usize>]) -> Node {
    let mut node = slots[idx].take().unwrap_or_else(|| unreachable!("node linked twice"));
    node.children = children[idx]
        .iter()
        .map(|&child| assemble(child, slots, children))
        .collect();
    node
}
