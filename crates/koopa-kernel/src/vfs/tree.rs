//! Arena-backed filesystem tree.
//!
//! Nodes are stored in a slot vector and addressed by [`NodeId`]. Freed slots
//! are left empty; ids are never reused within one filesystem instance.

use std::collections::BTreeMap;

use super::node::{
    Contents, Directory, Executable, Node, NodeId, NodeKind, SEALED_PREFIX, TextFile,
};
use crate::loader::{EntrySpec, WorldSpec};
use crate::vault::{Vault, VaultError};

/// In-memory puzzle filesystem.
#[derive(Debug, Clone)]
pub struct Filesystem {
    nodes: Vec<Option<Node>>,
    root: NodeId,
}

impl Default for Filesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem {
    /// Create a filesystem holding only an empty, unnamed root directory.
    pub fn new() -> Self {
        let root = Node {
            name: String::new(),
            parent: None,
            kind: NodeKind::Directory(Directory::default()),
        };
        Self {
            nodes: vec![Some(root)],
            root: NodeId(0),
        }
    }

    /// Build the tree for a world, sealing every `enc_` text file under `vault`.
    pub fn from_world(world: &WorldSpec, vault: &Vault) -> Result<Self, VaultError> {
        let mut fs = Self::new();
        let root = fs.root;
        fs.populate(root, &world.root, vault)?;
        Ok(fs)
    }

    fn populate(
        &mut self,
        dir: NodeId,
        entries: &BTreeMap<String, EntrySpec>,
        vault: &Vault,
    ) -> Result<(), VaultError> {
        for (name, entry) in entries {
            match entry {
                EntrySpec::Directory(children) => {
                    let child = self.insert(dir, name, NodeKind::Directory(Directory::default()));
                    self.populate(child, children, vault)?;
                }
                EntrySpec::Text {
                    content,
                    permission,
                } => {
                    let contents = if name.starts_with(SEALED_PREFIX) {
                        Contents::Sealed(vault.seal(content)?)
                    } else {
                        Contents::Plain(content.clone())
                    };
                    let text = TextFile::new(contents, *permission);
                    self.insert(dir, name, NodeKind::TextFile(text));
                }
                EntrySpec::Executable { trigger, password } => {
                    let exe = Executable::new(*trigger, password.clone());
                    self.insert(dir, name, NodeKind::Executable(exe));
                }
            }
        }
        Ok(())
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrow a live node.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Owning directory of `id`.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::parent)
    }

    /// The directory payload of `id`, if it is a directory.
    pub fn directory(&self, id: NodeId) -> Option<&Directory> {
        match &self.get(id)?.kind {
            NodeKind::Directory(dir) => Some(dir),
            _ => None,
        }
    }

    fn directory_mut(&mut self, id: NodeId) -> Option<&mut Directory> {
        match &mut self.get_mut(id)?.kind {
            NodeKind::Directory(dir) => Some(dir),
            _ => None,
        }
    }

    /// Look up `name` among the children of `dir`.
    ///
    /// A miss, or a `dir` that is not a directory, is `None`.
    pub fn lookup(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        self.directory(dir)?.children.get(name).copied()
    }

    /// Child ids of `dir` in mapping order.
    pub fn children(&self, dir: NodeId) -> Option<Vec<NodeId>> {
        self.directory(dir)
            .map(|d| d.children.values().copied().collect())
    }

    /// Allocate a node named `name` under `dir`, replacing any same-named entry.
    pub(crate) fn insert(&mut self, dir: NodeId, name: &str, kind: NodeKind) -> NodeId {
        let id = self.alloc(name, kind);
        if let Some(displaced) = self.link(dir, id) {
            self.free(displaced);
        }
        id
    }

    fn alloc(&mut self, name: &str, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Node {
            name: name.to_string(),
            parent: None,
            kind,
        }));
        id
    }

    /// Insert `id` into `dir` under its own name and point its parent at `dir`.
    ///
    /// Returns the entry that previously held that name, if any. The displaced
    /// node is left allocated; callers decide whether to free it.
    fn link(&mut self, dir: NodeId, id: NodeId) -> Option<NodeId> {
        let name = self.get(id)?.name.clone();
        let displaced = self.directory_mut(dir)?.children.insert(name, id);
        if let Some(node) = self.get_mut(id) {
            node.parent = Some(dir);
        }
        displaced.filter(|&old| old != id)
    }

    /// Remove `id` from its parent's mapping. The node stays allocated.
    fn unlink(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        let (name, parent) = (node.name.clone(), node.parent);
        if let Some(dir) = parent {
            if let Some(dir) = self.directory_mut(dir) {
                if dir.children.get(&name) == Some(&id) {
                    dir.children.remove(&name);
                }
            }
        }
        if let Some(node) = self.get_mut(id) {
            node.parent = None;
        }
    }

    /// Release `id` and everything below it.
    fn free(&mut self, id: NodeId) {
        if let Some(children) = self.children(id) {
            for child in children {
                self.free(child);
            }
        }
        if let Some(slot) = self.nodes.get_mut(id.0) {
            *slot = None;
        }
    }

    /// Detach `id` from its parent and free its subtree.
    pub(crate) fn remove(&mut self, id: NodeId) {
        self.unlink(id);
        self.free(id);
    }

    /// Move `src` under `dest`, keeping its name.
    ///
    /// A same-named entry already in `dest` is displaced and returned still
    /// allocated, so the caller can inspect it before calling [`Self::discard`].
    pub(crate) fn relocate(&mut self, src: NodeId, dest: NodeId) -> Option<NodeId> {
        self.unlink(src);
        self.link(dest, src)
    }

    /// Free a node previously displaced by [`Self::relocate`].
    pub(crate) fn discard(&mut self, id: NodeId) {
        self.free(id);
    }

    /// Swap `old` for a fresh leaf named `name` in the same parent.
    ///
    /// The old node ceases to exist. Returns the id of the replacement and,
    /// like [`Self::relocate`], any other entry already holding `name`, still
    /// allocated for the caller to [`Self::discard`].
    pub(crate) fn replace(
        &mut self,
        old: NodeId,
        name: &str,
        kind: NodeKind,
    ) -> Option<(NodeId, Option<NodeId>)> {
        let parent = self.parent(old)?;
        self.remove(old);
        let id = self.alloc(name, kind);
        let displaced = self.link(parent, id);
        Some((id, displaced))
    }

    /// Every live node with its id, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|node| (NodeId(i), node)))
    }

    /// True if `ancestor` is `id` itself or lies on its path to the root.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Absolute display path: names from the root joined with `/`.
    pub fn display_path(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let Some(node) = self.get(node_id) else {
                break;
            };
            if node.parent.is_some() {
                names.push(node.name.as_str());
            }
            current = node.parent;
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
