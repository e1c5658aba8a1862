//! Node types for the puzzle filesystem.
//!
//! Every node lives in the [`Filesystem`](super::Filesystem) arena and is
//! addressed by a [`NodeId`]. Ownership runs parent → child through the
//! directory mappings; the `parent` field is a plain index back-reference.

use std::collections::BTreeMap;

/// Prefix marking a leaf whose contents are sealed until unlocked.
pub const SEALED_PREFIX: &str = "enc_";

/// Suffix every executable name carries.
pub const EXECUTABLE_SUFFIX: &str = ".exe";

/// Handle to a node in the filesystem arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// A single node: name, back-reference, and one of the three kinds.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) kind: NodeKind,
}

impl Node {
    /// Name of this node within its parent (empty for the root).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owning directory, `None` for the root or a detached node.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory(_))
    }

    /// The text file payload, if this is a text file.
    pub fn as_text(&self) -> Option<&TextFile> {
        match &self.kind {
            NodeKind::TextFile(text) => Some(text),
            _ => None,
        }
    }

    /// The executable payload, if this is an executable.
    pub fn as_executable(&self) -> Option<&Executable> {
        match &self.kind {
            NodeKind::Executable(exe) => Some(exe),
            _ => None,
        }
    }
}

/// The closed set of node kinds.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Directory(Directory),
    TextFile(TextFile),
    Executable(Executable),
}

/// Internal node: a name → child mapping.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    pub(crate) children: BTreeMap<String, NodeId>,
}

impl Directory {
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Child names in mapping order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }
}

/// Text file contents, either readable or sealed under the filesystem key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contents {
    Plain(String),
    /// Hex of `nonce || ciphertext`.
    Sealed(String),
}

impl Contents {
    /// What `rd` shows: plaintext, or the raw sealed hex.
    pub fn as_display(&self) -> &str {
        match self {
            Contents::Plain(text) | Contents::Sealed(text) => text,
        }
    }

    pub fn is_sealed(&self) -> bool {
        matches!(self, Contents::Sealed(_))
    }
}

/// Leaf holding text gated by a permission level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFile {
    pub(crate) contents: Contents,
    pub(crate) permission: u32,
}

impl TextFile {
    pub fn new(contents: Contents, permission: u32) -> Self {
        Self {
            contents,
            permission,
        }
    }

    pub fn plain(text: impl Into<String>, permission: u32) -> Self {
        Self::new(Contents::Plain(text.into()), permission)
    }

    pub fn contents(&self) -> &Contents {
        &self.contents
    }

    /// Minimum session level needed to read this file (0 = always).
    pub fn permission(&self) -> u32 {
        self.permission
    }
}

/// Puzzle behaviour attached to an executable when the world is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// `DecryptPass.exe`: unlock the passwords vault.
    DecryptVault,
    /// `Findings<N>.exe`: consume `findings<N>.txt`, unlock findings N, then self-delete.
    Findings(u32),
}

impl Trigger {
    /// Derive the trigger from an executable's full name (suffix included).
    ///
    /// Returns `None` when the name is not one the puzzle logic knows.
    pub fn from_executable_name(name: &str) -> Option<Self> {
        let stem = name.strip_suffix(EXECUTABLE_SUFFIX)?;
        if stem == "DecryptPass" {
            return Some(Trigger::DecryptVault);
        }
        let digits = stem.strip_prefix("Findings")?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(Trigger::Findings)
    }
}

/// Leaf whose invocation fires a [`Trigger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executable {
    pub(crate) trigger: Trigger,
    pub(crate) password: Option<String>,
}

impl Executable {
    pub fn new(trigger: Trigger, password: Option<String>) -> Self {
        Self { trigger, password }
    }

    pub fn trigger(&self) -> Trigger {
        self.trigger
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }
}

/// Whether `name` may appear as a directory entry.
///
/// Rejects the empty name, `.` and `..`, and anything containing `/` or whitespace.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.chars().any(char::is_whitespace)
}
