//! Path resolution.
//!
//! Paths are resolved one segment at a time against a starting node. koopa
//! deliberately swaps the usual meaning of the dot segments:
//!
//! | Segment | Resolves to |
//! |---------|-------------|
//! | `""` before a `/` | the root (absolute anchor) |
//! | `""` as the whole path | the starting node |
//! | `.` | the parent of the starting node ("previous directory") |
//! | `..` | the starting node itself ("current directory") |
//! | anything else | the child of that name |
//!
//! The root's parent is taken to be the root, so `.` never escapes the tree.

use super::{Filesystem, NodeId};

impl Filesystem {
    /// Resolve `path` starting at `from`.
    ///
    /// Returns `None` as soon as a segment names a child that does not exist.
    pub fn locate(&self, path: &str, from: NodeId) -> Option<NodeId> {
        let (head, rest) = match path.split_once('/') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };

        let node = match head {
            "" if rest.is_some() => self.root(),
            "" => from,
            "." => self.parent(from).unwrap_or(self.root()),
            ".." => from,
            name => self.lookup(from, name)?,
        };

        match rest {
            Some(rest) => self.locate(rest, node),
            None => Some(node),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::vfs::{Directory, Filesystem, NodeId, NodeKind, TextFile};
    use rstest::{fixture, rstest};

    struct Tree {
        fs: Filesystem,
        a: NodeId,
        b: NodeId,
        file: NodeId,
    }

    /// `/a/b/file.txt`
    #[fixture]
    fn tree() -> Tree {
        let mut fs = Filesystem::new();
        let dir = || NodeKind::Directory(Directory::default());
        let a = fs.insert(fs.root(), "a", dir());
        let b = fs.insert(a, "b", dir());
        let file = fs.insert(b, "file.txt", NodeKind::TextFile(TextFile::plain("x", 0)));
        Tree { fs, a, b, file }
    }

    #[rstest]
    fn absolute_paths_ignore_cwd(tree: Tree) {
        for from in [tree.fs.root(), tree.a, tree.b] {
            assert_eq!(tree.fs.locate("/a", from), Some(tree.a));
            assert_eq!(tree.fs.locate("/a/b", from), Some(tree.b));
            assert_eq!(tree.fs.locate("/a/b/file.txt", from), Some(tree.file));
        }
    }

    #[rstest]
    fn slash_is_root(tree: Tree) {
        assert_eq!(tree.fs.locate("/", tree.b), Some(tree.fs.root()));
    }

    #[rstest]
    fn empty_path_is_self(tree: Tree) {
        assert_eq!(tree.fs.locate("", tree.b), Some(tree.b));
    }

    #[rstest]
    fn dot_is_parent(tree: Tree) {
        assert_eq!(tree.fs.locate(".", tree.b), Some(tree.a));
        assert_eq!(tree.fs.locate(".", tree.a), Some(tree.fs.root()));
    }

    #[rstest]
    fn dot_at_root_stays_at_root(tree: Tree) {
        let root = tree.fs.root();
        assert_eq!(tree.fs.locate(".", root), Some(root));
        assert_eq!(tree.fs.locate("./././a", root), Some(tree.a));
    }

    #[rstest]
    fn dotdot_is_self(tree: Tree) {
        assert_eq!(tree.fs.locate("..", tree.b), Some(tree.b));
        assert_eq!(tree.fs.locate("../file.txt", tree.b), Some(tree.file));
        assert_eq!(tree.fs.locate("..", tree.fs.root()), Some(tree.fs.root()));
    }

    #[rstest]
    fn relative_paths(tree: Tree) {
        assert_eq!(tree.fs.locate("b/file.txt", tree.a), Some(tree.file));
        assert_eq!(tree.fs.locate("./b", tree.b), Some(tree.b));
    }

    #[rstest]
    fn trailing_slash_resolves_directory(tree: Tree) {
        assert_eq!(tree.fs.locate("/a/b/", tree.fs.root()), Some(tree.b));
    }

    #[rstest]
    #[case::missing_child("/nope")]
    #[case::missing_nested("/a/nope/file.txt")]
    #[case::through_file("/a/b/file.txt/deeper")]
    #[case::relative_miss("b")]
    fn misses_short_circuit(tree: Tree, #[case] path: &str) {
        assert_eq!(tree.fs.locate(path, tree.fs.root()), None);
    }
}
