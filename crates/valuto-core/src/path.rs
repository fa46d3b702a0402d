//! Index paths from the tree root to a node.

use smallvec::SmallVec;
use std::fmt;

/// An index chain from the tree root: the first index selects a top-level node,
/// each following index selects a child of the previous node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(pub SmallVec<[usize; 8]>);

impl NodePath {
    /// The path of the tree itself.
    pub fn root() -> Self {
        Self(SmallVec::new())
    }

    /// Path of the `index`-th child of this path.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Nesting depth (0 for the tree, 1 for a top-level node).
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&[usize]> for NodePath {
    fn from(indices: &[usize]) -> Self {
        Self(indices.iter().copied().collect())
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("tree")?;
        for (depth, index) in self.0.iter().enumerate() {
            if depth == 0 {
                write!(f, "[{}]", index)?;
            } else {
                write!(f, ".children[{}]", index)?;
            }
        }
        Ok(())
    }
}
