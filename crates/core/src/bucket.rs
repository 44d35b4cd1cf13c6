//! Bucket trees: nested, insertion-ordered maps from path segments to
//! resolved values.

use crate::pass3_resolve::ResolvedValue;
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TokenNode {
    Leaf(ResolvedValue),
    Group(IndexMap<String, TokenNode>),
}

impl TokenNode {
    fn leaf_count(&self) -> usize {
        match self {
            TokenNode::Leaf(_) => 1,
            TokenNode::Group(children) => children.values().map(TokenNode::leaf_count).sum(),
        }
    }
}

/// The contents of one output file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TokenTree {
    root: IndexMap<String, TokenNode>,
}

impl TokenTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the leaf at `path`, creating groups along the way.
    ///
    /// A leaf found where a group is needed is replaced by a group, and a
    /// node found at the final segment is replaced by the leaf. Returns how
    /// many existing nodes were replaced. An empty path is ignored.
    pub fn insert(&mut self, path: &[String], value: ResolvedValue) -> usize {
        let Some((last, parents)) = path.split_last() else {
            return 0;
        };
        let mut replaced = 0;
        let mut cur = &mut self.root;
        for key in parents {
            let node = cur
                .entry(key.clone())
                .or_insert_with(|| TokenNode::Group(IndexMap::new()));
            if let TokenNode::Leaf(old) = node {
                tracing::debug!(key = %key, replaced = ?old, "replacing leaf with group");
                *node = TokenNode::Group(IndexMap::new());
                replaced += 1;
            }
            let TokenNode::Group(children) = node else {
                return replaced;
            };
            cur = children;
        }
        if cur.insert(last.clone(), TokenNode::Leaf(value)).is_some() {
            replaced += 1;
        }
        replaced
    }

    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<&TokenNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.root.get(first.as_ref())?;
        for key in rest {
            match node {
                TokenNode::Group(children) => node = children.get(key.as_ref())?,
                TokenNode::Leaf(_) => return None,
            }
        }
        Some(node)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Number of leaf values in the tree.
    pub fn leaf_count(&self) -> usize {
        self.root.values().map(TokenNode::leaf_count).sum()
    }
}

/// A named output artifact; maps 1:1 to `<name>.json`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub name: String,
    pub tree: TokenTree,
}

impl Bucket {
    pub fn file_name(&self) -> String {
        format!("{}.json", self.name)
    }
}
