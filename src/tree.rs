use std::borrow::Cow;
use std::fmt;

use tracing::{debug, instrument};

use crate::label::ItemText;
use crate::render::Printer;

/// A node of an ordered, append-only tree.
///
/// Each node owns its children exclusively. Attaching a subtree moves it into
/// the parent, so a node can never end up beneath itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree<T> {
    /// Label payload, rendered through [`ItemText`]
    item: T,
    /// Children in display order
    children: Vec<Tree<T>>,
}

impl<T: ItemText> Tree<T> {
    pub fn new(item: T) -> Self {
        Self {
            item,
            children: Vec::new(),
        }
    }

    /// Appends a new leaf holding `item` and returns it, so deeper levels can
    /// be built by chaining.
    #[instrument(level = "trace", skip(self, item))]
    pub fn add(&mut self, item: T) -> &mut Tree<T> {
        self.children.push(Tree::new(item));
        let idx = self.children.len() - 1;
        &mut self.children[idx]
    }

    /// Appends an already built subtree as the last child.
    #[instrument(level = "trace", skip(self, tree))]
    pub fn add_tree(&mut self, tree: Tree<T>) {
        self.children.push(tree);
    }

    /// Builder variant of [`Tree::add_tree`] for several children at once.
    pub fn with_leaves(mut self, leaves: impl IntoIterator<Item = impl Into<Tree<T>>>) -> Self {
        self.children.extend(leaves.into_iter().map(Into::into));
        self
    }

    pub fn item(&self) -> &T {
        &self.item
    }

    /// Display text of this node's label.
    pub fn text(&self) -> Cow<'_, str> {
        self.item.item_text()
    }

    pub fn items(&self) -> &[Tree<T>] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this tree, root included.
    #[allow(clippy::len_without_is_empty)]
    #[instrument(level = "trace", skip(self))]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Number of levels; a single node has depth 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 1)]; // (node, depth)

        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for child in &node.children {
                stack.push((child, depth + 1));
            }
        }

        max_depth
    }

    /// Collects the label text of all leaves, left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<String> {
        let leaves: Vec<String> = self
            .iter()
            .filter(|node| node.is_leaf())
            .map(|node| node.text().into_owned())
            .collect();
        debug!("leaves: {}", leaves.len());
        leaves
    }

    /// Total number of label lines, which is the number of lines `print` emits.
    pub fn line_count(&self) -> usize {
        self.iter().map(|node| node.text().split('\n').count()).sum()
    }

    /// Pre-order traversal: root first, children left to right.
    pub fn iter(&self) -> TreeIterator<'_, T> {
        TreeIterator::new(self)
    }

    /// Renders the tree with the default box-drawing glyphs.
    pub fn print(&self) -> String {
        Printer::default().print(self)
    }
}

// Unlinks descendants onto a heap stack so dropping a deep chain does not
// recurse once per level.
impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

impl<T: ItemText> From<T> for Tree<T> {
    fn from(item: T) -> Self {
        Tree::new(item)
    }
}

impl<T: ItemText> fmt::Display for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.print())
    }
}

impl<'a, T: ItemText> IntoIterator for &'a Tree<T> {
    type Item = &'a Tree<T>;
    type IntoIter = TreeIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct TreeIterator<'a, T> {
    stack: Vec<&'a Tree<T>>,
}

impl<'a, T> TreeIterator<'a, T> {
    fn new(root: &'a Tree<T>) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a, T> Iterator for TreeIterator<'a, T> {
    type Item = &'a Tree<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        self.stack.extend(current.children.iter().rev());
        Some(current)
    }
}
