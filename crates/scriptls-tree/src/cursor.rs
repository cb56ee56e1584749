//! A structural zipper over a parse tree.
//!
//! The cursor's position is a path of child indices from the root, so
//! `clone` is a cheap snapshot and `parent`/`child`/`ancestor` are plain
//! index-vector operations. [`TreeCursor`] only knows about tree shape; a
//! document-level cursor that also understands symbol and reference tables
//! wraps this one (see the `scriptls-document` crate).

use crate::node::Node;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct TreeCursor {
    root: Arc<Node>,
    path: Vec<usize>,
}

impl TreeCursor {
    pub fn new(root: Arc<Node>) -> Self {
        Self { root, path: Vec::new() }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The node currently under the cursor.
    pub fn current(&self) -> &Node {
        let mut node = self.root.as_ref();
        for &idx in &self.path {
            node = &node.children()[idx];
        }
        node
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Descend into the `i`th child, if it exists.
    pub fn child(&mut self, i: usize) -> bool {
        if i < self.current().children().len() {
            self.path.push(i);
            true
        } else {
            false
        }
    }

    /// Move up to the parent, if not already at the root.
    pub fn parent(&mut self) -> bool {
        self.path.pop().is_some()
    }

    /// Descend into the first child matching `pred`.
    pub fn nth_child(&mut self, pred: impl Fn(&Node) -> bool) -> bool {
        let idx = self.current().children().iter().position(|n| pred(n));
        match idx {
            Some(i) => {
                self.path.push(i);
                true
            }
            None => false,
        }
    }

    /// Move up to the nearest ancestor matching `pred`, leaving the cursor
    /// unmoved if none matches.
    pub fn ancestor(&mut self, pred: impl Fn(&Node) -> bool) -> bool {
        let mut probe = self.path.clone();
        while !probe.is_empty() {
            probe.pop();
            let node = node_at(&self.root, &probe);
            if pred(node) {
                self.path = probe;
                return true;
            }
        }
        false
    }

    /// Navigate to the token at, or immediately before, `offset`. Walks
    /// down the tree always choosing the last child whose span starts at
    /// or before `offset`, landing on a leaf.
    pub fn position(&mut self, offset: usize) {
        self.path.clear();
        loop {
            let node = self.current();
            let children = node.children();
            if children.is_empty() {
                return;
            }
            let mut chosen = 0;
            for (i, child) in children.iter().enumerate() {
                if child.span().start <= offset {
                    chosen = i;
                } else {
                    break;
                }
            }
            self.path.push(chosen);
        }
    }

    /// All ancestors of the current node, root first, current node
    /// excluded.
    pub fn spine(&self) -> Vec<&Node> {
        let mut spine = Vec::with_capacity(self.path.len());
        let mut node = self.root.as_ref();
        spine.push(node);
        for &idx in &self.path[..self.path.len().saturating_sub(1)] {
            node = &node.children()[idx];
            spine.push(node);
        }
        spine
    }
}

fn node_at<'a>(root: &'a Node, path: &[usize]) -> &'a Node {
    let mut node = root;
    for &idx in path {
        node = &node.children()[idx];
    }
    node
}
