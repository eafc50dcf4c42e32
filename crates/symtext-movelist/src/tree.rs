//! Move tree
//!
//! An arena of plies with a main line and side variations. Moves are opaque SAN strings supplied
//! by the caller; no chess rules are checked here.
//!
//! Node ids are never reused, so a ply symbol built from a [`NodeId`] stays equal across
//! producer runs for as long as the node exists. The price is that [`MoveTree::truncate`] only
//! marks nodes dead: the arena keeps one slot per move ever played, which is small for a game
//! record but never shrinks.

use crate::error::MoveTreeError;

/// Identifier of a node in a [`MoveTree`]. The root (initial position) has no move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Node {
    san: String,
    parent: Option<NodeId>,
    /// `children[0]` is the main continuation.
    children: Vec<NodeId>,
    ply: usize,
    alive: bool,
}

/// A tree of moves with variations.
#[derive(Debug, Clone)]
pub struct MoveTree {
    nodes: Vec<Node>,
}

impl Default for MoveTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveTree {
    /// Create a tree holding only the initial position.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                san: String::new(),
                parent: None,
                children: Vec::new(),
                ply: 0,
                alive: true,
            }],
        }
    }

    /// The initial position.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns `true` if `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.get(id.0).is_some_and(|node| node.alive)
    }

    fn node(&self, id: NodeId) -> Result<&Node, MoveTreeError> {
        self.nodes
            .get(id.0)
            .filter(|node| node.alive)
            .ok_or(MoveTreeError::UnknownNode(id))
    }

    /// Play `san` after `parent`.
    ///
    /// If `parent` already has a child with the same move, that child is returned; otherwise the
    /// move becomes a new variation (or the main continuation if `parent` has no children).
    pub fn add_move(&mut self, parent: NodeId, san: &str) -> Result<NodeId, MoveTreeError> {
        if san.is_empty() {
            return Err(MoveTreeError::EmptyMove);
        }
        let parent_node = self.node(parent)?;
        if let Some(existing) = parent_node
            .children
            .iter()
            .copied()
            .find(|child| self.nodes[child.0].san == san)
        {
            return Ok(existing);
        }

        let id = NodeId(self.nodes.len());
        let ply = parent_node.ply + 1;
        self.nodes.push(Node {
            san: san.to_string(),
            parent: Some(parent),
            children: Vec::new(),
            ply,
            alive: true,
        });
        self.nodes[parent.0].children.push(id);
        tracing::trace!(%id, %parent, san, "added move");
        Ok(id)
    }

    /// Play a sequence of moves after `parent`; returns the last node (or `parent` if empty).
    pub fn add_line<'a, I>(&mut self, parent: NodeId, moves: I) -> Result<NodeId, MoveTreeError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut current = parent;
        for san in moves {
            current = self.add_move(current, san)?;
        }
        Ok(current)
    }

    /// The move played to reach `id` (empty for the root).
    pub fn san(&self, id: NodeId) -> Result<&str, MoveTreeError> {
        self.node(id).map(|node| node.san.as_str())
    }

    /// Number of half-moves from the initial position.
    pub fn ply(&self, id: NodeId) -> Result<usize, MoveTreeError> {
        self.node(id).map(|node| node.ply)
    }

    /// The parent of `id` (`None` for the root).
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, MoveTreeError> {
        self.node(id).map(|node| node.parent)
    }

    /// Children of `id`; the first one is the main continuation.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId], MoveTreeError> {
        self.node(id).map(|node| node.children.as_slice())
    }

    /// The main continuation of `id`, if any.
    pub fn main_child(&self, id: NodeId) -> Result<Option<NodeId>, MoveTreeError> {
        self.children(id).map(|children| children.first().copied())
    }

    /// Follow main continuations from `from` (exclusive) to the end of the line.
    pub fn main_line(&self, from: NodeId) -> Result<Vec<NodeId>, MoveTreeError> {
        let mut line = Vec::new();
        let mut current = from;
        while let Some(next) = self.main_child(current)? {
            line.push(next);
            current = next;
        }
        Ok(line)
    }

    /// Make `id` the main continuation of its parent.
    pub fn promote(&mut self, id: NodeId) -> Result<(), MoveTreeError> {
        let parent = self.parent(id)?.ok_or(MoveTreeError::RootHasNoMove)?;
        let siblings = &mut self.nodes[parent.0].children;
        if let Some(position) = siblings.iter().position(|&child| child == id) {
            let promoted = siblings.remove(position);
            siblings.insert(0, promoted);
        }
        Ok(())
    }

    /// Remove `id` and everything after it.
    pub fn truncate(&mut self, id: NodeId) -> Result<(), MoveTreeError> {
        let parent = self.parent(id)?.ok_or(MoveTreeError::RootHasNoMove)?;
        self.nodes[parent.0].children.retain(|&child| child != id);

        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            let node = &mut self.nodes[next.0];
            node.alive = false;
            pending.append(&mut node.children);
        }
        tracing::trace!(%id, "truncated line");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_moves_and_variations() {
        let mut tree = MoveTree::new();
        let e4 = tree.add_move(tree.root(), "e4").unwrap();
        let e5 = tree.add_move(e4, "e5").unwrap();
        let c5 = tree.add_move(e4, "c5").unwrap();

        assert_eq!(tree.children(e4).unwrap(), &[e5, c5]);
        assert_eq!(tree.main_child(e4).unwrap(), Some(e5));
        assert_eq!(tree.ply(c5).unwrap(), 2);
        assert_eq!(tree.parent(c5).unwrap(), Some(e4));
        assert_eq!(tree.san(c5).unwrap(), "c5");

        // Replaying an existing move returns the same node.
        assert_eq!(tree.add_move(e4, "c5").unwrap(), c5);
    }

    #[test]
    fn test_promote() {
        let mut tree = MoveTree::new();
        let e4 = tree.add_move(tree.root(), "e4").unwrap();
        let e5 = tree.add_move(e4, "e5").unwrap();
        let c5 = tree.add_move(e4, "c5").unwrap();
        tree.promote(c5).unwrap();
        assert_eq!(tree.children(e4).unwrap(), &[c5, e5]);
        assert!(matches!(
            tree.promote(tree.root()),
            Err(MoveTreeError::RootHasNoMove)
        ));
    }

    #[test]
    fn test_truncate_removes_descendants() {
        let mut tree = MoveTree::new();
        let last = tree.add_line(tree.root(), ["e4", "e5", "Nf3", "Nc6"]).unwrap();
        let e4 = tree.main_child(tree.root()).unwrap().unwrap();
        let e5 = tree.main_child(e4).unwrap().unwrap();

        tree.truncate(e5).unwrap();
        assert!(!tree.contains(e5));
        assert!(!tree.contains(last));
        assert!(tree.children(e4).unwrap().is_empty());
        assert!(matches!(
            tree.san(last),
            Err(MoveTreeError::UnknownNode(id)) if id == last
        ));

        // Ids are not reused; dead slots stay in the arena.
        let d5 = tree.add_move(e4, "d5").unwrap();
        assert_ne!(d5, e5);
        assert_eq!(d5.index(), 5);
        assert_eq!(tree.main_line(tree.root()).unwrap(), vec![e4, d5]);
    }

    #[test]
    fn test_empty_move_rejected() {
        let mut tree = MoveTree::new();
        assert!(matches!(
            tree.add_move(tree.root(), ""),
            Err(MoveTreeError::EmptyMove)
        ));
    }
}
