//! Active-move navigation.

use crate::error::MoveTreeError;
use crate::symbol::MoveSymbol;
use crate::tree::{MoveTree, NodeId};

/// Tracks the active move of a [`MoveTree`].
///
/// The cursor starts at the initial position, where no ply is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCursor {
    active: NodeId,
}

impl MoveCursor {
    /// Cursor at the initial position of `tree`.
    pub fn new(tree: &MoveTree) -> Self {
        Self {
            active: tree.root(),
        }
    }

    /// The active node; the root when no move is active.
    pub fn active(&self) -> NodeId {
        self.active
    }

    /// Jump to `node`.
    pub fn goto(&mut self, tree: &MoveTree, node: NodeId) -> Result<(), MoveTreeError> {
        if !tree.contains(node) {
            return Err(MoveTreeError::UnknownNode(node));
        }
        self.active = node;
        Ok(())
    }

    /// Step to the main continuation. Returns `false` at the end of a line.
    pub fn forward(&mut self, tree: &MoveTree) -> Result<bool, MoveTreeError> {
        match tree.main_child(self.active)? {
            Some(next) => {
                self.active = next;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Step back one move. Returns `false` at the initial position.
    pub fn back(&mut self, tree: &MoveTree) -> Result<bool, MoveTreeError> {
        match tree.parent(self.active)? {
            Some(previous) => {
                self.active = previous;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Play `san` after the active move and make it active.
    pub fn play(&mut self, tree: &mut MoveTree, san: &str) -> Result<NodeId, MoveTreeError> {
        self.active = tree.add_move(self.active, san)?;
        Ok(self.active)
    }

    /// Remove the active move and its continuations; its parent becomes active.
    pub fn delete_active(&mut self, tree: &mut MoveTree) -> Result<(), MoveTreeError> {
        let parent = tree
            .parent(self.active)?
            .ok_or(MoveTreeError::RootHasNoMove)?;
        tree.truncate(self.active)?;
        self.active = parent;
        Ok(())
    }

    /// Predicate selecting the ply of the active move.
    pub fn is_active(&self) -> impl Fn(&MoveSymbol) -> bool + use<> {
        let active = self.active;
        move |symbol: &MoveSymbol| symbol.node() == Some(active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation() {
        let mut tree = MoveTree::new();
        let e4 = tree.add_move(tree.root(), "e4").unwrap();
        let e5 = tree.add_move(e4, "e5").unwrap();
        tree.add_move(e4, "c5").unwrap();

        let mut cursor = MoveCursor::new(&tree);
        assert!(!cursor.back(&tree).unwrap());
        assert!(cursor.forward(&tree).unwrap());
        assert!(cursor.forward(&tree).unwrap());
        assert_eq!(cursor.active(), e5);
        assert!(!cursor.forward(&tree).unwrap());
        assert!(cursor.back(&tree).unwrap());
        assert_eq!(cursor.active(), e4);
    }

    #[test]
    fn test_play_and_delete() {
        let mut tree = MoveTree::new();
        let mut cursor = MoveCursor::new(&tree);
        let e4 = cursor.play(&mut tree, "e4").unwrap();
        let e5 = cursor.play(&mut tree, "e5").unwrap();
        assert_eq!(cursor.active(), e5);

        cursor.delete_active(&mut tree).unwrap();
        assert_eq!(cursor.active(), e4);
        assert!(!tree.contains(e5));

        cursor.delete_active(&mut tree).unwrap();
        assert_eq!(cursor.active(), tree.root());
        assert!(matches!(
            cursor.delete_active(&mut tree),
            Err(MoveTreeError::RootHasNoMove)
        ));
    }

    #[test]
    fn test_predicate_matches_only_active_ply() {
        let mut tree = MoveTree::new();
        let mut cursor = MoveCursor::new(&tree);
        let e4 = cursor.play(&mut tree, "e4").unwrap();
        let is_active = cursor.is_active();

        assert!(is_active(&MoveSymbol::Ply {
            node: e4,
            san: "e4".to_string()
        }));
        assert!(!is_active(&MoveSymbol::Space));
        assert!(!MoveCursor::new(&tree).is_active()(&MoveSymbol::Ply {
            node: e4,
            san: "e4".to_string()
        }));
    }

    #[test]
    fn test_goto_unknown_node() {
        let mut tree = MoveTree::new();
        let e4 = tree.add_move(tree.root(), "e4").unwrap();
        tree.truncate(e4).unwrap();
        let mut cursor = MoveCursor::new(&tree);
        assert!(cursor.goto(&tree, e4).is_err());
    }
}
