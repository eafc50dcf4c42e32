//! Move-list symbols.

use crate::tree::NodeId;
use std::borrow::Cow;
use symtext_core::TerminalSymbol;

/// One terminal symbol of a rendered move list.
///
/// Two plies are equal only if they name the same tree node, so replaying a position that was
/// reached through another line never aliases an existing element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveSymbol {
    /// `12.` before a white move, `12...` before a black move that opens a line.
    MoveNumber {
        /// Full-move number, starting at 1.
        number: usize,
        /// The numbered move is black's.
        black: bool,
    },
    /// A half-move.
    Ply {
        /// Tree node of the move.
        node: NodeId,
        /// Move text as supplied to the tree.
        san: String,
    },
    /// Separator between items.
    Space,
    /// Opening bracket of a variation.
    VariationStart,
    /// Closing bracket of a variation.
    VariationEnd,
}

impl MoveSymbol {
    /// The tree node of a ply, `None` for every other symbol.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            MoveSymbol::Ply { node, .. } => Some(*node),
            _ => None,
        }
    }
}

impl TerminalSymbol for MoveSymbol {
    fn text(&self) -> Cow<'_, str> {
        match self {
            MoveSymbol::MoveNumber {
                number,
                black: false,
            } => Cow::Owned(format!("{number}.")),
            MoveSymbol::MoveNumber {
                number,
                black: true,
            } => Cow::Owned(format!("{number}...")),
            MoveSymbol::Ply { san, .. } => Cow::Borrowed(san),
            MoveSymbol::Space => Cow::Borrowed(" "),
            MoveSymbol::VariationStart => Cow::Borrowed("("),
            MoveSymbol::VariationEnd => Cow::Borrowed(")"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_text() {
        assert_eq!(
            MoveSymbol::MoveNumber {
                number: 3,
                black: false
            }
            .text(),
            "3."
        );
        assert_eq!(
            MoveSymbol::MoveNumber {
                number: 3,
                black: true
            }
            .text(),
            "3..."
        );
        assert_eq!(MoveSymbol::VariationStart.text(), "(");
        assert_eq!(MoveSymbol::Space.node(), None);
    }
}
