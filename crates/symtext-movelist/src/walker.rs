//! Move-list rendering.
//!
//! [`MoveListWalker`] turns a [`MoveTree`] into a flat [`MoveSymbol`] sequence in the usual
//! annotated-game order: at each position the main move comes first, then every alternative as
//! a bracketed variation, then the continuation of the main move.
//!
//! ```text
//! 1. e4 e5 (1... c5 2. Nf3) 2. Nf3
//! ```
//!
//! Appending a move to the end of the main line only appends symbols, so a view reconciles it
//! as a pure suffix edit.

use crate::error::MoveTreeError;
use crate::symbol::MoveSymbol;
use crate::tree::{MoveTree, NodeId};
use symtext_core::SymbolProducer;

/// Layout options for [`MoveListWalker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveListOptions {
    /// Emit move numbers.
    pub move_numbers: bool,
    /// Render alternatives as bracketed variations; otherwise only the main line is shown.
    pub variation_brackets: bool,
}

impl Default for MoveListOptions {
    fn default() -> Self {
        Self {
            move_numbers: true,
            variation_brackets: true,
        }
    }
}

/// Move tree paired with its layout, usable as a symbol producer.
#[derive(Debug, Clone, Default)]
pub struct MoveListWalker {
    tree: MoveTree,
    options: MoveListOptions,
}

impl MoveListWalker {
    /// Render `tree` with default options.
    pub fn new(tree: MoveTree) -> Self {
        Self {
            tree,
            options: MoveListOptions::default(),
        }
    }

    /// Use custom layout options.
    pub fn with_options(mut self, options: MoveListOptions) -> Self {
        self.options = options;
        self
    }

    /// Layout options.
    pub fn options(&self) -> &MoveListOptions {
        &self.options
    }

    /// The rendered tree.
    pub fn tree(&self) -> &MoveTree {
        &self.tree
    }

    /// Mutable access to the tree; the next `produce` reflects the changes.
    pub fn tree_mut(&mut self) -> &mut MoveTree {
        &mut self.tree
    }

    /// Render the whole tree.
    pub fn symbols(&self) -> Result<Vec<MoveSymbol>, MoveTreeError> {
        let mut writer = SymbolWriter {
            tree: &self.tree,
            options: &self.options,
            symbols: Vec::new(),
            needs_space: false,
        };
        writer.line(self.tree.root(), false)?;
        Ok(writer.symbols)
    }
}

impl SymbolProducer for MoveListWalker {
    type Symbol = MoveSymbol;
    type Error = MoveTreeError;

    fn produce(&mut self) -> Result<Vec<MoveSymbol>, MoveTreeError> {
        self.symbols()
    }
}

struct SymbolWriter<'a> {
    tree: &'a MoveTree,
    options: &'a MoveListOptions,
    symbols: Vec<MoveSymbol>,
    needs_space: bool,
}

impl SymbolWriter<'_> {
    fn item(&mut self, symbol: MoveSymbol) {
        if self.needs_space {
            self.symbols.push(MoveSymbol::Space);
        }
        self.symbols.push(symbol);
        self.needs_space = true;
    }

    fn ply(&mut self, node: NodeId, force_number: bool) -> Result<(), MoveTreeError> {
        let ply = self.tree.ply(node)?;
        let black = ply % 2 == 0;
        if self.options.move_numbers && (!black || force_number) {
            self.item(MoveSymbol::MoveNumber {
                number: ply.div_ceil(2),
                black,
            });
        }
        let san = self.tree.san(node)?.to_string();
        self.item(MoveSymbol::Ply { node, san });
        Ok(())
    }

    /// Write every move after `from`, following main continuations.
    fn line(&mut self, from: NodeId, mut force_number: bool) -> Result<(), MoveTreeError> {
        let tree = self.tree;
        let mut current = from;
        loop {
            let children = tree.children(current)?;
            let Some((&main, alternatives)) = children.split_first() else {
                return Ok(());
            };

            self.ply(main, force_number)?;
            force_number = false;

            if self.options.variation_brackets {
                for &alternative in alternatives {
                    if self.needs_space {
                        self.symbols.push(MoveSymbol::Space);
                    }
                    self.symbols.push(MoveSymbol::VariationStart);
                    self.needs_space = false;

                    self.ply(alternative, true)?;
                    self.line(alternative, false)?;

                    self.symbols.push(MoveSymbol::VariationEnd);
                    self.needs_space = true;
                    force_number = true;
                }
            }

            current = main;
        }
    }
}
