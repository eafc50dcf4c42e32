//! Symbol producers.
//!
//! A producer turns some application model (a move tree, a parsed settings file) into the full,
//! ordered sequence of terminal symbols that should be displayed. Producers are expected to be
//! deterministic: when nothing relevant changed, a second call returns a sequence that is
//! element-wise equal to the first, which is what lets reconciliation skip the unchanged prefix.

use crate::symbol::TerminalSymbol;

/// A source of terminal symbol sequences.
pub trait SymbolProducer {
    /// The symbol type produced.
    type Symbol: TerminalSymbol;

    /// The error type returned by [`SymbolProducer::produce`].
    type Error;

    /// Compute the complete symbol sequence for the current model state.
    fn produce(&mut self) -> Result<Vec<Self::Symbol>, Self::Error>;
}

impl<P: SymbolProducer + ?Sized> SymbolProducer for &mut P {
    type Symbol = P::Symbol;
    type Error = P::Error;

    fn produce(&mut self) -> Result<Vec<Self::Symbol>, Self::Error> {
        (**self).produce()
    }
}
