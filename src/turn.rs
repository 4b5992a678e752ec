//! Turn ownership between the two symbols.

use crate::common::Symbol;

/// Fixed two-element turn sequence plus the index of whoever moves next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnCoordinator {
    order: [Symbol; 2],
    index: usize,
    local: Option<Symbol>,
}

impl TurnCoordinator {
    /// Sequence `[first, first.opponent()]`, starting at `first`.
    pub fn new(first: Symbol) -> Self {
        Self {
            order: [first, first.opponent()],
            index: 0,
            local: None,
        }
    }

    /// Mark which symbol this process plays; the other is remote.
    pub fn with_local(mut self, local: Symbol) -> Self {
        self.local = Some(local);
        self
    }

    /// Symbol whose turn it is.
    pub fn current(&self) -> Symbol {
        self.order[self.index]
    }

    /// Hand the turn to the other symbol and return it.
    pub fn advance(&mut self) -> Symbol {
        self.index = (self.index + 1) % 2;
        self.current()
    }

    /// Back to the first symbol of the sequence.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn order(&self) -> [Symbol; 2] {
        self.order
    }

    pub fn local(&self) -> Option<Symbol> {
        self.local
    }

    /// `true` when the current turn belongs to this process. Without a local
    /// symbol every turn is local.
    pub fn is_local_turn(&self) -> bool {
        self.local.map_or(true, |s| s == self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternates_indefinitely() {
        let mut turns = TurnCoordinator::new(Symbol::X);
        let mut seen = [Symbol::X; 10];
        for slot in seen.iter_mut() {
            *slot = turns.current();
            turns.advance();
        }
        for (i, s) in seen.iter().enumerate() {
            let expected = if i % 2 == 0 { Symbol::X } else { Symbol::O };
            assert_eq!(*s, expected);
        }
    }

    #[test]
    fn sequence_can_start_with_o() {
        let mut turns = TurnCoordinator::new(Symbol::O);
        assert_eq!(turns.order(), [Symbol::O, Symbol::X]);
        assert_eq!(turns.advance(), Symbol::X);
        turns.reset();
        assert_eq!(turns.current(), Symbol::O);
    }

    #[test]
    fn local_turn_tracking() {
        let mut turns = TurnCoordinator::new(Symbol::X).with_local(Symbol::O);
        assert!(!turns.is_local_turn());
        turns.advance();
        assert!(turns.is_local_turn());
        assert!(TurnCoordinator::new(Symbol::X).is_local_turn());
    }
}
