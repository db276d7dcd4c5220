//! Cards and deck construction for the memory game.

use rand::Rng;

use crate::shuffle::fisher_yates;

/// Symbols on the card faces; each appears on exactly two cards
pub const SYMBOLS: [&str; 8] = ["🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼"];

/// Number of pairs on a full board
pub const TOTAL_PAIRS: usize = SYMBOLS.len();

/// A single card on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub symbol: &'static str,
    pub flipped: bool,
    pub matched: bool,
    /// Unique within one deck
    pub id: u32,
}

impl Card {
    fn new(symbol: &'static str, id: u32) -> Self {
        Self {
            symbol,
            flipped: false,
            matched: false,
            id,
        }
    }

    /// Symbol if the card is showing, `None` if it is face down.
    /// Matched cards always show.
    pub fn face(&self) -> Option<&'static str> {
        if self.flipped || self.matched {
            Some(self.symbol)
        } else {
            None
        }
    }
}

/// Build two cards per symbol and shuffle them into a board layout
pub fn shuffled_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let mut cards: Vec<Card> = SYMBOLS
        .iter()
        .flat_map(|&symbol| [symbol, symbol])
        .enumerate()
        .map(|(id, symbol)| Card::new(symbol, id as u32))
        .collect();
    fisher_yates(&mut cards, rng);
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_every_symbol_twice() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let deck = shuffled_deck(&mut rng);
            assert_eq!(deck.len(), TOTAL_PAIRS * 2);

            let mut counts: HashMap<&str, usize> = HashMap::new();
            for card in &deck {
                *counts.entry(card.symbol).or_default() += 1;
            }
            assert_eq!(counts.len(), TOTAL_PAIRS);
            assert!(counts.values().all(|&n| n == 2));
        }
    }

    #[test]
    fn test_ids_unique_and_face_down() {
        let deck = shuffled_deck(&mut StdRng::seed_from_u64(5));
        let ids: HashSet<u32> = deck.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), deck.len());
        assert!(deck.iter().all(|c| c.face().is_none()));
    }

    #[test]
    fn test_matched_card_shows_face() {
        let mut card = Card::new("🐶", 0);
        card.matched = true;
        assert_eq!(card.face(), Some("🐶"));
    }
}
