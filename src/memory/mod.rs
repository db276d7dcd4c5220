//! Card-matching memory game
//!
//! - `deck` - cards, symbols and the shuffled board
//! - `engine` - the game state machine, scoring and star rating

mod deck;
mod engine;


pub use deck::{Card, SYMBOLS, TOTAL_PAIRS};
pub use engine::{calculate_stars, MemoryGame, MemoryResult, MemorySettings, MATCH_POINTS};
