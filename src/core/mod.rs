pub mod errors;
pub mod markup;
pub mod models;
pub mod tasks;

pub use errors::KanaflashError;
pub use models::{Card, CardResult, Deck, DeckSummary, ReviewAck};
