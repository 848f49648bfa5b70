pub mod mock;
pub mod remote;

pub use mock::MockSource;
pub use remote::RemoteSource;

use crate::core::{
    models::{Card, CardResult, DeckSummary, ReviewAck},
    KanaflashError,
};

/// Where cards come from and where outcomes go. The session runner and the
/// GUI only ever see this capability, so swapping the remote service for the
/// built-in fixture decks (or a test double) is a construction-time choice.
///
/// All methods block; callers run them on worker threads.
pub trait CardSource: Send + Sync {
    /// Short human-readable name for the status bar.
    fn label(&self) -> &str;

    /// Cheap liveness check for the connection indicator.
    fn probe(&self) -> bool;

    /// Decks available to study, with their due counts.
    fn decks(&self) -> Result<Vec<DeckSummary>, KanaflashError>;

    /// New cards for a study session, in deck order.
    fn study_batch(&self, deck_id: u64, limit: usize) -> Result<Vec<Card>, KanaflashError>;

    /// Cards due for review, due time ascending.
    fn due_cards(&self, deck_id: u64, limit: usize) -> Result<Vec<Card>, KanaflashError>;

    /// Report a single answered card. Best-effort; callers log failures.
    fn submit_review(&self, card_id: u64, correct: bool) -> Result<ReviewAck, KanaflashError>;

    /// Report a finished study session. Returns the count of updated
    /// records. Best-effort; callers log failures.
    fn submit_summary(
        &self,
        deck_id: u64,
        results: &[CardResult],
    ) -> Result<u32, KanaflashError>;
}
