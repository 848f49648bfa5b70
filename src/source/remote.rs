use tokio::runtime::Runtime;

use super::CardSource;
use crate::{
    api::ApiClient,
    core::{
        models::{Card, CardResult, DeckSummary, ReviewAck},
        KanaflashError,
    },
};

/// How many due cards to count per deck for the deck list screen.
const DUE_COUNT_LIMIT: usize = 100;

/// CardSource backed by the remote study-tracking API. Owns a tokio runtime
/// and drives the async client to completion on whichever worker thread the
/// call lands on.
pub struct RemoteSource {
    api: ApiClient,
    runtime: Runtime,
}

impl RemoteSource {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, KanaflashError> {
        let api = ApiClient::new(base_url, token)?;
        let runtime = Runtime::new()
            .map_err(|e| KanaflashError::Custom(format!("Tokio runtime build failed: {e}")))?;
        Ok(Self { api, runtime })
    }
}

impl CardSource for RemoteSource {
    fn label(&self) -> &str {
        self.api.base_url()
    }

    fn probe(&self) -> bool {
        self.runtime.block_on(self.api.decks()).is_ok()
    }

    fn decks(&self) -> Result<Vec<DeckSummary>, KanaflashError> {
        self.runtime.block_on(self.api.deck_summaries(DUE_COUNT_LIMIT))
    }

    fn study_batch(&self, deck_id: u64, limit: usize) -> Result<Vec<Card>, KanaflashError> {
        self.runtime.block_on(self.api.study_batch(deck_id, limit))
    }

    fn due_cards(&self, deck_id: u64, limit: usize) -> Result<Vec<Card>, KanaflashError> {
        self.runtime.block_on(self.api.due_cards(deck_id, limit))
    }

    fn submit_review(&self, card_id: u64, correct: bool) -> Result<ReviewAck, KanaflashError> {
        self.runtime.block_on(self.api.submit_review(card_id, correct))
    }

    fn submit_summary(
        &self,
        deck_id: u64,
        results: &[CardResult],
    ) -> Result<u32, KanaflashError> {
        self.runtime.block_on(self.api.submit_summary(deck_id, results.to_vec()))
    }
}
