use crate::{
    core::models::{Card, DeckSummary, ReviewAck},
    session::SessionKind,
};

/// Results sent back from worker threads, drained once per frame by the app.
#[derive(Debug)]
pub enum TaskResult {
    SourceProbe(bool),
    DeckList(Result<Vec<DeckSummary>, String>),
    SessionBatch { deck_id: u64, kind: SessionKind, result: Result<Vec<Card>, String> },
    ReviewReported { card_id: u64, result: Result<ReviewAck, String> },
    SummaryReported { deck_id: u64, result: Result<u32, String> },
}
