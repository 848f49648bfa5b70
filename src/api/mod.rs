use std::time::Duration;

use futures::future::join_all;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::task;

use crate::core::{
    models::{Card, CardResult, Deck, DeckSummary, ReviewAck},
    KanaflashError,
};

#[derive(Debug, Deserialize)]
struct StudyBatch {
    #[serde(default)]
    cards: Vec<Card>,
}

#[derive(Debug, Serialize)]
struct ReviewSubmit {
    correct: bool,
}

#[derive(Debug, Serialize)]
struct StudySubmit {
    deck_id: u64,
    results: Vec<CardResult>,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    updated: u32,
}

/// Async client for the study-tracking API. One instance per configured
/// base URL; cheap to clone for concurrent per-deck requests.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, KanaflashError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| KanaflashError::Custom(format!("HTTP client build failed: {e}")))?;

        Ok(Self { base_url: base_url.trim_end_matches('/').to_string(), token, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, KanaflashError> {
        let status = response.status();
        if !status.is_success() {
            let url = response.url().to_string();
            let body = response.text().await.unwrap_or_default();
            return Err(KanaflashError::Api { status: status.as_u16(), url, body });
        }
        Ok(response.json().await?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, KanaflashError> {
        let response = self.authorize(self.http.get(self.url(path)).query(query)).send().await?;
        Self::read_json(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, KanaflashError> {
        let response = self.authorize(self.http.post(self.url(path)).json(body)).send().await?;
        Self::read_json(response).await
    }

    pub async fn decks(&self) -> Result<Vec<Deck>, KanaflashError> {
        self.get_json("/decks", &[]).await
    }

    /// New cards for a study session, in deck order.
    pub async fn study_batch(
        &self,
        deck_id: u64,
        limit: usize,
    ) -> Result<Vec<Card>, KanaflashError> {
        let batch: StudyBatch = self
            .get_json(&format!("/decks/{deck_id}/study"), &[("limit", limit.to_string())])
            .await?;
        Ok(batch.cards)
    }

    /// Cards due for review, due time ascending.
    pub async fn due_cards(&self, deck_id: u64, limit: usize) -> Result<Vec<Card>, KanaflashError> {
        self.get_json(
            &format!("/decks/{deck_id}/reviews"),
            &[("due_only", "true".to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    pub async fn submit_review(
        &self,
        card_id: u64,
        correct: bool,
    ) -> Result<ReviewAck, KanaflashError> {
        self.post_json(&format!("/cards/{card_id}/review"), &ReviewSubmit { correct }).await
    }

    /// Report a finished study session. Returns the server's count of
    /// updated records.
    pub async fn submit_summary(
        &self,
        deck_id: u64,
        results: Vec<CardResult>,
    ) -> Result<u32, KanaflashError> {
        let response: SummaryResponse =
            self.post_json("/study/submit", &StudySubmit { deck_id, results }).await?;
        Ok(response.updated)
    }

    /// Deck list with per-deck due counts. Counts are fetched concurrently
    /// and a failed count degrades to zero rather than failing the list.
    pub async fn deck_summaries(&self, due_limit: usize) -> Result<Vec<DeckSummary>, KanaflashError> {
        let decks = self.decks().await?;

        let handles: Vec<_> = decks
            .into_iter()
            .map(|deck| {
                let client = self.clone();
                task::spawn(async move {
                    let due_count = match client.due_cards(deck.id, due_limit).await {
                        Ok(cards) => cards.len(),
                        Err(err) => {
                            eprintln!("Due count fetch failed for deck {}: {}", deck.slug, err);
                            0
                        }
                    };
                    DeckSummary { deck, due_count }
                })
            })
            .collect();

        let summaries =
            join_all(handles).await.into_iter().filter_map(|result| result.ok()).collect();
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn study_batch_parses_wrapped_cards() {
        let json = r#"{"cards": [{"id": 1, "front": "あ", "back": "a"}]}"#;
        let batch: StudyBatch = serde_json::from_str(json).unwrap();
        assert_eq!(batch.cards.len(), 1);
        assert_eq!(batch.cards[0].front, "あ");
    }

    #[test]
    fn study_submit_serializes_results() {
        let payload = StudySubmit {
            deck_id: 7,
            results: vec![CardResult { card_id: 1, correct: true }],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["deck_id"], 7);
        assert_eq!(json["results"][0]["card_id"], 1);
        assert_eq!(json["results"][0]["correct"], true);
    }

    #[test]
    fn review_ack_parses_server_fields() {
        let json = r#"{
            "card_id": 3, "status": "review", "due_at": "2026-08-08T12:00:00Z",
            "srs_interval": 4, "srs_ease": 2.5, "reps": 2, "lapses": 0
        }"#;
        let ack: ReviewAck = serde_json::from_str(json).unwrap();
        assert_eq!(ack.card_id, 3);
        assert_eq!(ack.status, "review");
        assert_eq!(ack.srs_interval, Some(4));
    }

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:8000/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/decks"), "http://localhost:8000/decks");
    }
}
