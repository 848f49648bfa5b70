use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::markup;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    pub id: u64,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A deck plus the card counts shown on the deck list screen. The due count
/// comes from a separate reviews query per deck; the server owns due-ness.
#[derive(Debug, Clone)]
pub struct DeckSummary {
    pub deck: Deck,
    pub due_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FieldRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MediaAsset {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FieldValue {
    #[serde(default)]
    pub value_text: Option<String>,
    #[serde(default)]
    pub field: Option<FieldRef>,
    #[serde(default)]
    pub media_asset: Option<MediaAsset>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Note {
    #[serde(default)]
    pub field_values: Vec<FieldValue>,
}

/// One rendered flashcard as served by the study API. The SRS bookkeeping
/// fields are carried for display only; this client never computes with them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: u64,
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub mnemonic: Option<String>,
    #[serde(default)]
    pub template_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub srs_interval: Option<i64>,
    #[serde(default)]
    pub srs_ease: Option<f64>,
    #[serde(default)]
    pub reps: Option<u32>,
    #[serde(default)]
    pub lapses: Option<u32>,
    #[serde(default)]
    pub note: Option<Note>,
}

impl Card {
    fn field_value(&self, name: &str) -> Option<&FieldValue> {
        self.note.as_ref()?.field_values.iter().find(|fv| {
            fv.field.as_ref().map(|f| f.name.as_str()) == Some(name)
        })
    }

    /// The explicit answer field (a supplied transliteration), if present
    /// and non-empty.
    pub fn answer_field(&self) -> Option<&str> {
        self.field_value("romaji")
            .and_then(|fv| fv.value_text.as_deref())
            .filter(|text| !text.trim().is_empty())
    }

    /// What the learner is expected to type: the explicit answer field if
    /// supplied, otherwise the first line of the back, otherwise the whole
    /// back. The fallback is compared as-is, markup included.
    pub fn expected_answer(&self) -> &str {
        match self.answer_field() {
            Some(romaji) => romaji,
            None => markup::first_line(&self.back),
        }
    }

    /// Audio asset for this card, preferring the uploaded media URL over a
    /// raw URL stored in the field text.
    pub fn audio_url(&self) -> Option<&str> {
        let fv = self.field_value("audio")?;
        fv.media_asset
            .as_ref()
            .and_then(|asset| asset.url.as_deref())
            .or(fv.value_text.as_deref())
            .filter(|url| !url.is_empty())
    }
}

/// Summary payload element reported at the end of a study session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardResult {
    pub card_id: u64,
    pub correct: bool,
}

/// Server acknowledgement of a single review. Informational only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewAck {
    pub card_id: u64,
    pub status: String,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub srs_interval: Option<i64>,
    #[serde(default)]
    pub srs_ease: Option<f64>,
    #[serde(default)]
    pub reps: Option<u32>,
    #[serde(default)]
    pub lapses: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_with_fields(back: &str, fields: Vec<(&str, Option<&str>, Option<&str>)>) -> Card {
        let field_values = fields
            .into_iter()
            .map(|(name, text, media)| FieldValue {
                value_text: text.map(str::to_string),
                field: Some(FieldRef { name: name.to_string() }),
                media_asset: media.map(|url| MediaAsset { url: Some(url.to_string()) }),
            })
            .collect();

        Card {
            id: 1,
            front: "あ".to_string(),
            back: back.to_string(),
            mnemonic: None,
            template_name: None,
            status: None,
            due_at: None,
            srs_interval: None,
            srs_ease: None,
            reps: None,
            lapses: None,
            note: Some(Note { field_values }),
        }
    }

    #[test]
    fn explicit_answer_field_wins() {
        let card = card_with_fields("ah\nExample", vec![("romaji", Some("a"), None)]);
        assert_eq!(card.expected_answer(), "a");
    }

    #[test]
    fn blank_answer_field_falls_back_to_first_line() {
        let card = card_with_fields("a\nExample sentence", vec![("romaji", Some("   "), None)]);
        assert_eq!(card.expected_answer(), "a");
    }

    #[test]
    fn back_without_line_break_used_whole() {
        let card = card_with_fields("ka", vec![]);
        assert_eq!(card.expected_answer(), "ka");
    }

    #[test]
    fn audio_prefers_media_asset_url() {
        let card = card_with_fields(
            "a",
            vec![("audio", Some("legacy.mp3"), Some("https://cdn.example/a.mp3"))],
        );
        assert_eq!(card.audio_url(), Some("https://cdn.example/a.mp3"));
    }

    #[test]
    fn audio_falls_back_to_field_text() {
        let card = card_with_fields("a", vec![("audio", Some("https://cdn.example/b.mp3"), None)]);
        assert_eq!(card.audio_url(), Some("https://cdn.example/b.mp3"));
    }

    #[test]
    fn deserializes_api_card() {
        let json = r#"{
            "id": 12,
            "note_id": 7,
            "card_template_id": 3,
            "front": "ア",
            "back": "a\nKatakana A",
            "mnemonic": "Looks like an axe.",
            "status": "new",
            "due_at": null,
            "note": {
                "field_values": [
                    {"value_text": "a", "field": {"name": "romaji"}},
                    {"value_text": null, "field": {"name": "audio"},
                     "media_asset": {"url": "https://cdn.example/ka.mp3"}}
                ]
            }
        }"#;

        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.id, 12);
        assert_eq!(card.expected_answer(), "a");
        assert_eq!(card.audio_url(), Some("https://cdn.example/ka.mp3"));
        assert_eq!(card.mnemonic.as_deref(), Some("Looks like an axe."));
    }
}
