use rand::seq::SliceRandom;
use wana_kana::ConvertJapanese;

use super::CardSource;
use crate::core::{
    models::{Card, CardResult, Deck, DeckSummary, FieldRef, FieldValue, Note, ReviewAck},
    KanaflashError,
};

const HIRAGANA: &str =
    "あいうえおかきくけこさしすせそたちつてとなにぬねのはひふへほまみむめもやゆよらりるれろわをん";
const KATAKANA: &str =
    "アイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワヲン";

/// Mnemonics for the vowel row, matching the seeded decks. The rest of the
/// kana ship without one, which exercises the details panel's absent case.
const VOWEL_MNEMONICS: [&str; 5] = [
    "Looks like an apple with a leaf on top.",
    "Two short strokes, like the letter i twice.",
    "A sideways u with a flourish.",
    "An exotic e drawn in one motion.",
    "An o with an extra loop.",
];

struct MockDeck {
    deck: Deck,
    cards: Vec<Card>,
}

/// In-process CardSource with the two seeded kana decks. Fixture state is
/// instance state, never a process-wide singleton, so tests and the offline
/// mode construct their own copies.
pub struct MockSource {
    decks: Vec<MockDeck>,
}

fn kana_card(deck_id: u64, index: usize, script: &str, symbol: char) -> Card {
    let id = deck_id * 100 + index as u64 + 1;
    let romaji = symbol.to_string().to_romaji();
    let mnemonic = (index < VOWEL_MNEMONICS.len()).then(|| VOWEL_MNEMONICS[index].to_string());

    Card {
        id,
        front: symbol.to_string(),
        back: format!("{romaji}\nThe {script} character {symbol} is read \"{romaji}\"."),
        mnemonic,
        template_name: Some("Recognition".to_string()),
        status: Some("new".to_string()),
        due_at: None,
        srs_interval: None,
        srs_ease: None,
        reps: None,
        lapses: None,
        note: Some(Note {
            field_values: vec![FieldValue {
                value_text: Some(romaji),
                field: Some(FieldRef { name: "romaji".to_string() }),
                media_asset: None,
            }],
        }),
    }
}

fn kana_deck(id: u64, slug: &str, name: &str, script: &str, symbols: &str) -> MockDeck {
    let cards = symbols
        .chars()
        .enumerate()
        .map(|(index, symbol)| kana_card(id, index, script, symbol))
        .collect();

    MockDeck {
        deck: Deck {
            id,
            slug: slug.to_string(),
            name: name.to_string(),
            description: Some(format!("The 46 basic {script} characters.")),
        },
        cards,
    }
}

impl MockSource {
    pub fn new() -> Self {
        Self {
            decks: vec![
                kana_deck(1, "hiragana", "Hiragana", "hiragana", HIRAGANA),
                kana_deck(2, "katakana", "Katakana", "katakana", KATAKANA),
            ],
        }
    }

    fn deck(&self, deck_id: u64) -> Result<&MockDeck, KanaflashError> {
        self.decks
            .iter()
            .find(|d| d.deck.id == deck_id)
            .ok_or_else(|| KanaflashError::DeckNotFound(deck_id.to_string()))
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CardSource for MockSource {
    fn label(&self) -> &str {
        "built-in decks"
    }

    fn probe(&self) -> bool {
        true
    }

    fn decks(&self) -> Result<Vec<DeckSummary>, KanaflashError> {
        Ok(self
            .decks
            .iter()
            .map(|d| DeckSummary { deck: d.deck.clone(), due_count: d.cards.len() })
            .collect())
    }

    fn study_batch(&self, deck_id: u64, limit: usize) -> Result<Vec<Card>, KanaflashError> {
        let deck = self.deck(deck_id)?;
        Ok(deck.cards.iter().take(limit).cloned().collect())
    }

    fn due_cards(&self, deck_id: u64, limit: usize) -> Result<Vec<Card>, KanaflashError> {
        let deck = self.deck(deck_id)?;
        // No due times here; sample the deck so repeated review sessions do
        // not replay the identical head slice.
        let mut cards = deck.cards.clone();
        cards.shuffle(&mut rand::rng());
        cards.truncate(limit);
        Ok(cards)
    }

    fn submit_review(&self, card_id: u64, _correct: bool) -> Result<ReviewAck, KanaflashError> {
        Ok(ReviewAck {
            card_id,
            status: "review".to_string(),
            stage: None,
            due_at: None,
            srs_interval: None,
            srs_ease: None,
            reps: None,
            lapses: None,
        })
    }

    fn submit_summary(
        &self,
        _deck_id: u64,
        results: &[CardResult],
    ) -> Result<u32, KanaflashError> {
        Ok(results.len() as u32)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn serves_both_kana_decks() {
        let source = MockSource::new();
        let decks = source.decks().unwrap();
        assert_eq!(decks.len(), 2);
        assert_eq!(decks[0].deck.slug, "hiragana");
        assert_eq!(decks[1].deck.slug, "katakana");
        assert_eq!(decks[0].due_count, 46);
    }

    #[test]
    fn study_batch_respects_limit_and_order() {
        let source = MockSource::new();
        let cards = source.study_batch(1, 5).unwrap();
        assert_eq!(cards.len(), 5);
        let fronts: Vec<&str> = cards.iter().map(|c| c.front.as_str()).collect();
        assert_eq!(fronts, vec!["あ", "い", "う", "え", "お"]);
    }

    #[test]
    fn romaji_answers_are_derived_from_the_symbol() {
        let source = MockSource::new();
        let cards = source.study_batch(1, 46).unwrap();
        let expect = |front: &str| {
            cards.iter().find(|c| c.front == front).unwrap().expected_answer().to_string()
        };
        assert_eq!(expect("あ"), "a");
        assert_eq!(expect("し"), "shi");
        assert_eq!(expect("つ"), "tsu");
        assert_eq!(expect("ふ"), "fu");
        assert_eq!(expect("ん"), "n");
    }

    #[test]
    fn card_ids_are_unique_across_decks() {
        let source = MockSource::new();
        let mut ids = HashSet::new();
        for deck_id in [1, 2] {
            for card in source.study_batch(deck_id, 46).unwrap() {
                assert!(ids.insert(card.id), "duplicate card id {}", card.id);
            }
        }
        assert_eq!(ids.len(), 92);
    }

    #[test]
    fn due_cards_are_a_bounded_sample() {
        let source = MockSource::new();
        let cards = source.due_cards(2, 10).unwrap();
        assert_eq!(cards.len(), 10);
        let ids: HashSet<u64> = cards.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn unknown_deck_is_an_error() {
        let source = MockSource::new();
        assert!(matches!(
            source.study_batch(99, 5),
            Err(KanaflashError::DeckNotFound(_))
        ));
    }

    #[test]
    fn summary_acknowledges_every_result() {
        let source = MockSource::new();
        let results = vec![
            CardResult { card_id: 101, correct: true },
            CardResult { card_id: 102, correct: false },
        ];
        assert_eq!(source.submit_summary(1, &results).unwrap(), 2);
    }
}
