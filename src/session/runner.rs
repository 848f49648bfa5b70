use std::collections::{HashMap, VecDeque};

use crate::core::models::{Card, CardResult};

/// Last-known correctness for a card within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pending,
    Correct,
    Incorrect,
}

/// Result of checking one typed answer, surfaced so the UI can show the
/// expected answer on a miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerCheck {
    pub correct: bool,
    pub expected: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// A card is shown and an answer is awaited.
    Presenting,
    /// An outcome was recorded for the current card; the queue is untouched
    /// until the learner advances.
    Feedback { correct: bool },
    Finished,
}

/// Drives one study or review pass over a fixed card batch until every card
/// has been answered correctly at least once.
///
/// The queue holds indices into the original batch. A correct answer retires
/// the head; an incorrect answer sends it to the tail, so a missed card
/// always comes back around. Everything here is transient session state and
/// is dropped with the screen that owns it.
pub struct SessionRunner {
    cards: Vec<Card>,
    queue: VecDeque<usize>,
    results: HashMap<u64, Outcome>,
    phase: SessionPhase,
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

impl SessionRunner {
    pub fn start(batch: Vec<Card>) -> Self {
        let queue: VecDeque<usize> = (0..batch.len()).collect();
        let results = batch.iter().map(|card| (card.id, Outcome::Pending)).collect();
        let phase = if queue.is_empty() { SessionPhase::Finished } else { SessionPhase::Presenting };

        Self { cards: batch, queue, results, phase }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == SessionPhase::Finished
    }

    pub fn current(&self) -> Option<&Card> {
        if self.phase == SessionPhase::Finished {
            return None;
        }
        self.queue.front().map(|&index| &self.cards[index])
    }

    /// Cards still in the queue, the current one included.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn total(&self) -> usize {
        self.cards.len()
    }

    /// Cards retired from the queue so far.
    pub fn completed(&self) -> usize {
        self.cards.len() - self.queue.len()
    }

    pub fn outcome(&self, card_id: u64) -> Option<Outcome> {
        self.results.get(&card_id).copied()
    }

    /// Check a typed answer against the current card and record the outcome.
    ///
    /// Returns `None` unless a card is being presented with no outcome yet
    /// recorded for it, which guards a double submit. The queue is not
    /// touched here; mutation waits for [`advance`](Self::advance) so the UI
    /// can show feedback first.
    pub fn submit_answer(&mut self, raw: &str) -> Option<AnswerCheck> {
        if self.phase != SessionPhase::Presenting {
            return None;
        }
        let index = *self.queue.front()?;
        let card = &self.cards[index];

        let expected = card.expected_answer().to_string();
        let correct = normalize(raw) == normalize(&expected);
        let outcome = if correct { Outcome::Correct } else { Outcome::Incorrect };

        self.results.insert(card.id, outcome);
        self.phase = SessionPhase::Feedback { correct };

        Some(AnswerCheck { correct, expected })
    }

    /// Apply the recorded outcome to the queue and move to the next card.
    ///
    /// A correct answer retires the head; an incorrect answer moves it to the
    /// tail. Returns the new current card, or `None` once the queue is empty
    /// and the session is finished. Only valid in the feedback phase.
    pub fn advance(&mut self) -> Option<&Card> {
        let correct = match self.phase {
            SessionPhase::Feedback { correct } => correct,
            _ => return None,
        };

        let index = self.queue.pop_front().expect("feedback phase implies a current card");
        if !correct {
            self.queue.push_back(index);
        }

        match self.queue.front() {
            None => {
                self.phase = SessionPhase::Finished;
                None
            }
            Some(&next) => {
                // A requeued card gets a fresh presentation.
                self.results.insert(self.cards[next].id, Outcome::Pending);
                self.phase = SessionPhase::Presenting;
                Some(&self.cards[next])
            }
        }
    }

    /// Summary payload for the reporting collaborator: one entry per
    /// original-batch card with a recorded outcome, in batch order. Cards
    /// never reached stay unreported.
    pub fn summary(&self) -> Vec<CardResult> {
        self.cards
            .iter()
            .filter_map(|card| match self.results.get(&card.id) {
                Some(Outcome::Correct) => Some(CardResult { card_id: card.id, correct: true }),
                Some(Outcome::Incorrect) => Some(CardResult { card_id: card.id, correct: false }),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: u64, back: &str) -> Card {
        Card {
            id,
            front: format!("front-{id}"),
            back: back.to_string(),
            mnemonic: None,
            template_name: None,
            status: None,
            due_at: None,
            srs_interval: None,
            srs_ease: None,
            reps: None,
            lapses: None,
            note: None,
        }
    }

    fn batch(backs: &[&str]) -> Vec<Card> {
        backs.iter().enumerate().map(|(i, back)| card(i as u64 + 1, back)).collect()
    }

    #[test]
    fn start_presents_first_card_with_full_queue() {
        let runner = SessionRunner::start(batch(&["a", "ka", "sa"]));
        assert_eq!(runner.remaining(), 3);
        assert_eq!(runner.total(), 3);
        assert_eq!(runner.current().map(|c| c.id), Some(1));
        assert_eq!(runner.phase(), SessionPhase::Presenting);
        assert_eq!(runner.outcome(1), Some(Outcome::Pending));
    }

    #[test]
    fn empty_batch_is_immediately_finished() {
        let runner = SessionRunner::start(Vec::new());
        assert!(runner.is_finished());
        assert_eq!(runner.current().map(|c| c.id), None);
        assert!(runner.summary().is_empty());
    }

    #[test]
    fn correct_answer_shrinks_queue_by_one() {
        let mut runner = SessionRunner::start(batch(&["a", "ka"]));
        let check = runner.submit_answer("a").unwrap();
        assert!(check.correct);
        assert_eq!(runner.remaining(), 2, "queue untouched until advance");

        runner.advance();
        assert_eq!(runner.remaining(), 1);
        assert_eq!(runner.current().map(|c| c.id), Some(2));
    }

    #[test]
    fn incorrect_answer_requeues_at_tail() {
        let mut runner = SessionRunner::start(batch(&["a", "ka", "sa"]));
        let check = runner.submit_answer("wrong").unwrap();
        assert!(!check.correct);
        assert_eq!(check.expected, "a");

        runner.advance();
        assert_eq!(runner.remaining(), 3, "length unchanged after a miss");
        assert_eq!(runner.current().map(|c| c.id), Some(2));

        // Work through the rest; the missed card must come back last.
        runner.submit_answer("ka").unwrap();
        runner.advance();
        runner.submit_answer("sa").unwrap();
        runner.advance();
        assert_eq!(runner.current().map(|c| c.id), Some(1));
    }

    #[test]
    fn double_submit_is_rejected() {
        let mut runner = SessionRunner::start(batch(&["a"]));
        assert!(runner.submit_answer("a").is_some());
        assert!(runner.submit_answer("a").is_none());
        assert_eq!(runner.phase(), SessionPhase::Feedback { correct: true });
    }

    #[test]
    fn submit_after_finish_is_rejected() {
        let mut runner = SessionRunner::start(batch(&["a"]));
        runner.submit_answer("a").unwrap();
        assert!(runner.advance().is_none());
        assert!(runner.is_finished());
        assert!(runner.submit_answer("a").is_none());
    }

    #[test]
    fn advance_outside_feedback_is_a_no_op() {
        let mut runner = SessionRunner::start(batch(&["a"]));
        assert!(runner.advance().is_none());
        assert_eq!(runner.remaining(), 1);
        assert_eq!(runner.phase(), SessionPhase::Presenting);
    }

    #[test]
    fn comparison_ignores_case_and_surrounding_whitespace() {
        for input in ["ka", " KA ", "ka ", "Ka"] {
            let mut runner = SessionRunner::start(vec![card(1, "Ka")]);
            let check = runner.submit_answer(input).unwrap();
            assert!(check.correct, "input {input:?} should match");
        }
    }

    #[test]
    fn no_other_normalization_is_applied() {
        let mut runner = SessionRunner::start(vec![card(1, "shi")]);
        assert!(!runner.submit_answer("si").unwrap().correct);
    }

    #[test]
    fn all_correct_run_finishes_after_batch_len_advances() {
        let backs = ["a", "ka", "sa", "ta"];
        let mut runner = SessionRunner::start(batch(&backs));
        let mut advances = 0;
        for back in backs {
            runner.submit_answer(back).unwrap();
            runner.advance();
            advances += 1;
        }
        assert!(runner.is_finished());
        assert_eq!(advances, backs.len());
        assert!(runner.summary().iter().all(|r| r.correct));
    }

    #[test]
    fn requeued_card_resets_to_pending_on_return() {
        let mut runner = SessionRunner::start(batch(&["a", "ka"]));
        runner.submit_answer("wrong").unwrap();
        runner.advance();
        assert_eq!(runner.outcome(1), Some(Outcome::Incorrect));

        runner.submit_answer("ka").unwrap();
        runner.advance();
        // Card 1 is current again and gets a fresh slot.
        assert_eq!(runner.current().map(|c| c.id), Some(1));
        assert_eq!(runner.outcome(1), Some(Outcome::Pending));
    }

    #[test]
    fn summary_keeps_only_last_outcome_per_card() {
        let mut runner = SessionRunner::start(batch(&["a", "ka"]));
        // Miss card 1, then clear everything.
        runner.submit_answer("wrong").unwrap();
        runner.advance();
        runner.submit_answer("ka").unwrap();
        runner.advance();
        runner.submit_answer("a").unwrap();
        runner.advance();

        assert!(runner.is_finished());
        assert_eq!(
            runner.summary(),
            vec![
                CardResult { card_id: 1, correct: true },
                CardResult { card_id: 2, correct: true },
            ]
        );
    }

    #[test]
    fn summary_omits_cards_never_reached() {
        let mut runner = SessionRunner::start(batch(&["a", "ka", "sa"]));
        runner.submit_answer("a").unwrap();
        runner.advance();
        // Session abandoned mid-way: only card 1 has an outcome; card 2 is
        // presenting (pending) and card 3 was never reached.
        assert_eq!(runner.summary(), vec![CardResult { card_id: 1, correct: true }]);
    }

    #[test]
    fn expected_answer_chain_flows_through_submit() {
        use crate::core::models::{FieldRef, FieldValue, Note};

        let mut with_field = card(1, "ah\nSomething else");
        with_field.note = Some(Note {
            field_values: vec![FieldValue {
                value_text: Some("a".to_string()),
                field: Some(FieldRef { name: "romaji".to_string() }),
                media_asset: None,
            }],
        });

        let mut runner = SessionRunner::start(vec![with_field]);
        assert!(runner.submit_answer("a").unwrap().correct);

        let mut runner = SessionRunner::start(vec![card(1, "a\nExample")]);
        assert!(runner.submit_answer("a").unwrap().correct);

        let mut runner = SessionRunner::start(vec![card(1, "ka")]);
        assert!(runner.submit_answer("ka").unwrap().correct);
    }

    #[test]
    fn two_card_session_walkthrough() {
        let mut runner = SessionRunner::start(batch(&["a\nExample", "ka"]));

        let check = runner.submit_answer("a").unwrap();
        assert!(check.correct);
        runner.advance();
        assert_eq!(runner.remaining(), 1);
        assert_eq!(runner.current().map(|c| c.id), Some(2));

        let check = runner.submit_answer("ki").unwrap();
        assert!(!check.correct);
        assert_eq!(check.expected, "ka");
        runner.advance();
        assert_eq!(runner.remaining(), 1, "requeued to the tail of a length-1 queue");
        assert_eq!(runner.current().map(|c| c.id), Some(2));

        let check = runner.submit_answer("ka").unwrap();
        assert!(check.correct);
        assert!(runner.advance().is_none());
        assert!(runner.is_finished());
        assert_eq!(
            runner.summary(),
            vec![
                CardResult { card_id: 1, correct: true },
                CardResult { card_id: 2, correct: true },
            ]
        );
    }
}
