use std::{
    sync::{mpsc, Arc},
    thread,
};

use eframe::egui;

use super::TaskResult;
use crate::{
    core::models::CardResult,
    session::SessionKind,
    source::CardSource,
};

/// Runs CardSource calls on worker threads and funnels their results back to
/// the UI loop over a channel. Every spawn takes an egui context clone so the
/// frame showing the result is painted promptly.
pub struct TaskManager {
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
}

impl TaskManager {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { receiver, sender }
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    fn spawn<F>(&self, ctx: &egui::Context, job: F)
    where
        F: FnOnce() -> TaskResult + Send + 'static,
    {
        let sender = self.sender.clone();
        let ctx = ctx.clone();

        thread::spawn(move || {
            let _ = sender.send(job());
            ctx.request_repaint();
        });
    }

    pub fn probe_source(&self, source: Arc<dyn CardSource>, ctx: &egui::Context) {
        self.spawn(ctx, move || TaskResult::SourceProbe(source.probe()));
    }

    pub fn fetch_decks(&self, source: Arc<dyn CardSource>, ctx: &egui::Context) {
        self.spawn(ctx, move || {
            TaskResult::DeckList(source.decks().map_err(|e| e.to_string()))
        });
    }

    pub fn fetch_session_batch(
        &self,
        source: Arc<dyn CardSource>,
        deck_id: u64,
        kind: SessionKind,
        limit: usize,
        ctx: &egui::Context,
    ) {
        self.spawn(ctx, move || {
            let result = match kind {
                SessionKind::Study => source.study_batch(deck_id, limit),
                SessionKind::Review => source.due_cards(deck_id, limit),
            };
            TaskResult::SessionBatch { deck_id, kind, result: result.map_err(|e| e.to_string()) }
        });
    }

    pub fn report_review(
        &self,
        source: Arc<dyn CardSource>,
        card_id: u64,
        correct: bool,
        ctx: &egui::Context,
    ) {
        self.spawn(ctx, move || TaskResult::ReviewReported {
            card_id,
            result: source.submit_review(card_id, correct).map_err(|e| e.to_string()),
        });
    }

    pub fn report_summary(
        &self,
        source: Arc<dyn CardSource>,
        deck_id: u64,
        results: Vec<CardResult>,
        ctx: &egui::Context,
    ) {
        self.spawn(ctx, move || TaskResult::SummaryReported {
            deck_id,
            result: source.submit_summary(deck_id, &results).map_err(|e| e.to_string()),
        });
    }
}

impl Default for TaskManager {
    fn default() -> Self {
        Self::new()
    }
}
