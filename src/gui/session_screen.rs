use eframe::egui;

use crate::{
    core::{
        markup,
        models::{Card, CardResult, Deck},
    },
    gui::theme::Theme,
    session::{AnswerCheck, SessionKind, SessionRunner},
};

pub enum SessionState {
    Loading,
    /// The batch fetch failed; retryable without any session state to undo.
    Failed(String),
    Active(ActiveSession),
}

pub struct ActiveSession {
    runner: SessionRunner,
    input: String,
    feedback: Option<AnswerCheck>,
    show_details: bool,
    needs_focus: bool,
    summary_sent: bool,
    summary_status: Option<String>,
}

impl ActiveSession {
    fn new(runner: SessionRunner) -> Self {
        Self {
            runner,
            input: String::new(),
            feedback: None,
            show_details: false,
            needs_focus: true,
            summary_sent: false,
            summary_status: None,
        }
    }
}

pub enum SessionAction {
    Retry,
    BackToDecks,
    Restart,
    /// A review-session answer to report immediately.
    ReviewAnswered { card_id: u64, correct: bool },
    /// A finished study session's results to report once.
    ReportSummary(Vec<CardResult>),
    PlayAudio(String),
}

pub struct SessionScreen {
    pub deck: Deck,
    pub kind: SessionKind,
    pub state: SessionState,
}

impl SessionScreen {
    pub fn new(deck: Deck, kind: SessionKind) -> Self {
        Self { deck, kind, state: SessionState::Loading }
    }

    pub fn batch_loaded(&mut self, cards: Vec<Card>) {
        self.state = SessionState::Active(ActiveSession::new(SessionRunner::start(cards)));
    }

    pub fn batch_failed(&mut self, message: String) {
        self.state = SessionState::Failed(message);
    }

    pub fn set_summary_status(&mut self, status: String) {
        if let SessionState::Active(active) = &mut self.state {
            active.summary_status = Some(status);
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, theme: &Theme) -> Vec<SessionAction> {
        let mut actions = Vec::new();

        ui.horizontal(|ui| {
            ui.heading(format!("{}: {}", self.kind.title(), self.deck.name));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("← Decks").clicked() {
                    actions.push(SessionAction::BackToDecks);
                }
                if let SessionState::Active(active) = &self.state {
                    ui.label(theme.dim(&format!(
                        "Done {}/{} · Queue {}",
                        active.runner.completed(),
                        active.runner.total(),
                        active.runner.remaining()
                    )));
                }
            });
        });
        ui.add_space(10.0);

        match &mut self.state {
            SessionState::Loading => {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.add(egui::Spinner::new());
                    ui.label("Loading cards...");
                });
            }
            SessionState::Failed(message) => {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.colored_label(theme.red(), format!("Could not load cards: {}", message));
                    ui.add_space(8.0);
                    if ui.button("Retry").clicked() {
                        actions.push(SessionAction::Retry);
                    }
                });
            }
            SessionState::Active(active) => {
                if active.runner.is_finished() {
                    show_finished(ui, theme, self.kind, active, &mut actions);
                } else {
                    show_card(ui, theme, self.kind, active, &mut actions);
                }
            }
        }

        actions
    }
}

fn show_finished(
    ui: &mut egui::Ui,
    theme: &Theme,
    kind: SessionKind,
    active: &ActiveSession,
    actions: &mut Vec<SessionAction>,
) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.heading("Session complete!");
        ui.add_space(6.0);
        let closing = match kind {
            SessionKind::Study => "Every card in this batch was answered correctly.",
            SessionKind::Review => "Nothing left in the review queue.",
        };
        ui.label(closing);

        if let Some(status) = &active.summary_status {
            ui.add_space(6.0);
            ui.label(theme.dim(status));
        }

        ui.add_space(14.0);
        ui.horizontal(|ui| {
            if ui.button("Study again").clicked() {
                actions.push(SessionAction::Restart);
            }
            if ui.button("Back to decks").clicked() {
                actions.push(SessionAction::BackToDecks);
            }
        });
    });
}

fn show_card(
    ui: &mut egui::Ui,
    theme: &Theme,
    kind: SessionKind,
    active: &mut ActiveSession,
    actions: &mut Vec<SessionAction>,
) {
    // Pull display data out before any mutation of the runner below.
    let (card_id, front, back, mnemonic, audio_url) = {
        let card = active.runner.current().expect("unfinished session has a current card");
        (
            card.id,
            card.front.clone(),
            card.back.clone(),
            card.mnemonic.clone(),
            card.audio_url().map(str::to_string),
        )
    };

    let prompt = markup::strip_image_tags(&front);
    let has_image = markup::extract_image_tag(&front).is_some();

    ui.vertical_centered(|ui| {
        ui.label(theme.dim("FLASHCARD"));
        ui.add_space(12.0);
        ui.label(egui::RichText::new(prompt.trim()).size(96.0).strong());
        if has_image {
            ui.label(theme.dim("(image omitted)"));
        }
        ui.add_space(16.0);

        let mut submit_requested = false;

        let response = ui.add(
            egui::TextEdit::singleline(&mut active.input)
                .hint_text("Type the reading and press Enter")
                .desired_width(320.0)
                .interactive(active.feedback.is_none()),
        );
        if active.needs_focus {
            response.request_focus();
            active.needs_focus = false;
        }
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            submit_requested = true;
        }
        // The input is read-only while feedback is up, so Enter-to-advance
        // has to be caught globally.
        if active.feedback.is_some() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            submit_requested = true;
        }

        ui.add_space(8.0);
        let button_label = if active.feedback.is_none() { "Check" } else { "Next" };
        let can_check = active.feedback.is_some() || !active.input.trim().is_empty();
        if ui.add_enabled(can_check, egui::Button::new(button_label)).clicked() {
            submit_requested = true;
        }

        match &active.feedback {
            None => {
                if submit_requested && !active.input.trim().is_empty() {
                    if let Some(check) = active.runner.submit_answer(&active.input) {
                        if kind == SessionKind::Review {
                            actions.push(SessionAction::ReviewAnswered {
                                card_id,
                                correct: check.correct,
                            });
                        }
                        active.feedback = Some(check);
                        // Enter just blurred the disabled input; keep keyboard
                        // flow alive so the next Enter advances.
                        active.needs_focus = false;
                    }
                }
            }
            Some(_) => {
                if submit_requested {
                    active.runner.advance();
                    active.feedback = None;
                    active.input.clear();
                    active.show_details = false;
                    active.needs_focus = true;

                    if active.runner.is_finished()
                        && kind == SessionKind::Study
                        && !active.summary_sent
                    {
                        active.summary_sent = true;
                        actions.push(SessionAction::ReportSummary(active.runner.summary()));
                    }
                    return;
                }
            }
        }

        if let Some(check) = active.feedback.clone() {
            ui.add_space(10.0);
            if check.correct {
                ui.colored_label(theme.green(), "Correct! Press Enter to continue.");
            } else {
                ui.colored_label(
                    theme.red(),
                    format!("Expected answer: {}. Press Enter to continue.", check.expected),
                );
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let details_label =
                    if active.show_details { "Hide details" } else { "Show details" };
                if ui.button(details_label).clicked() {
                    active.show_details = !active.show_details;
                }
                if let Some(url) = &audio_url {
                    if ui.button("🔊 Play audio").clicked() {
                        actions.push(SessionAction::PlayAudio(url.clone()));
                    }
                }
            });

            if active.show_details {
                ui.add_space(8.0);
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_max_width(420.0);
                    ui.label(theme.bold("Full answer"));
                    ui.label(markup::strip_audio_urls(&back));
                    if let Some(mnemonic) = &mnemonic {
                        ui.add_space(4.0);
                        ui.label(theme.bold("Mnemonic"));
                        ui.label(mnemonic.as_str());
                    }
                });
            }
        }
    });
}
