use std::{sync::Arc, time::Instant};

use eframe::egui;

use super::{
    deck_list::{self, DeckAction, DeckListState},
    error_modal::ErrorModal,
    message_overlay::MessageOverlay,
    session_screen::{SessionAction, SessionScreen, SessionState},
    settings::{SettingsData, SettingsModal},
    theme::{set_theme, Theme},
    top_bar::{TopBar, TopBarAction},
};
use crate::{
    core::tasks::{TaskManager, TaskResult},
    persistence::{load_json_or_default, save_json},
    player,
    session::SessionKind,
    source::{CardSource, MockSource, RemoteSource},
};

enum Screen {
    Decks,
    Session(SessionScreen),
}

pub struct KanaflashApp {
    // Configuration
    settings_data: SettingsData,

    // External services
    source: Arc<dyn CardSource>,
    source_connected: bool,
    last_probe: Option<Instant>,
    task_manager: TaskManager,

    // UI state
    screen: Screen,
    deck_list: DeckListState,
    theme: Theme,
    message_overlay: MessageOverlay,
    error_modal: ErrorModal,
    settings_modal: SettingsModal,
}

fn build_source(settings: &SettingsData) -> (Arc<dyn CardSource>, Option<String>) {
    if settings.use_mock_decks {
        return (Arc::new(MockSource::new()), None);
    }

    let token = match settings.api_token.trim() {
        "" => None,
        token => Some(token.to_string()),
    };

    match RemoteSource::new(&settings.api_base_url, token) {
        Ok(remote) => (Arc::new(remote), None),
        Err(e) => (Arc::new(MockSource::new()), Some(e.to_string())),
    }
}

impl KanaflashApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings_data = load_json_or_default::<SettingsData>("settings.json");
        let task_manager = TaskManager::new();
        let (source, source_error) = build_source(&settings_data);

        let mut app = Self {
            settings_data,
            source,
            source_connected: false,
            last_probe: None,
            task_manager,
            screen: Screen::Decks,
            deck_list: DeckListState::default(),
            theme: Theme::default(),
            message_overlay: MessageOverlay::new(),
            error_modal: ErrorModal::new(),
            settings_modal: SettingsModal::new(),
        };

        setup_fonts(&cc.egui_ctx);
        set_theme(&cc.egui_ctx, app.theme.clone());
        cc.egui_ctx.set_zoom_factor(cc.egui_ctx.zoom_factor() + 0.2);

        cc.egui_ctx.set_theme(if app.settings_data.dark_mode {
            egui::Theme::Dark
        } else {
            egui::Theme::Light
        });

        if let Some(error) = source_error {
            app.error_modal.show_error(
                "Source Error",
                "Could not reach the study service; using the built-in decks instead.",
                Some(error),
            );
        }

        app.reload_decks(&cc.egui_ctx);
        app
    }

    fn save_settings(&self) {
        if let Err(e) = save_json(&self.settings_data, "settings.json") {
            eprintln!("Failed to save settings: {}", e);
        }
    }

    fn reload_decks(&mut self, ctx: &egui::Context) {
        self.deck_list.loading = true;
        self.deck_list.error = None;
        self.message_overlay.set_message("Loading decks...".to_string());
        self.task_manager.fetch_decks(self.source.clone(), ctx);
    }

    fn start_session(&mut self, deck: crate::core::Deck, kind: SessionKind, ctx: &egui::Context) {
        let limit = match kind {
            SessionKind::Study => self.settings_data.study_limit,
            SessionKind::Review => self.settings_data.review_limit,
        };
        let deck_id = deck.id;
        self.screen = Screen::Session(SessionScreen::new(deck, kind));
        self.task_manager.fetch_session_batch(self.source.clone(), deck_id, kind, limit, ctx);
    }

    fn refetch_session_batch(&mut self, ctx: &egui::Context) {
        if let Screen::Session(screen) = &mut self.screen {
            screen.state = SessionState::Loading;
            let limit = match screen.kind {
                SessionKind::Study => self.settings_data.study_limit,
                SessionKind::Review => self.settings_data.review_limit,
            };
            self.task_manager.fetch_session_batch(
                self.source.clone(),
                screen.deck.id,
                screen.kind,
                limit,
                ctx,
            );
        }
    }

    fn update_source_status(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        let should_probe = match self.last_probe {
            None => true,
            Some(last) => now.duration_since(last).as_secs() >= 5,
        };

        if should_probe {
            self.task_manager.probe_source(self.source.clone(), ctx);
            self.last_probe = Some(now);
        }
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::SourceProbe(connected) => {
                self.source_connected = connected;
            }

            TaskResult::DeckList(result) => {
                self.message_overlay.clear_message();
                self.deck_list.loading = false;
                match result {
                    Ok(decks) => {
                        self.deck_list.decks = decks;
                        self.deck_list.error = None;
                    }
                    Err(error) => {
                        self.deck_list.error = Some(error);
                    }
                }
            }

            TaskResult::SessionBatch { deck_id, kind, result } => {
                let screen = match &mut self.screen {
                    Screen::Session(screen)
                        if screen.deck.id == deck_id
                            && screen.kind == kind
                            && matches!(screen.state, SessionState::Loading) =>
                    {
                        screen
                    }
                    _ => {
                        println!("Discarding stale session batch for deck {}", deck_id);
                        return;
                    }
                };

                match result {
                    Ok(cards) => screen.batch_loaded(cards),
                    Err(error) => screen.batch_failed(error),
                }
            }

            TaskResult::ReviewReported { card_id, result } => match result {
                Ok(ack) => {
                    println!("Review recorded for card {} (status: {})", card_id, ack.status);
                }
                Err(error) => {
                    eprintln!("Failed to report review for card {}: {}", card_id, error);
                }
            },

            TaskResult::SummaryReported { deck_id, result } => {
                let status = match &result {
                    Ok(updated) => format!("Progress saved ({} cards).", updated),
                    Err(error) => {
                        eprintln!("Failed to report session summary for deck {}: {}", deck_id, error);
                        "Progress could not be saved this time.".to_string()
                    }
                };
                if let Screen::Session(screen) = &mut self.screen {
                    if screen.deck.id == deck_id {
                        screen.set_summary_status(status);
                    }
                }
            }
        }
    }

    fn handle_session_actions(&mut self, actions: Vec<SessionAction>, ctx: &egui::Context) {
        for action in actions {
            match action {
                SessionAction::Retry | SessionAction::Restart => {
                    self.refetch_session_batch(ctx);
                }
                SessionAction::BackToDecks => {
                    self.screen = Screen::Decks;
                    // Due counts changed if anything was reviewed.
                    self.reload_decks(ctx);
                }
                SessionAction::ReviewAnswered { card_id, correct } => {
                    self.task_manager.report_review(self.source.clone(), card_id, correct, ctx);
                }
                SessionAction::ReportSummary(results) => {
                    if let Screen::Session(screen) = &self.screen {
                        self.task_manager.report_summary(
                            self.source.clone(),
                            screen.deck.id,
                            results,
                            ctx,
                        );
                    }
                }
                SessionAction::PlayAudio(url) => {
                    player::play_card_audio(url);
                }
            }
        }
    }
}

impl eframe::App for KanaflashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let task_results = self.task_manager.poll_results();
        for result in task_results {
            self.handle_task_result(result);
        }

        self.update_source_status(ctx);

        // Persist the theme toggle from the top bar.
        let dark_mode = ctx.style().visuals.dark_mode;
        if dark_mode != self.settings_data.dark_mode {
            self.settings_data.dark_mode = dark_mode;
            self.save_settings();
        }

        let top_action = TopBar::show(
            ctx,
            &mut self.settings_modal,
            &self.settings_data,
            self.source.label(),
            self.source_connected,
        );
        if let Some(TopBarAction::ReloadDecks) = top_action {
            self.reload_decks(ctx);
        }

        let mut deck_action = None;
        let mut session_actions = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| match &mut self.screen {
            Screen::Decks => {
                deck_action = deck_list::show(ui, &self.deck_list, &self.theme);
            }
            Screen::Session(screen) => {
                session_actions = screen.show(ui, &self.theme);
            }
        });

        match deck_action {
            Some(DeckAction::Study(deck)) => self.start_session(deck, SessionKind::Study, ctx),
            Some(DeckAction::Review(deck)) => self.start_session(deck, SessionKind::Review, ctx),
            Some(DeckAction::Reload) => self.reload_decks(ctx),
            None => {}
        }

        self.handle_session_actions(session_actions, ctx);

        self.message_overlay.show(ctx, &self.theme);
        self.error_modal.show(ctx);

        if let Some(new_settings) = self.settings_modal.show(ctx) {
            self.settings_data = new_settings;
            self.save_settings();

            let (source, source_error) = build_source(&self.settings_data);
            self.source = source;
            self.source_connected = false;
            self.last_probe = None;
            if let Some(error) = source_error {
                self.error_modal.show_error(
                    "Source Error",
                    "Could not reach the study service; using the built-in decks instead.",
                    Some(error),
                );
            }

            self.screen = Screen::Decks;
            self.reload_decks(ctx);
        }
    }
}

/// Try to register a Japanese-capable system font as a fallback family.
/// The bundled egui fonts have no kana coverage; without a hit here the
/// prompts render as boxes but the app still works.
fn setup_fonts(ctx: &egui::Context) {
    const CANDIDATES: [&str; 5] = [
        "/usr/share/fonts/opentype/noto/NotoSansCJKjp-Regular.otf",
        "/usr/share/fonts/opentype/noto-cjk/NotoSansCJKjp-Regular.otf",
        "/usr/share/fonts/truetype/fonts-japanese-gothic.ttf",
        "/usr/share/fonts/TTF/ipag.ttf",
        "/Library/Fonts/NotoSansJP-Regular.otf",
    ];

    for path in CANDIDATES {
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };

        let mut fonts = egui::FontDefinitions::default();
        fonts
            .font_data
            .insert("jp_fallback".to_owned(), std::sync::Arc::new(egui::FontData::from_owned(bytes)));

        fonts.families.entry(egui::FontFamily::Proportional).or_default().push("jp_fallback".to_owned());
        fonts.families.entry(egui::FontFamily::Monospace).or_default().push("jp_fallback".to_owned());

        ctx.set_fonts(fonts);
        println!("Using Japanese font fallback: {}", path);
        return;
    }

    println!("No Japanese system font found; kana may not render.");
}
