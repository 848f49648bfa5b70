use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::{core::models::{Deck, DeckSummary}, gui::theme::Theme};

#[derive(Default)]
pub struct DeckListState {
    pub decks: Vec<DeckSummary>,
    pub loading: bool,
    pub error: Option<String>,
}

pub enum DeckAction {
    Study(Deck),
    Review(Deck),
    Reload,
}

pub fn show(ui: &mut egui::Ui, state: &DeckListState, theme: &Theme) -> Option<DeckAction> {
    let mut action = None;

    ui.heading("Decks");
    ui.add_space(6.0);

    if let Some(error) = &state.error {
        ui.colored_label(theme.red(), format!("Failed to load decks: {}", error));
        ui.add_space(4.0);
        if ui.button("Retry").clicked() {
            action = Some(DeckAction::Reload);
        }
        return action;
    }

    if state.decks.is_empty() {
        if !state.loading {
            ui.label(theme.dim("No decks available from this source."));
        }
        return action;
    }

    let text_height =
        egui::TextStyle::Body.resolve(ui.style()).size.max(ui.spacing().interact_size.y);

    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(50.0))
        .column(Column::remainder())
        .column(Column::auto().at_least(140.0))
        .header(25.0, |mut header| {
            header.col(|ui| {
                ui.label(theme.heading("Deck"));
            });
            header.col(|ui| {
                ui.label(theme.heading("Due"));
            });
            header.col(|ui| {
                ui.label(theme.heading("Description"));
            });
            header.col(|_ui| {});
        })
        .body(|mut body| {
            body.rows(text_height + 8.0, state.decks.len(), |mut row| {
                let summary = &state.decks[row.index()];
                row.col(|ui| {
                    ui.strong(theme.bold(&summary.deck.name));
                });
                row.col(|ui| {
                    if summary.due_count > 0 {
                        ui.colored_label(theme.orange(), summary.due_count.to_string());
                    } else {
                        ui.label(theme.dim("0"));
                    }
                });
                row.col(|ui| {
                    ui.label(summary.deck.description.as_deref().unwrap_or(""));
                });
                row.col(|ui| {
                    if ui.button("Study").clicked() {
                        action = Some(DeckAction::Study(summary.deck.clone()));
                    }
                    let review = ui.add_enabled(
                        summary.due_count > 0,
                        egui::Button::new("Review"),
                    );
                    if review.clicked() {
                        action = Some(DeckAction::Review(summary.deck.clone()));
                    }
                });
            });
        });

    action
}
