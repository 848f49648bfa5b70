use eframe::egui::{self, containers};

use crate::gui::settings::{SettingsData, SettingsModal};

pub enum TopBarAction {
    ReloadDecks,
}

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        settings_modal: &mut SettingsModal,
        current_settings: &SettingsData,
        source_label: &str,
        connected: bool,
    ) -> Option<TopBarAction> {
        let mut action = None;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);

                ui.menu_button("File", |ui| {
                    if ui.button("Reload Decks").clicked() {
                        action = Some(TopBarAction::ReloadDecks);
                    }
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Settings", |ui| {
                    if ui.button("Preferences").clicked() {
                        settings_modal.open_settings(current_settings.clone());
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    Self::show_source_status(ui, source_label, connected);
                });
            });
        });

        action
    }

    fn show_source_status(ui: &mut egui::Ui, source_label: &str, connected: bool) {
        let color = if connected {
            egui::Color32::from_rgb(0, 200, 0)
        } else {
            egui::Color32::from_rgb(200, 80, 80)
        };

        let tooltip = if connected {
            format!("Connected to {}", source_label)
        } else {
            format!("Not connected to {}", source_label)
        };

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.small(source_label).on_hover_text(&tooltip);
            ui.small(egui::RichText::new("●").color(color)).on_hover_text(&tooltip);
        });
    }
}
