use eframe::egui;

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_study_limit() -> usize {
    10
}

fn default_review_limit() -> usize {
    20
}

fn default_true() -> bool {
    true
}

#[derive(Clone, serde::Serialize, serde::Deserialize)]
pub struct SettingsData {
    #[serde(default = "default_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub api_token: String,
    #[serde(default = "default_true")]
    pub use_mock_decks: bool,
    #[serde(default = "default_study_limit")]
    pub study_limit: usize,
    #[serde(default = "default_review_limit")]
    pub review_limit: usize,
    #[serde(default = "default_true")]
    pub dark_mode: bool,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
            api_token: String::new(),
            use_mock_decks: true,
            study_limit: default_study_limit(),
            review_limit: default_review_limit(),
            dark_mode: true,
        }
    }
}

pub struct SettingsModal {
    open: bool,
    draft: SettingsData,
}

impl SettingsModal {
    pub fn new() -> Self {
        Self { open: false, draft: SettingsData::default() }
    }

    pub fn open_settings(&mut self, current: SettingsData) {
        self.draft = current;
        self.open = true;
    }

    /// Returns the edited settings when the learner saves.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<SettingsData> {
        if !self.open {
            return None;
        }

        let mut saved = None;

        let modal = egui::Modal::new(egui::Id::new("settings_modal")).show(ctx, |ui| {
            ui.set_width(420.0);
            ui.heading("Preferences");
            ui.add_space(10.0);

            ui.checkbox(&mut self.draft.use_mock_decks, "Use built-in kana decks (offline)");
            ui.add_space(6.0);

            ui.add_enabled_ui(!self.draft.use_mock_decks, |ui| {
                egui::Grid::new("settings_api_grid")
                    .num_columns(2)
                    .spacing([10.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("API base URL");
                        ui.text_edit_singleline(&mut self.draft.api_base_url);
                        ui.end_row();

                        ui.label("API token");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.draft.api_token).password(true),
                        );
                        ui.end_row();
                    });
            });

            ui.add_space(6.0);
            egui::Grid::new("settings_limit_grid")
                .num_columns(2)
                .spacing([10.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Cards per study session");
                    ui.add(egui::DragValue::new(&mut self.draft.study_limit).range(1..=50));
                    ui.end_row();

                    ui.label("Cards per review session");
                    ui.add(egui::DragValue::new(&mut self.draft.review_limit).range(1..=100));
                    ui.end_row();
                });

            ui.add_space(15.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Save").clicked() {
                    saved = Some(self.draft.clone());
                    ui.close();
                }
                if ui.button("Cancel").clicked() {
                    ui.close();
                }
            });
        });

        if modal.should_close() {
            self.open = false;
        }

        saved
    }
}

impl Default for SettingsModal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_start_offline() {
        let settings = SettingsData::default();
        assert!(settings.use_mock_decks);
        assert_eq!(settings.api_base_url, "http://localhost:8000");
        assert_eq!(settings.study_limit, 10);
        assert_eq!(settings.review_limit, 20);
    }

    #[test]
    fn partial_settings_file_fills_in_defaults() {
        let settings: SettingsData =
            serde_json::from_str(r#"{"api_base_url": "https://study.example"}"#).unwrap();
        assert_eq!(settings.api_base_url, "https://study.example");
        assert!(settings.use_mock_decks);
        assert_eq!(settings.review_limit, 20);
    }
}
