use eframe::egui::{self, Color32, RichText, Ui};

use crate::config::DISPLAY_COUNT_OPTIONS;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

const ALL_MAKES: &str = "All Makes";

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(store) = &state.store else {
        ui.label("No dataset loaded.");
        return;
    };
    // Clone what we need so we can mutate state below.
    let makes = store.makes.clone();

    // ---- Search by make or model ----
    ui.strong("Search");
    let mut search = state.criteria.search_text.clone();
    let response = ui.add(
        egui::TextEdit::singleline(&mut search).hint_text("Search by Make or Model"),
    );
    if response.changed() {
        state.set_search_text(search);
    }
    ui.add_space(6.0);

    // ---- Make selector ----
    ui.strong("Make");
    let current = state.criteria.selected_make.clone();
    let mut picked: Option<Option<String>> = None;
    egui::ComboBox::from_id_salt("make_select")
        .selected_text(current.as_deref().unwrap_or(ALL_MAKES))
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_none(), ALL_MAKES).clicked() {
                picked = Some(None);
            }
            for make in &makes {
                if ui
                    .selectable_label(current.as_deref() == Some(make.as_str()), make)
                    .clicked()
                {
                    picked = Some(Some(make.clone()));
                }
            }
        });
    if let Some(make) = picked {
        state.set_selected_make(make);
    }
    ui.add_space(6.0);

    // ---- Segment size ----
    ui.strong("Chart entries");
    let mut count = state.display_count;
    egui::ComboBox::from_id_salt("display_count")
        .selected_text(format!("{count} entries"))
        .show_ui(ui, |ui: &mut Ui| {
            for opt in DISPLAY_COUNT_OPTIONS {
                ui.selectable_value(&mut count, opt, format!("{opt} entries"));
            }
        });
    if count != state.display_count {
        state.set_display_count(count);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong("⚡ EV Dashboard");
        ui.separator();

        if let Some(store) = &state.store {
            ui.label(format!(
                "{} vehicles loaded, {} matching",
                store.len(),
                state.view().filtered.len()
            ));
        }

        ui.separator();

        let theme_icon = if state.dark_mode { "◑" } else { "◐" };
        if ui
            .selectable_label(state.dark_mode, theme_icon)
            .on_hover_text("Toggle dark mode")
            .clicked()
        {
            state.toggle_dark_mode();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open vehicle data")
        .add_filter("Supported files", &["json", "csv", "parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(store) => state.set_store(store),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
