use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::RecordStore;
use crate::series::{self, StatCards, VehicleCard, NO_DATA};
use crate::state::AppState;
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Central panel: summary cards, charts, record table
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &AppState) {
    let Some(store) = &state.store else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No dataset loaded  (File → Open…)");
        });
        return;
    };
    let view = state.view();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            stat_cards(ui, &StatCards::new(store, view.stats.as_ref()));
            ui.add_space(12.0);

            section(ui, "🥧 Manufacturer Distribution");
            plot::pie_chart(ui, &series::proportion_series(&view.groups));

            section(ui, "📊 Electric Range (all matching vehicles)");
            plot::bar_chart(ui, "full_range", &series::full_range_series(store, view));

            section(ui, &format!("📊 Electric Range Segment ({} entries)", state.display_count));
            plot::bar_chart(ui, "segment_range", &series::segment_range_series(store, view));

            section(ui, "📈 Range Progression");
            plot::line_chart(ui, "progression", &series::progression_series(store, view));

            section(ui, "🚙 Vehicle Types by Manufacturer");
            plot::stacked_bar_chart(ui, "type_breakdown", &series::breakdown_series(&view.breakdown));

            section(ui, "Vehicles");
            record_table(ui, store, &view.segment);
        });
}

fn section(ui: &mut Ui, title: &str) {
    ui.add_space(16.0);
    ui.heading(title);
    ui.separator();
}

fn stat_cards(ui: &mut Ui, cards: &StatCards) {
    ui.columns(3, |cols: &mut [Ui]| {
        vehicle_card(&mut cols[0], "🚀 Highest Range", cards.highest.as_ref());
        vehicle_card(&mut cols[1], "🐢 Lowest Range", cards.lowest.as_ref());
        cols[2].group(|ui: &mut Ui| {
            ui.heading("📏 Average Range");
            ui.label(RichText::new(&cards.average).strong());
        });
    });
}

fn vehicle_card(ui: &mut Ui, title: &str, card: Option<&VehicleCard>) {
    ui.group(|ui: &mut Ui| {
        ui.heading(title);
        match card {
            Some(card) => {
                for (field, value) in [
                    ("Make", &card.make),
                    ("Model", &card.model),
                    ("Type", &card.vehicle_type),
                    ("Range", &card.range),
                ] {
                    ui.horizontal(|ui: &mut Ui| {
                        ui.label(format!("{field}:"));
                        ui.label(RichText::new(value).strong());
                    });
                }
            }
            None => {
                ui.label(RichText::new(NO_DATA).italics());
            }
        }
    });
}

fn record_table(ui: &mut Ui, store: &RecordStore, rows: &[usize]) {
    if rows.is_empty() {
        ui.label(RichText::new(NO_DATA).italics());
        return;
    }
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(40.0))
        .column(Column::auto().at_least(100.0))
        .column(Column::auto().at_least(140.0))
        .column(Column::auto().at_least(260.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["#", "Make", "Model", "Electric Vehicle Type", "Electric Range"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let Some(rec) = store.get(rows[row.index()]) else {
                    return;
                };
                let cells = [
                    rows[row.index()].to_string(),
                    rec.make_label().to_string(),
                    rec.model_label().to_string(),
                    rec.vehicle_type_label().to_string(),
                    rec.electric_range.to_string(),
                ];
                for text in cells {
                    row.col(|ui: &mut Ui| {
                        ui.add(egui::Label::new(text).truncate());
                    });
                }
            });
        });
}
