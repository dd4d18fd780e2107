use eframe::egui::{self, Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Dataset;
use crate::data::presentation::TableView;

const ROW_HEIGHT: f32 = 20.0;

/// Render the truncated filtered records, all columns in dataset order.
pub fn filtered_table(ui: &mut Ui, dataset: &Dataset, table: &TableView) {
    ui.strong(table.title());

    egui::ScrollArea::horizontal()
        .id_salt("filtered_table_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .vscroll(false)
                .cell_layout(Layout::left_to_right(Align::Center))
                .columns(Column::auto().at_least(60.0), dataset.columns.len())
                .header(ROW_HEIGHT + 2.0, |mut header| {
                    for name in &dataset.columns {
                        header.col(|ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, table.indices.len(), |mut row| {
                        let record = &dataset.records[table.indices[row.index()]];
                        for cell in &record.cells {
                            row.col(|ui| {
                                if cell.is_null() {
                                    ui.label(RichText::new(cell.to_string()).weak());
                                } else {
                                    ui.label(cell.to_string());
                                }
                            });
                        }
                    });
                });
        });
}
