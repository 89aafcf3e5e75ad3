//! Result cards view.
//!
//! Renders the widget's results pane: one card per item with a copy
//! button, or the "No results" / error placeholder.

use eframe::egui::{self, ScrollArea};

use crate::widget::markup::STATUS_NO_RESULTS;
use crate::widget::ResultsPane;

/// View for displaying the results area.
pub struct ResultsView;

impl ResultsView {
    /// Display the results pane.
    ///
    /// Returns the index of an item whose Copy button was clicked, if any.
    pub fn show(ui: &mut egui::Ui, pane: &ResultsPane) -> Option<usize> {
        let mut copy_index = None;

        match pane {
            ResultsPane::Empty => {
                ui.centered_and_justified(|ui| {
                    ui.weak("Start typing to search codes.");
                });
            }
            ResultsPane::NoResults => {
                ui.centered_and_justified(|ui| {
                    ui.label(STATUS_NO_RESULTS);
                });
            }
            ResultsPane::Error => {
                ui.centered_and_justified(|ui| {
                    ui.colored_label(ui.visuals().error_fg_color, "Error fetching results");
                });
            }
            ResultsPane::Results(items) => {
                ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for (i, item) in items.iter().enumerate() {
                            egui::Frame::group(ui.style()).show(ui, |ui| {
                                ui.horizontal(|ui| {
                                    ui.vertical(|ui| {
                                        ui.horizontal(|ui| {
                                            ui.strong(&item.code);
                                            ui.weak(&item.source);
                                        });
                                        ui.label(&item.description);
                                    });
                                    ui.with_layout(
                                        egui::Layout::right_to_left(egui::Align::Min),
                                        |ui| {
                                            if ui.button("Copy").clicked() {
                                                copy_index = Some(i);
                                            }
                                        },
                                    );
                                });
                            });
                            ui.add_space(4.0);
                        }
                    });
            }
        }

        copy_index
    }
}
