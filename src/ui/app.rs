//! Main search application window.
//!
//! Implements eframe::App around the headless search widget: forwards
//! input changes, button clicks and shortcuts, ticks the widget each
//! frame, and draws the result cards and status bar.

use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui;
use tokio::runtime::Handle;

use crate::api::SearchClient;
use crate::ui::actions;
use crate::ui::results::ResultsView;
use crate::widget::{markup, KeyAction, ResultsPane, SearchWidget};

/// The main search application.
pub struct SearchApp {
    /// The headless widget owning the search lifecycle.
    widget: SearchWidget,
    /// Text buffer backing the input field.
    input: String,
    /// Whether the input field had focus on the previous frame.
    input_focused: bool,
    /// Whether a shortcut asked for input focus this frame.
    focus_requested: bool,
    /// Whether this is the first frame (for initial focus).
    first_frame: bool,
}

impl SearchApp {
    /// Create a new search application.
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        client: Arc<dyn SearchClient>,
        runtime: Handle,
    ) -> Self {
        Self {
            widget: SearchWidget::new(client, runtime),
            input: String::new(),
            input_focused: false,
            focus_requested: false,
            first_frame: true,
        }
    }

    /// Handle the `/` and Escape shortcuts.
    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        if !self.input_focused {
            // Consume the key so it is not typed into the freshly
            // focused input.
            let slash = ctx
                .input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Slash));
            if slash && self.widget.on_slash(self.input_focused) == KeyAction::FocusInput {
                self.focus_requested = true;
            }
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.input.clear();
            self.widget.on_escape();
            self.focus_requested = true;
        }
    }

    /// Copy one result to the clipboard and confirm it in the status
    /// line. A failed clipboard write is logged and otherwise silent.
    fn copy_result(&mut self, index: usize) {
        let ResultsPane::Results(items) = self.widget.pane() else {
            return;
        };
        let Some(item) = items.get(index) else {
            return;
        };

        let text = markup::copy_text(item);
        match actions::copy_text(&text) {
            Ok(()) => self.widget.note_copied(&text),
            Err(e) => tracing::warn!("Clipboard copy failed: {}", e),
        }
    }
}

impl eframe::App for SearchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keyboard(ctx);

        // Fire elapsed debounces and poll the in-flight request
        self.widget.tick(Instant::now());
        if self.widget.needs_tick() {
            ctx.request_repaint_after(Duration::from_millis(10));
        }

        let mut copy_clicked = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical(|ui| {
                // Search input row
                ui.horizontal(|ui| {
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.input)
                            .desired_width(ui.available_width() - 120.0)
                            .hint_text("Search medical codes..."),
                    );

                    if self.first_frame || self.focus_requested {
                        response.request_focus();
                        self.first_frame = false;
                        self.focus_requested = false;
                    }
                    self.input_focused = response.has_focus();

                    if response.changed() {
                        self.widget.input_changed(&self.input);
                    }

                    if ui.button("Search").clicked() {
                        self.widget.search_now();
                    }

                    if self.widget.is_busy() {
                        ui.add(egui::Spinner::new());
                    }
                });

                ui.separator();

                // Result cards
                copy_clicked = ResultsView::show(ui, self.widget.pane());

                ui.separator();

                // Status bar
                ui.horizontal(|ui| {
                    ui.label(self.widget.status());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.weak("Esc:clear  /:focus");
                    });
                });
            });
        });

        if let Some(index) = copy_clicked {
            self.copy_result(index);
        }
    }
}
