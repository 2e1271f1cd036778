use std::time::{Duration, Instant};

use client_core::{NoticeLevel, Phase};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::UiEvent, orchestration::dispatch_backend_command, reducer::PageUiState,
};

/// Titles longer than this render with the compact heading font.
const LONG_TITLE_CHARS: usize = 15;

pub struct EventPageApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: PageUiState,
    date_rows_error: Option<String>,
}

impl EventPageApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        saved_affordance: Duration,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            state: PageUiState::new(saved_affordance),
            date_rows_error: None,
        }
    }

    fn send(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.state.status);
    }

    fn process_ui_events(&mut self, now: Instant) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.state.apply(event, now);
        }
        self.state.expire(now);
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        let phase = self.state.phase();
        let submitting = self.state.is_submitting();
        egui::TopBottomPanel::top("status_bar")
            .resizable(false)
            .exact_height(24.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let (label, color) = match phase {
                        Phase::Loading => ("Loading", egui::Color32::GRAY),
                        Phase::Synced => ("Saved", egui::Color32::from_rgb(90, 170, 110)),
                        Phase::Dirty => ("Unsaved changes", egui::Color32::from_rgb(220, 170, 60)),
                    };
                    ui.colored_label(color, label);
                    if submitting {
                        ui.spinner();
                        ui.small("Submitting update...");
                    }
                    ui.separator();
                    ui.label(&self.state.status);
                });
            });
    }

    fn show_action_bar(&mut self, ctx: &egui::Context, now: Instant) {
        let mut commands = Vec::new();
        egui::TopBottomPanel::bottom("action_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    if self.state.show_confirm() {
                        let confirm = ui.add_enabled(
                            !self.state.is_submitting(),
                            egui::Button::new("Confirm Update"),
                        );
                        if confirm.clicked() {
                            commands.push(BackendCommand::ConfirmUpdate);
                        }
                        if ui
                            .add_enabled(
                                !self.state.is_submitting(),
                                egui::Button::new("Discard changes"),
                            )
                            .clicked()
                        {
                            commands.push(BackendCommand::DiscardChanges);
                        }
                    } else if self.state.show_saved(now) {
                        ui.colored_label(egui::Color32::from_rgb(90, 170, 110), "Saved");
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let live = self.state.view.as_ref().is_some_and(|view| view.is_live);
                        let label = if live { "Live" } else { "Go Live" };
                        // Publishing is not wired to the backend; the control only reports state.
                        if ui.button(label).clicked() {
                            self.state.status = if live {
                                "This event is live".to_string()
                            } else {
                                "Publishing is not available from the editor".to_string()
                            };
                        }
                    });
                });
                ui.add_space(4.0);
            });
        for cmd in commands {
            self.send(cmd);
        }
    }

    fn show_page(&mut self, ctx: &egui::Context) {
        let mut commands = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(view) = self.state.view.clone() else {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
                return;
            };
            let editable = view.phase != Phase::Loading;

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.group(|ui| {
                        ui.horizontal(|ui| {
                            match view.banner.as_deref() {
                                Some(src) if src.starts_with("data:") => {
                                    ui.label("New banner attached (not yet saved)");
                                }
                                Some(src) => {
                                    ui.hyperlink_to("Banner image", src);
                                }
                                None => {
                                    ui.weak("No banner");
                                }
                            }
                            if ui
                                .add_enabled(editable, egui::Button::new("Change Banner"))
                                .clicked()
                            {
                                commands.push(BackendCommand::OpenImageModal);
                            }
                        });
                    });
                    ui.add_space(8.0);

                    let title_size = if self.state.title_draft.chars().count() > LONG_TITLE_CHARS
                    {
                        22.0
                    } else {
                        30.0
                    };
                    let title = ui.add_enabled(
                        editable,
                        egui::TextEdit::singleline(&mut self.state.title_draft)
                            .font(egui::FontId::proportional(title_size))
                            .hint_text("Heading")
                            .desired_width(f32::INFINITY),
                    );
                    if title.changed() {
                        commands.push(BackendCommand::SetTitle {
                            text: self.state.title_draft.clone(),
                        });
                    }
                    ui.add_space(8.0);

                    ui.horizontal(|ui| {
                        ui.strong("Dates");
                        if ui
                            .add_enabled(editable, egui::Button::new("Edit dates"))
                            .clicked()
                        {
                            commands.push(BackendCommand::OpenDatesModal);
                        }
                    });
                    for line in &view.dates {
                        ui.label(line);
                    }
                    ui.add_space(8.0);

                    ui.horizontal(|ui| {
                        ui.strong("Location");
                        ui.label(&view.location);
                    });
                    ui.horizontal(|ui| {
                        ui.strong("Organized By");
                        ui.label(&view.organizer);
                    });
                    ui.add_space(8.0);

                    ui.strong("About");
                    for (index, (draft, block)) in self
                        .state
                        .description_drafts
                        .iter_mut()
                        .zip(&view.description_blocks)
                        .enumerate()
                    {
                        if !block.editable {
                            // Lists and mixed formatting are shown but never rewritten here.
                            ui.label(egui::RichText::new(&block.text).italics())
                                .on_hover_text("Formatted block; edit it in the web editor");
                            continue;
                        }
                        let response = ui.add_enabled(
                            editable,
                            egui::TextEdit::multiline(draft)
                                .hint_text("Click here to add description")
                                .desired_rows(2)
                                .desired_width(f32::INFINITY),
                        );
                        if response.changed() {
                            commands.push(BackendCommand::EditDescriptionBlock {
                                index,
                                text: draft.clone(),
                            });
                        }
                    }
                    if ui
                        .add_enabled(editable, egui::Button::new("Add paragraph"))
                        .clicked()
                    {
                        commands.push(BackendCommand::AddDescriptionParagraph);
                    }
                });
        });
        for cmd in commands {
            self.send(cmd);
        }
    }

    fn show_image_modal(&mut self, ctx: &egui::Context) {
        if !self
            .state
            .view
            .as_ref()
            .is_some_and(|view| view.image_modal_open)
        {
            return;
        }
        let mut open = true;
        let mut commands = Vec::new();
        egui::Window::new("Upload banner")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label("Pick an image to use as the event banner.");
                ui.add_space(6.0);
                if ui.button("Choose image...").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp"])
                        .pick_file()
                    {
                        commands.push(BackendCommand::AttachBanner { path });
                    }
                }
            });
        if !open {
            commands.push(BackendCommand::CloseImageModal);
        }
        for cmd in commands {
            self.send(cmd);
        }
    }

    fn show_dates_modal(&mut self, ctx: &egui::Context) {
        if !self
            .state
            .view
            .as_ref()
            .is_some_and(|view| view.dates_modal_open)
        {
            self.date_rows_error = None;
            return;
        }
        let mut open = true;
        let mut apply = false;
        let mut cancel = false;
        let mut remove = None;
        let mut add = false;
        egui::Window::new("Event dates")
            .collapsible(false)
            .open(&mut open)
            .show(ctx, |ui| {
                egui::Grid::new("date_rows")
                    .num_columns(4)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        ui.strong("Date");
                        ui.strong("Start");
                        ui.strong("End");
                        ui.end_row();
                        for (idx, row) in self.state.date_rows.iter_mut().enumerate() {
                            ui.add(
                                egui::TextEdit::singleline(&mut row.date)
                                    .hint_text("YYYY-MM-DD")
                                    .desired_width(110.0),
                            );
                            ui.add(
                                egui::TextEdit::singleline(&mut row.start)
                                    .hint_text("HH:MM")
                                    .desired_width(60.0),
                            );
                            ui.add(
                                egui::TextEdit::singleline(&mut row.end)
                                    .hint_text("HH:MM")
                                    .desired_width(60.0),
                            );
                            if ui.small_button("Remove").clicked() {
                                remove = Some(idx);
                            }
                            ui.end_row();
                        }
                    });
                if ui.button("Add date").clicked() {
                    add = true;
                }
                if let Some(err) = &self.date_rows_error {
                    ui.colored_label(egui::Color32::from_rgb(220, 90, 90), err);
                }
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Update").clicked() {
                        apply = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if let Some(idx) = remove {
            self.state.remove_date_row(idx);
        }
        if add {
            self.state.add_date_row();
        }
        if apply {
            match self.state.parse_date_rows() {
                Ok(occurrences) => {
                    self.date_rows_error = None;
                    self.send(BackendCommand::ApplyDates { occurrences });
                }
                Err(err) => self.date_rows_error = Some(err),
            }
        } else if cancel || !open {
            self.date_rows_error = None;
            self.send(BackendCommand::CloseDatesModal);
        }
    }

    fn show_toasts(&self, ctx: &egui::Context) {
        if self.state.toasts.is_empty() {
            return;
        }
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -48.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for toast in &self.state.toasts {
                    let fill = match toast.notice.level {
                        NoticeLevel::Success => egui::Color32::from_rgb(38, 92, 58),
                        NoticeLevel::Error => egui::Color32::from_rgb(120, 40, 40),
                    };
                    egui::Frame::new()
                        .fill(fill)
                        .corner_radius(6.0)
                        .inner_margin(egui::Margin::symmetric(10, 6))
                        .show(ui, |ui| {
                            ui.colored_label(egui::Color32::WHITE, &toast.notice.message);
                        });
                    ui.add_space(4.0);
                }
            });
    }
}

impl eframe::App for EventPageApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.process_ui_events(now);

        self.show_status_bar(ctx);
        self.show_action_bar(ctx, now);
        self.show_page(ctx);
        self.show_image_modal(ctx);
        self.show_dates_modal(ctx);
        self.show_toasts(ctx);

        if self.state.is_submitting() || self.state.phase() == Phase::Loading {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
