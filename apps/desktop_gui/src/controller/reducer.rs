//! Reducer-like state transitions for the page UI.
//!
//! The session itself lives on the backend worker; the UI keeps only the last
//! projection it received plus its own drafts (title text, one text per
//! description block, date rows in the dates modal) and transient affordances (toasts, the "saved" badge).

use std::time::{Duration, Instant};

use client_core::{Notice, PageView, Phase};
use shared::domain::Occurrence;

use crate::controller::events::UiEvent;

pub const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone)]
pub struct Toast {
    pub notice: Notice,
    pub shown_at: Instant,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRowDraft {
    pub date: String,
    pub start: String,
    pub end: String,
}

impl DateRowDraft {
    fn from_occurrence(occurrence: &Occurrence) -> Self {
        Self {
            date: occurrence.start_date.format("%Y-%m-%d").to_string(),
            start: occurrence.start_time.format("%H:%M").to_string(),
            end: occurrence.end_time.format("%H:%M").to_string(),
        }
    }
}

pub struct PageUiState {
    pub view: Option<PageView>,
    pub status: String,
    pub title_draft: String,
    /// One draft per description block, aligned with `view.description_blocks`.
    pub description_drafts: Vec<String>,
    pub date_rows: Vec<DateRowDraft>,
    pub toasts: Vec<Toast>,
    saved_until: Option<Instant>,
    saved_affordance: Duration,
}

impl PageUiState {
    pub fn new(saved_affordance: Duration) -> Self {
        Self {
            view: None,
            status: "Loading event...".to_string(),
            title_draft: String::new(),
            description_drafts: Vec::new(),
            date_rows: Vec::new(),
            toasts: Vec::new(),
            saved_until: None,
            saved_affordance,
        }
    }

    pub fn apply(&mut self, event: UiEvent, now: Instant) {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::ViewUpdated { view, reseed } => {
                let first_view = self.view.is_none();
                let dates_modal_opened = view.dates_modal_open
                    && !self.view.as_ref().is_some_and(|prev| prev.dates_modal_open);

                if reseed || first_view {
                    self.title_draft = view.title.clone();
                }
                if reseed
                    || first_view
                    || view.description_blocks.len() != self.description_drafts.len()
                {
                    self.description_drafts = view
                        .description_blocks
                        .iter()
                        .map(|block| block.text.clone())
                        .collect();
                }
                if dates_modal_opened || (reseed && view.dates_modal_open) {
                    self.date_rows = view
                        .occurrences
                        .iter()
                        .map(DateRowDraft::from_occurrence)
                        .collect();
                }
                if view.phase != Phase::Loading && self.status.starts_with("Loading") {
                    self.status = "Event loaded".to_string();
                }
                self.view = Some(view);
            }
            UiEvent::Notice(notice) => {
                self.toasts.push(Toast {
                    notice,
                    shown_at: now,
                });
            }
            UiEvent::Saved => {
                self.saved_until = Some(now + self.saved_affordance);
                self.status = "All changes saved".to_string();
            }
            UiEvent::Error(err) => {
                tracing::warn!(context = ?err.context(), category = ?err.category(), "ui error: {}", err.message());
                self.status = err.summary();
            }
        }
    }

    pub fn expire(&mut self, now: Instant) {
        self.toasts
            .retain(|toast| now.duration_since(toast.shown_at) < TOAST_TTL);
        if self.saved_until.is_some_and(|until| now >= until) {
            self.saved_until = None;
        }
    }

    pub fn phase(&self) -> Phase {
        self.view.as_ref().map_or(Phase::Loading, |view| view.phase)
    }

    pub fn is_submitting(&self) -> bool {
        self.view.as_ref().is_some_and(|view| view.submitting)
    }

    /// The confirm button shows while there are unsaved edits.
    pub fn show_confirm(&self) -> bool {
        self.phase() == Phase::Dirty
    }

    pub fn show_saved(&self, now: Instant) -> bool {
        self.saved_until.is_some_and(|until| now < until)
    }

    pub fn add_date_row(&mut self) {
        let template = self.date_rows.last().cloned().unwrap_or_default();
        self.date_rows.push(template);
    }

    pub fn remove_date_row(&mut self, index: usize) {
        if index < self.date_rows.len() {
            self.date_rows.remove(index);
        }
    }

    pub fn parse_date_rows(&self) -> Result<Vec<Occurrence>, String> {
        self.date_rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                Occurrence::parse(&row.date, &row.start, &row.end).map_err(|err| {
                    format!(
                        "Row {}: use YYYY-MM-DD and HH:MM ({err})",
                        idx + 1
                    )
                })
            })
            .collect()
    }
}
