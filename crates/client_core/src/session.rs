//! Local edit state for one event page.
//!
//! The session keeps a per-field draft (title, description, images, dates)
//! seeded from the master copy, plus the snapshot it was last synced from.
//! It is dirty exactly when it has been hydrated once and the draft differs
//! structurally from that snapshot, so the seeding itself never counts as an
//! edit. Submission is split into `begin_submit` / `complete_submit` so the
//! mutation can run outside any lock; `submitting` rejects overlapping
//! submissions.

use std::sync::Arc;

use shared::{
    document::{Document, DocumentError, TextBlock},
    domain::{Event, EventId, ImageRef, Occurrence},
    protocol::UpdateEventInput,
};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    dates::{self, DatesError},
    gateway::GatewayError,
    notify::Notifier,
    store::{EventStore, StoreAction},
};

pub const UPDATE_SUCCESS_MESSAGE: &str = "Event updated successfully";
pub const UPDATE_FAILURE_MESSAGE: &str = "Sorry! an error occurred at the server";
pub const DATES_INVALID_MESSAGE: &str = "Please check your start and end times";
pub const ORGANIZER_MISSING_LABEL: &str = "Not Added";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Synced,
    Dirty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved,
    Failed,
    /// Another submission was already in flight.
    Ignored,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("event has not been loaded yet")]
    NotLoaded,
    #[error("an update is already in flight")]
    InFlight,
    #[error("selected event changed from {expected} to {found}")]
    SelectionChanged { expected: EventId, found: EventId },
    #[error("description could not be serialized: {0}")]
    Description(#[from] DocumentError),
}

/// Images staged for the next submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PendingImages {
    #[default]
    Unset,
    Set(Vec<ImageRef>),
}

impl PendingImages {
    fn from_event(images: &[ImageRef]) -> Self {
        if images.is_empty() {
            Self::Unset
        } else {
            Self::Set(images.to_vec())
        }
    }

    pub fn as_slice(&self) -> &[ImageRef] {
        match self {
            Self::Unset => &[],
            Self::Set(images) => images,
        }
    }

    pub fn has_fresh_upload(&self) -> bool {
        self.as_slice().iter().any(ImageRef::is_fresh_upload)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EditableFields {
    title: Document,
    description: Document,
    images: PendingImages,
    occurrences: Vec<Occurrence>,
}

impl EditableFields {
    fn placeholder() -> Self {
        Self {
            title: Document::placeholder_title(),
            description: Document::placeholder_description(),
            images: PendingImages::Unset,
            occurrences: Vec::new(),
        }
    }

    fn seeded_from(event: &Event) -> Self {
        let title = if event.title.trim().is_empty() {
            Document::placeholder_title()
        } else {
            Document::heading(event.title.as_str())
        };
        Self {
            title,
            description: Document::from_description(event.description.as_deref()),
            images: PendingImages::from_event(&event.images),
            occurrences: dates::normalize(&event.occurrences),
        }
    }
}

/// Read-only projection for front ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub phase: Phase,
    pub submitting: bool,
    pub title: String,
    pub description: String,
    /// Per-block text of the description; only `editable` blocks accept edits.
    pub description_blocks: Vec<TextBlock>,
    pub banner: Option<String>,
    pub dates: Vec<String>,
    pub occurrences: Vec<Occurrence>,
    pub location: String,
    pub organizer: String,
    pub is_live: bool,
    pub dates_modal_open: bool,
    pub image_modal_open: bool,
}

pub struct EditSession {
    event_id: EventId,
    store: Arc<dyn EventStore>,
    notifier: Arc<dyn Notifier>,
    local: EditableFields,
    synced: Option<EditableFields>,
    submitting: bool,
    dates_modal_open: bool,
    image_modal_open: bool,
}

impl EditSession {
    pub fn new(
        event_id: EventId,
        store: Arc<dyn EventStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            event_id,
            store,
            notifier,
            local: EditableFields::placeholder(),
            synced: None,
            submitting: false,
            dates_modal_open: false,
            image_modal_open: false,
        }
    }

    pub fn event_id(&self) -> &EventId {
        &self.event_id
    }

    pub fn is_hydrated(&self) -> bool {
        self.synced.is_some()
    }

    pub fn is_dirty(&self) -> bool {
        self.synced
            .as_ref()
            .is_some_and(|synced| *synced != self.local)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn phase(&self) -> Phase {
        if !self.is_hydrated() {
            Phase::Loading
        } else if self.is_dirty() {
            Phase::Dirty
        } else {
            Phase::Synced
        }
    }

    /// Seeds local state from the fetched event and publishes it as the master copy.
    pub fn apply_fetched(&mut self, event: Event) {
        if event.id != self.event_id {
            warn!(
                expected = %self.event_id,
                received = %event.id,
                "session: ignoring fetch result for another event"
            );
            return;
        }
        if self.is_hydrated() {
            warn!(event_id = %self.event_id, "session: ignoring repeated fetch result");
            return;
        }

        self.seed(&event);
        info!(
            event_id = %self.event_id,
            occurrences = self.local.occurrences.len(),
            "session: hydrated from fetch"
        );
        self.store.dispatch(StoreAction::UpdateSelectedEvent(event));
    }

    fn seed(&mut self, event: &Event) {
        let fields = EditableFields::seeded_from(event);
        self.local = fields.clone();
        self.synced = Some(fields);
    }

    pub fn title(&self) -> &Document {
        &self.local.title
    }

    pub fn set_title(&mut self, title: Document) {
        self.local.title = title;
    }

    pub fn description(&self) -> &Document {
        &self.local.description
    }

    pub fn set_description(&mut self, description: Document) {
        self.local.description = description;
    }

    /// Rewrites one description block in place; marks, attributes and
    /// nested blocks elsewhere in the document are left as they are.
    pub fn edit_description_block(
        &mut self,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), DocumentError> {
        self.local
            .description
            .set_block_text(index, text)
            .inspect_err(|err| {
                warn!(event_id = %self.event_id, error = %err, "session: rejected description edit");
            })
    }

    pub fn add_description_paragraph(&mut self) {
        self.local.description.push_paragraph("");
    }

    pub fn occurrences(&self) -> &[Occurrence] {
        &self.local.occurrences
    }

    pub fn images(&self) -> &PendingImages {
        &self.local.images
    }

    /// Stages images from the upload widget. Nothing is uploaded until submit.
    pub fn attach_images(&mut self, images: Vec<ImageRef>) {
        if images.is_empty() {
            warn!(event_id = %self.event_id, "session: ignoring empty image selection");
            return;
        }
        self.local.images = PendingImages::Set(images);
        self.image_modal_open = false;
    }

    pub fn banner_url(&self) -> Option<&str> {
        self.local
            .images
            .as_slice()
            .first()
            .and_then(ImageRef::display_source)
    }

    pub fn open_dates_modal(&mut self) {
        self.dates_modal_open = true;
    }

    pub fn close_dates_modal(&mut self) {
        self.dates_modal_open = false;
    }

    pub fn is_dates_modal_open(&self) -> bool {
        self.dates_modal_open
    }

    pub fn open_image_modal(&mut self) {
        self.image_modal_open = true;
    }

    pub fn close_image_modal(&mut self) {
        self.image_modal_open = false;
    }

    pub fn is_image_modal_open(&self) -> bool {
        self.image_modal_open
    }

    /// Stages edited dates locally. Invalid dates leave the list and modal untouched.
    pub fn apply_date_edits(&mut self, candidates: Vec<Occurrence>) -> Result<(), DatesError> {
        if let Err(err) = dates::validate(&candidates) {
            warn!(event_id = %self.event_id, error = %err, "session: rejected date edits");
            self.notifier.error(DATES_INVALID_MESSAGE);
            return Err(err);
        }
        self.local.occurrences = dates::normalize(&candidates);
        self.dates_modal_open = false;
        Ok(())
    }

    /// Restores every field from the last synced snapshot.
    pub fn discard_changes(&mut self) {
        if let Some(synced) = &self.synced {
            self.local = synced.clone();
            info!(event_id = %self.event_id, "session: discarded local changes");
        }
    }

    pub fn build_update_input(&self) -> Result<UpdateEventInput, SubmitError> {
        if !self.is_hydrated() {
            return Err(SubmitError::NotLoaded);
        }
        let master = self.store.selected_event().ok_or(SubmitError::NotLoaded)?;
        if master.id != self.event_id {
            return Err(SubmitError::SelectionChanged {
                expected: self.event_id.clone(),
                found: master.id,
            });
        }

        let images = if self.local.images.has_fresh_upload() {
            Some(self.local.images.as_slice().to_vec())
        } else {
            None
        };

        Ok(UpdateEventInput {
            id: master.id,
            title: self.local.title.plain_text(),
            description: self.local.description.to_json_string()?,
            occurrences: dates::normalize(&self.local.occurrences),
            images,
        })
    }

    /// Builds the mutation input and marks the session as submitting.
    pub fn begin_submit(&mut self) -> Result<UpdateEventInput, SubmitError> {
        if self.submitting {
            return Err(SubmitError::InFlight);
        }
        let input = self.build_update_input()?;
        self.submitting = true;
        info!(
            event_id = %input.id,
            occurrences = input.occurrences.len(),
            with_images = input.images.is_some(),
            "session: submitting update"
        );
        Ok(input)
    }

    pub fn complete_submit(&mut self, result: Result<Event, GatewayError>) -> SubmitOutcome {
        if !self.submitting {
            warn!(event_id = %self.event_id, "session: completion without a pending submit");
        }
        self.submitting = false;

        match result {
            Ok(updated) => {
                let event = self.with_carried_fields(updated);
                self.seed(&event);
                self.store.dispatch(StoreAction::UpdateSelectedEvent(event));
                self.store.dispatch(StoreAction::CallEventsApi);
                self.notifier.success(UPDATE_SUCCESS_MESSAGE);
                self.dates_modal_open = false;
                info!(event_id = %self.event_id, "session: update confirmed by server");
                SubmitOutcome::Saved
            }
            Err(err) => {
                error!(event_id = %self.event_id, error = %err, "session: update failed");
                self.notifier.error(UPDATE_FAILURE_MESSAGE);
                SubmitOutcome::Failed
            }
        }
    }

    /// The mutation response omits organizer and venue; keep the master copy's.
    fn with_carried_fields(&self, mut updated: Event) -> Event {
        if let Some(previous) = self.store.selected_event() {
            if previous.id == updated.id {
                if updated.user.is_none() {
                    updated.user = previous.user;
                }
                if updated.venue.is_none() {
                    updated.venue = previous.venue;
                }
            }
        }
        updated
    }

    pub fn location_label(&self) -> String {
        match self.store.selected_event() {
            Some(event) if event.is_online => "Online".to_string(),
            Some(Event {
                venue: Some(venue), ..
            }) => venue.name,
            _ => String::new(),
        }
    }

    pub fn organizer_label(&self) -> String {
        self.store
            .selected_event()
            .and_then(|event| event.user)
            .map(|user| user.name)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| ORGANIZER_MISSING_LABEL.to_string())
    }

    pub fn view(&self) -> PageView {
        let is_live = self
            .store
            .selected_event()
            .is_some_and(|event| event.is_live);
        PageView {
            phase: self.phase(),
            submitting: self.submitting,
            title: self.local.title.plain_text(),
            description: self.local.description.full_text(),
            description_blocks: self.local.description.blocks(),
            banner: self.banner_url().map(str::to_string),
            dates: dates::describe_occurrences(&self.local.occurrences),
            occurrences: self.local.occurrences.clone(),
            location: self.location_label(),
            organizer: self.organizer_label(),
            is_live,
            dates_modal_open: self.dates_modal_open,
            image_modal_open: self.image_modal_open,
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
