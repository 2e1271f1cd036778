//! Backend commands queued from UI to backend worker.

use shared::domain::Occurrence;
use std::path::PathBuf;

pub enum BackendCommand {
    LoadEvent,
    SetTitle { text: String },
    EditDescriptionBlock { index: usize, text: String },
    AddDescriptionParagraph,
    OpenImageModal,
    CloseImageModal,
    AttachBanner { path: PathBuf },
    OpenDatesModal,
    CloseDatesModal,
    ApplyDates { occurrences: Vec<Occurrence> },
    DiscardChanges,
    ConfirmUpdate,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadEvent => "load_event",
            BackendCommand::SetTitle { .. } => "set_title",
            BackendCommand::EditDescriptionBlock { .. } => "edit_description_block",
            BackendCommand::AddDescriptionParagraph => "add_description_paragraph",
            BackendCommand::OpenImageModal => "open_image_modal",
            BackendCommand::CloseImageModal => "close_image_modal",
            BackendCommand::AttachBanner { .. } => "attach_banner",
            BackendCommand::OpenDatesModal => "open_dates_modal",
            BackendCommand::CloseDatesModal => "close_dates_modal",
            BackendCommand::ApplyDates { .. } => "apply_dates",
            BackendCommand::DiscardChanges => "discard_changes",
            BackendCommand::ConfirmUpdate => "confirm_update",
        }
    }
}
