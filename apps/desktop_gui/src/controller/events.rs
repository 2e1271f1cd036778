//! Backend-to-UI events and error modeling for the event page.

use client_core::{Notice, PageView};

pub enum UiEvent {
    Info(String),
    /// Fresh projection of the session. `reseed` asks the UI to overwrite its
    /// text drafts (after load, save or discard).
    ViewUpdated { view: PageView, reseed: bool },
    Notice(Notice),
    Saved,
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Auth,
    Transport,
    Validation,
    NotFound,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadEvent,
    SubmitUpdate,
    AttachBanner,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let category = if lower.contains("401")
            || lower.contains("403")
            || lower.contains("unauthenticated")
            || lower.contains("forbidden")
        {
            UiErrorCategory::Auth
        } else if lower.contains("not found") {
            UiErrorCategory::NotFound
        } else if lower.contains("invalid")
            || lower.contains("expected")
            || lower.contains("unsupported")
            || lower.contains("limit")
        {
            UiErrorCategory::Validation
        } else if lower.contains("request failed")
            || lower.contains("connection")
            || lower.contains("timed out")
            || lower.contains("http")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Status-bar text for the error.
    pub fn summary(&self) -> String {
        let action = match self.context {
            UiErrorContext::BackendStartup => "Backend startup failed",
            UiErrorContext::LoadEvent => "Could not load the event",
            UiErrorContext::SubmitUpdate => "Could not submit the update",
            UiErrorContext::AttachBanner => "Could not attach the banner",
            UiErrorContext::General => "Error",
        };
        match self.category {
            UiErrorCategory::Auth => format!("{action}: not authorized; check the API token"),
            UiErrorCategory::Transport => {
                format!("{action}: server unreachable; check the GraphQL URL and network")
            }
            _ => format!("{action}: {}", self.message),
        }
    }
}
