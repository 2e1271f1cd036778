//! Async orchestration of one event page: a single fetch on load and guarded
//! submissions against the gateway.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use shared::domain::EventId;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use crate::{
    gateway::{EventGateway, GatewayError},
    notify::Notifier,
    session::{EditSession, PageView, SubmitError, SubmitOutcome},
    store::EventStore,
};

pub struct EventPage {
    gateway: Arc<dyn EventGateway>,
    session: Mutex<EditSession>,
    fetch_issued: AtomicBool,
}

impl EventPage {
    pub fn new(
        event_id: EventId,
        gateway: Arc<dyn EventGateway>,
        store: Arc<dyn EventStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Arc<Self> {
        Arc::new(Self {
            gateway,
            session: Mutex::new(EditSession::new(event_id, store, notifier)),
            fetch_issued: AtomicBool::new(false),
        })
    }

    /// Issues the page's one fetch. Later calls are no-ops. A failed fetch is
    /// logged and leaves the page loading; it is not surfaced to the user.
    pub async fn load(&self) -> Result<(), GatewayError> {
        if self.fetch_issued.swap(true, Ordering::SeqCst) {
            debug!("event page: fetch already issued");
            return Ok(());
        }

        let event_id = self.session.lock().await.event_id().clone();
        match self.gateway.fetch_event(&event_id).await {
            Ok(event) => {
                self.session.lock().await.apply_fetched(event);
                Ok(())
            }
            Err(err) => {
                error!(event_id = %event_id, error = %err, "event page: failed to load event");
                Err(err)
            }
        }
    }

    /// Sends the local edits. A call made while another is in flight returns
    /// `Ignored` without touching the backend.
    pub async fn submit(&self) -> Result<SubmitOutcome, SubmitError> {
        let input = match self.session.lock().await.begin_submit() {
            Ok(input) => input,
            Err(SubmitError::InFlight) => {
                debug!("event page: submit ignored, update already in flight");
                return Ok(SubmitOutcome::Ignored);
            }
            Err(err) => {
                warn!(error = %err, "event page: submit rejected");
                return Err(err);
            }
        };

        let result = self.gateway.update_event(input).await;
        Ok(self.session.lock().await.complete_submit(result))
    }

    pub async fn with_session<T>(&self, edit: impl FnOnce(&mut EditSession) -> T) -> T {
        let mut session = self.session.lock().await;
        edit(&mut session)
    }

    pub async fn view(&self) -> PageView {
        self.session.lock().await.view()
    }
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
