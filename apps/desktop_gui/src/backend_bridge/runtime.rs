//! Backend worker: owns the tokio runtime and the event page, applies UI
//! commands to the session and reports projections back to the UI.

use std::{sync::Arc, thread};

use client_core::{
    encode_image_file, EditorSettings, EventGateway, EventPage, EventStore, GraphqlEventGateway,
    InMemoryEventStore, Notifier, RecordingNotifier, SubmitOutcome,
};
use crossbeam_channel::{Receiver, Sender};
use shared::{document::Document, domain::EventId};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

struct Worker {
    page: Arc<EventPage>,
    notifier: Arc<RecordingNotifier>,
    ui_tx: Sender<UiEvent>,
}

impl Worker {
    async fn publish(&self, reseed: bool) {
        for notice in self.notifier.drain() {
            let _ = self.ui_tx.try_send(UiEvent::Notice(notice));
        }
        let view = self.page.view().await;
        let _ = self.ui_tx.try_send(UiEvent::ViewUpdated { view, reseed });
    }

    fn report(&self, context: UiErrorContext, message: impl Into<String>) {
        let _ = self
            .ui_tx
            .try_send(UiEvent::Error(UiError::from_message(context, message)));
    }

    async fn handle(&self, cmd: BackendCommand) {
        let mut reseed = false;
        match cmd {
            BackendCommand::LoadEvent => {
                if let Err(err) = self.page.load().await {
                    self.report(UiErrorContext::LoadEvent, err.to_string());
                }
                reseed = true;
            }
            BackendCommand::SetTitle { text } => {
                self.page
                    .with_session(|session| session.set_title(Document::heading(text)))
                    .await;
            }
            BackendCommand::EditDescriptionBlock { index, text } => {
                let edited = self
                    .page
                    .with_session(|session| session.edit_description_block(index, text))
                    .await;
                if let Err(err) = edited {
                    // The UI drafts drifted from the document; resync them.
                    self.report(UiErrorContext::General, err.to_string());
                    reseed = true;
                }
            }
            BackendCommand::AddDescriptionParagraph => {
                self.page
                    .with_session(|session| session.add_description_paragraph())
                    .await;
            }
            BackendCommand::OpenImageModal => {
                self.page.with_session(|session| session.open_image_modal()).await;
            }
            BackendCommand::CloseImageModal => {
                self.page.with_session(|session| session.close_image_modal()).await;
            }
            BackendCommand::AttachBanner { path } => match encode_image_file(&path).await {
                Ok(image) => {
                    self.page
                        .with_session(|session| session.attach_images(vec![image]))
                        .await;
                }
                Err(err) => self.report(UiErrorContext::AttachBanner, format!("{err:#}")),
            },
            BackendCommand::OpenDatesModal => {
                self.page.with_session(|session| session.open_dates_modal()).await;
            }
            BackendCommand::CloseDatesModal => {
                self.page.with_session(|session| session.close_dates_modal()).await;
            }
            BackendCommand::ApplyDates { occurrences } => {
                // Rejections are surfaced through the notifier.
                let _ = self
                    .page
                    .with_session(|session| session.apply_date_edits(occurrences))
                    .await;
            }
            BackendCommand::DiscardChanges => {
                self.page.with_session(|session| session.discard_changes()).await;
                reseed = true;
            }
            BackendCommand::ConfirmUpdate => {
                self.spawn_submit();
            }
        }
        self.publish(reseed).await;
    }

    /// Runs the mutation off the command loop so repeated confirms reach the
    /// in-flight guard instead of queueing behind it.
    fn spawn_submit(&self) {
        let page = Arc::clone(&self.page);
        let notifier = Arc::clone(&self.notifier);
        let ui_tx = self.ui_tx.clone();
        tokio::spawn(async move {
            let worker = Worker {
                page,
                notifier,
                ui_tx,
            };
            match worker.page.submit().await {
                Ok(SubmitOutcome::Saved) => {
                    let _ = worker.ui_tx.try_send(UiEvent::Saved);
                    worker.publish(true).await;
                }
                Ok(SubmitOutcome::Failed) => worker.publish(false).await,
                Ok(SubmitOutcome::Ignored) => {
                    tracing::debug!("confirm ignored while an update is in flight");
                }
                Err(err) => {
                    worker.report(UiErrorContext::SubmitUpdate, err.to_string());
                    worker.publish(false).await;
                }
            }
        });
    }
}

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    event_id: EventId,
    settings: EditorSettings,
) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let gateway = match GraphqlEventGateway::from_settings(&settings) {
                Ok(gateway) => gateway,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        err.to_string(),
                    )));
                    tracing::error!("failed to build GraphQL gateway: {err}");
                    return;
                }
            };
            tracing::info!(endpoint = %gateway.endpoint(), event_id = %event_id, "backend worker ready");

            let notifier = Arc::new(RecordingNotifier::new());
            let worker = Worker {
                page: EventPage::new(
                    event_id,
                    Arc::new(gateway) as Arc<dyn EventGateway>,
                    Arc::new(InMemoryEventStore::new()) as Arc<dyn EventStore>,
                    Arc::clone(&notifier) as Arc<dyn Notifier>,
                ),
                notifier,
                ui_tx,
            };

            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), "backend: handling command");
                worker.handle(cmd).await;
            }
            tracing::info!("backend worker stopping; UI command channel closed");
        });
    });
}
