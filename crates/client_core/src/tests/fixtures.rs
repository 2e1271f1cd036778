//! Shared builders and test doubles for the client_core test modules.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use shared::{
    document::Document,
    domain::{Event, EventId, ImageRef, Occurrence, Organizer, Venue},
    protocol::UpdateEventInput,
};
use tokio::sync::Notify;

use crate::gateway::{EventGateway, GatewayError};

pub const EVENT_ID: &str = "evt-1";

pub fn occurrence(date: &str, start: &str, end: &str) -> Occurrence {
    Occurrence::parse(date, start, end).expect("valid occurrence literal")
}

pub fn sample_event() -> Event {
    Event {
        id: EventId::new(EVENT_ID),
        title: "Rust meetup".to_string(),
        description: Some(
            Document::paragraph("Talks and pizza")
                .to_json_string()
                .expect("serialize description"),
        ),
        is_online: false,
        is_live: false,
        images: vec![ImageRef::hosted("https://cdn.example/banner.jpg")],
        user: Some(Organizer {
            name: "Ada".to_string(),
        }),
        venue: Some(Venue {
            name: "Town Hall".to_string(),
        }),
        occurrences: vec![
            occurrence("2024-05-02", "10:00", "11:00"),
            occurrence("2024-05-01", "09:00", "10:00"),
        ],
    }
}

/// What a server returns for a mutation: the submitted fields, uploads turned
/// into hosted URLs, and no organizer or venue.
pub fn echo_update(input: &UpdateEventInput) -> Event {
    let images = match &input.images {
        Some(images) => images
            .iter()
            .enumerate()
            .map(|(idx, _)| ImageRef::hosted(format!("https://cdn.example/uploads/{idx}.jpg")))
            .collect(),
        None => vec![ImageRef::hosted("https://cdn.example/banner.jpg")],
    };
    Event {
        id: input.id.clone(),
        title: input.title.clone(),
        description: Some(input.description.clone()),
        is_online: false,
        is_live: false,
        images,
        user: None,
        venue: None,
        occurrences: input.occurrences.clone(),
    }
}

type FetchFn = Box<dyn Fn(&EventId) -> Result<Event, GatewayError> + Send + Sync>;
type UpdateFn = Box<dyn Fn(&UpdateEventInput) -> Result<Event, GatewayError> + Send + Sync>;

pub struct MockGateway {
    fetch: FetchFn,
    update: UpdateFn,
    pub fetch_calls: AtomicUsize,
    pub updates: Mutex<Vec<UpdateEventInput>>,
    release_update: Option<Arc<Notify>>,
}

impl MockGateway {
    pub fn serving(event: Event) -> Self {
        Self {
            fetch: Box::new(move |_: &EventId| Ok(event.clone())),
            update: Box::new(|input: &UpdateEventInput| Ok(echo_update(input))),
            fetch_calls: AtomicUsize::new(0),
            updates: Mutex::new(Vec::new()),
            release_update: None,
        }
    }

    pub fn failing_fetch() -> Self {
        let mut gateway = Self::serving(sample_event());
        gateway.fetch = Box::new(|id: &EventId| Err(GatewayError::NotFound(id.clone())));
        gateway
    }

    pub fn failing_update(mut self) -> Self {
        self.update = Box::new(|_: &UpdateEventInput| Err(GatewayError::MissingPayload("updateEvent")));
        self
    }

    /// Holds every update until the returned handle is notified.
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.release_update = Some(Arc::clone(&gate));
        (self, gate)
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().expect("updates lock").len()
    }

    pub fn last_update(&self) -> Option<UpdateEventInput> {
        self.updates.lock().expect("updates lock").last().cloned()
    }
}

#[async_trait]
impl EventGateway for MockGateway {
    async fn fetch_event(&self, id: &EventId) -> Result<Event, GatewayError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        (self.fetch)(id)
    }

    async fn update_event(&self, input: UpdateEventInput) -> Result<Event, GatewayError> {
        self.updates
            .lock()
            .expect("updates lock")
            .push(input.clone());
        if let Some(gate) = &self.release_update {
            gate.notified().await;
        }
        (self.update)(&input)
    }
}
