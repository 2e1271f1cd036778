//! Process-wide event store holding the master copy of the selected event.

use std::sync::RwLock;

use shared::domain::Event;
use tokio::sync::broadcast;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAction {
    /// Replace the selected event wholesale. There is no field merge.
    UpdateSelectedEvent(Event),
    /// The events list shown elsewhere must be refetched.
    CallEventsApi,
}

pub trait EventStore: Send + Sync {
    fn dispatch(&self, action: StoreAction);
    fn selected_event(&self) -> Option<Event>;
    fn events_list_stale(&self) -> bool;
    /// Returns the stale flag and resets it; the events list calls this before refetching.
    fn take_events_refresh(&self) -> bool;
}

#[derive(Debug, Default)]
struct StoreState {
    selected_event: Option<Event>,
    call_events_api: bool,
}

pub struct InMemoryEventStore {
    state: RwLock<StoreState>,
    actions: broadcast::Sender<StoreAction>,
}

impl Default for InMemoryEventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        let (actions, _) = broadcast::channel(64);
        Self {
            state: RwLock::new(StoreState::default()),
            actions,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreAction> {
        self.actions.subscribe()
    }

    fn write(&self, apply: impl FnOnce(&mut StoreState)) {
        match self.state.write() {
            Ok(mut guard) => apply(&mut *guard),
            Err(poisoned) => apply(&mut *poisoned.into_inner()),
        }
    }

    fn read<T>(&self, view: impl FnOnce(&StoreState) -> T) -> T {
        match self.state.read() {
            Ok(guard) => view(&*guard),
            Err(poisoned) => view(&*poisoned.into_inner()),
        }
    }
}

impl EventStore for InMemoryEventStore {
    fn dispatch(&self, action: StoreAction) {
        match &action {
            StoreAction::UpdateSelectedEvent(event) => {
                debug!(event_id = %event.id, "store: replacing selected event");
                let event = event.clone();
                self.write(|state| state.selected_event = Some(event));
            }
            StoreAction::CallEventsApi => {
                debug!("store: events list marked stale");
                self.write(|state| state.call_events_api = true);
            }
        }
        // No subscribers is fine.
        let _ = self.actions.send(action);
    }

    fn selected_event(&self) -> Option<Event> {
        self.read(|state| state.selected_event.clone())
    }

    fn events_list_stale(&self) -> bool {
        self.read(|state| state.call_events_api)
    }

    fn take_events_refresh(&self) -> bool {
        let mut was_stale = false;
        self.write(|state| {
            was_stale = std::mem::replace(&mut state.call_events_api, false);
        });
        was_stale
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
