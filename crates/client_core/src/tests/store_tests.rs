use super::*;
use crate::fixtures::sample_event;

#[test]
fn replacement_swaps_the_whole_event() {
    let store = InMemoryEventStore::new();
    assert_eq!(store.selected_event(), None);

    let first = sample_event();
    store.dispatch(StoreAction::UpdateSelectedEvent(first.clone()));
    assert_eq!(store.selected_event(), Some(first.clone()));

    let mut second = first;
    second.title = "Renamed".to_string();
    second.venue = None;
    store.dispatch(StoreAction::UpdateSelectedEvent(second.clone()));
    assert_eq!(store.selected_event(), Some(second));
}

#[test]
fn events_refresh_flag_is_taken_once() {
    let store = InMemoryEventStore::new();
    assert!(!store.events_list_stale());

    store.dispatch(StoreAction::CallEventsApi);
    assert!(store.events_list_stale());
    assert!(store.take_events_refresh());
    assert!(!store.take_events_refresh());
    assert!(!store.events_list_stale());
}

#[tokio::test]
async fn subscribers_observe_dispatched_actions_in_order() {
    let store = InMemoryEventStore::new();
    let mut actions = store.subscribe();
    let event = sample_event();

    store.dispatch(StoreAction::UpdateSelectedEvent(event.clone()));
    store.dispatch(StoreAction::CallEventsApi);

    assert_eq!(
        actions.recv().await.expect("first action"),
        StoreAction::UpdateSelectedEvent(event)
    );
    assert_eq!(
        actions.recv().await.expect("second action"),
        StoreAction::CallEventsApi
    );
}
