use super::*;

use std::sync::atomic::Ordering;

use shared::{document::Document, domain::Event};

use crate::{
    dates,
    fixtures::{sample_event, MockGateway, EVENT_ID},
    notify::{NoticeLevel, RecordingNotifier},
    session::Phase,
    store::InMemoryEventStore,
};

struct PageHarness {
    page: Arc<EventPage>,
    gateway: Arc<MockGateway>,
    store: Arc<InMemoryEventStore>,
    notifier: Arc<RecordingNotifier>,
}

fn page_with(gateway: MockGateway) -> PageHarness {
    let gateway = Arc::new(gateway);
    let store = Arc::new(InMemoryEventStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let page = EventPage::new(
        EventId::new(EVENT_ID),
        Arc::clone(&gateway) as Arc<dyn EventGateway>,
        Arc::clone(&store) as Arc<dyn EventStore>,
        Arc::clone(&notifier) as Arc<dyn Notifier>,
    );
    PageHarness {
        page,
        gateway,
        store,
        notifier,
    }
}

#[tokio::test]
async fn load_issues_exactly_one_fetch() {
    let h = page_with(MockGateway::serving(sample_event()));

    h.page.load().await.expect("load");
    h.page.load().await.expect("second load is a no-op");

    assert_eq!(h.gateway.fetch_calls.load(Ordering::SeqCst), 1);
    let view = h.page.view().await;
    assert_eq!(view.phase, Phase::Synced);
    assert_eq!(
        view.occurrences,
        dates::normalize(&sample_event().occurrences)
    );
    assert_eq!(h.store.selected_event(), Some(sample_event()));
}

#[tokio::test]
async fn failed_fetch_is_logged_not_notified() {
    let h = page_with(MockGateway::failing_fetch());

    let err = h.page.load().await.expect_err("fetch fails");
    assert!(matches!(err, GatewayError::NotFound(_)));

    assert_eq!(h.page.view().await.phase, Phase::Loading);
    assert_eq!(h.store.selected_event(), None);
    assert!(h.notifier.drain().is_empty());
}

#[tokio::test]
async fn submit_before_load_is_rejected() {
    let h = page_with(MockGateway::serving(sample_event()));
    let err = h.page.submit().await.expect_err("not loaded");
    assert!(matches!(err, SubmitError::NotLoaded));
    assert_eq!(h.gateway.update_count(), 0);
}

#[tokio::test]
async fn successful_submit_leaves_master_and_local_equal_to_response() {
    let h = page_with(MockGateway::serving(sample_event()));
    h.page.load().await.expect("load");
    h.page
        .with_session(|session| session.set_title(Document::heading("Renamed")))
        .await;
    assert_eq!(h.page.view().await.phase, Phase::Dirty);

    let outcome = h.page.submit().await.expect("submit");
    assert_eq!(outcome, SubmitOutcome::Saved);

    let sent = h.gateway.last_update().expect("update sent");
    assert_eq!(sent.title, "Renamed");
    assert_eq!(sent.images, None);

    let master: Event = h.store.selected_event().expect("master copy");
    assert_eq!(master.title, "Renamed");
    let view = h.page.view().await;
    assert_eq!(view.phase, Phase::Synced);
    assert_eq!(view.title, master.title);
    assert_eq!(view.occurrences, master.occurrences);
    assert!(h.store.take_events_refresh());

    let notices = h.notifier.drain();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Success);
}

#[tokio::test]
async fn failed_submit_keeps_edits_for_manual_retry() {
    let h = page_with(MockGateway::serving(sample_event()).failing_update());
    h.page.load().await.expect("load");
    h.page
        .with_session(|session| session.set_title(Document::heading("Renamed")))
        .await;

    let outcome = h.page.submit().await.expect("submit");
    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(h.page.view().await.phase, Phase::Dirty);
    assert_eq!(h.store.selected_event(), Some(sample_event()));

    let retry = h.page.submit().await.expect("retry");
    assert_eq!(retry, SubmitOutcome::Failed);
    assert_eq!(h.gateway.update_count(), 2);
}

#[tokio::test]
async fn overlapping_submit_is_ignored_while_in_flight() {
    let (gateway, release) = MockGateway::serving(sample_event()).gated();
    let h = page_with(gateway);
    h.page.load().await.expect("load");
    h.page
        .with_session(|session| session.set_title(Document::heading("Once")))
        .await;

    let first = tokio::spawn({
        let page = Arc::clone(&h.page);
        async move { page.submit().await }
    });
    while h.gateway.update_count() == 0 {
        tokio::task::yield_now().await;
    }
    assert!(h.page.view().await.submitting);

    let second = h.page.submit().await.expect("second submit");
    assert_eq!(second, SubmitOutcome::Ignored);

    release.notify_one();
    let first = first.await.expect("join").expect("first submit");
    assert_eq!(first, SubmitOutcome::Saved);
    assert_eq!(h.gateway.update_count(), 1);
    assert!(!h.page.view().await.submitting);
}
