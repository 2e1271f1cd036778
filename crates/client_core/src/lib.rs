pub mod config;
pub mod dates;
pub mod gateway;
pub mod images;
pub mod notify;
pub mod page;
pub mod session;
pub mod store;

pub use config::{load_settings, EditorSettings, SettingsError};
pub use dates::DatesError;
pub use gateway::{EventGateway, GatewayError, GraphqlEventGateway};
pub use images::{encode_image_bytes, encode_image_file};
pub use notify::{Notice, NoticeLevel, Notifier, RecordingNotifier, TracingNotifier};
pub use page::EventPage;
pub use session::{EditSession, PageView, PendingImages, Phase, SubmitError, SubmitOutcome};
pub use store::{EventStore, InMemoryEventStore, StoreAction};

#[cfg(test)]
#[path = "tests/fixtures.rs"]
mod fixtures;
