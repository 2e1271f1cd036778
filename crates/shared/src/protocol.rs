use serde::{Deserialize, Serialize};

use crate::{
    domain::{Event, EventId, ImageRef, Occurrence},
    error::ApiError,
};

pub const GET_EVENT_DETAILS: &str = r#"query($id: ID!) {
  event(id: $id) {
    id
    title
    description
    isOnline
    isLive
    images { url }
    user { name }
    venue { name }
    occurrences { startDate startTime endTime }
  }
}"#;

pub const UPDATE_EVENT: &str = r#"mutation($data: UpdateEventInput!) {
  updateEvent(data: $data) {
    event {
      id
      title
      description
      isOnline
      isLive
      images { url }
      occurrences { startDate startTime endTime }
    }
  }
}"#;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphqlRequest<V> {
    pub query: String,
    pub variables: V,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphqlResponse<D> {
    pub data: Option<D>,
    #[serde(default)]
    pub errors: Vec<ApiError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventQueryVariables {
    pub id: EventId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventQueryData {
    pub event: Option<Event>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEventVariables {
    pub data: UpdateEventInput,
}

/// Mutation input. `images` is only sent when the user attached new uploads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEventInput {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub occurrences: Vec<Occurrence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ImageRef>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventData {
    pub update_event: Option<UpdateEventPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEventPayload {
    pub event: Option<Event>,
}
