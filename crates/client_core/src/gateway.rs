//! Remote data gateway: the fetch-by-id query and the update mutation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::{Event, EventId},
    error::ApiError,
    protocol::{
        EventQueryData, EventQueryVariables, GraphqlRequest, GraphqlResponse, UpdateEventData,
        UpdateEventInput, UpdateEventVariables, GET_EVENT_DETAILS, UPDATE_EVENT,
    },
};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::EditorSettings;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid GraphQL endpoint '{endpoint}': {source}")]
    Endpoint {
        endpoint: String,
        source: url::ParseError,
    },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with HTTP {0}")]
    Status(StatusCode),
    #[error("server rejected the request: {}", join_messages(.0))]
    Graphql(Vec<ApiError>),
    #[error("event {0} was not found")]
    NotFound(EventId),
    #[error("response is missing `{0}`")]
    MissingPayload(&'static str),
}

fn join_messages(errors: &[ApiError]) -> String {
    errors
        .iter()
        .map(|err| err.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Backend access used by the event page. Each call resolves exactly once and
/// never retries.
#[async_trait]
pub trait EventGateway: Send + Sync {
    async fn fetch_event(&self, id: &EventId) -> Result<Event, GatewayError>;
    async fn update_event(&self, input: UpdateEventInput) -> Result<Event, GatewayError>;
}

pub struct GraphqlEventGateway {
    http: Client,
    endpoint: Url,
    auth_token: Option<String>,
}

impl GraphqlEventGateway {
    pub fn new(endpoint: &str) -> Result<Self, GatewayError> {
        Self::with_client(Client::new(), endpoint, None)
    }

    pub fn from_settings(settings: &EditorSettings) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;
        Self::with_client(http, &settings.graphql_url, settings.api_token.clone())
    }

    fn with_client(
        http: Client,
        endpoint: &str,
        auth_token: Option<String>,
    ) -> Result<Self, GatewayError> {
        let endpoint = Url::parse(endpoint).map_err(|source| GatewayError::Endpoint {
            endpoint: endpoint.to_string(),
            source,
        })?;
        Ok(Self {
            http,
            endpoint,
            auth_token,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn execute<V, D>(&self, query: &str, variables: V) -> Result<D, GatewayError>
    where
        V: Serialize + Send,
        D: DeserializeOwned,
    {
        let mut request = self.http.post(self.endpoint.clone()).json(&GraphqlRequest {
            query: query.to_string(),
            variables,
        });
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let res = request.send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status));
        }

        let body: GraphqlResponse<D> = res.json().await?;
        if !body.errors.is_empty() {
            return Err(GatewayError::Graphql(body.errors));
        }
        body.data.ok_or(GatewayError::MissingPayload("data"))
    }
}

#[async_trait]
impl EventGateway for GraphqlEventGateway {
    async fn fetch_event(&self, id: &EventId) -> Result<Event, GatewayError> {
        debug!(event_id = %id, "gateway: fetching event");
        let data: EventQueryData = self
            .execute(GET_EVENT_DETAILS, EventQueryVariables { id: id.clone() })
            .await?;
        data.event.ok_or_else(|| GatewayError::NotFound(id.clone()))
    }

    async fn update_event(&self, input: UpdateEventInput) -> Result<Event, GatewayError> {
        debug!(
            event_id = %input.id,
            occurrences = input.occurrences.len(),
            with_images = input.images.is_some(),
            "gateway: submitting update"
        );
        let data: UpdateEventData = self
            .execute(UPDATE_EVENT, UpdateEventVariables { data: input })
            .await?;
        data.update_event
            .ok_or(GatewayError::MissingPayload("updateEvent"))?
            .event
            .ok_or(GatewayError::MissingPayload("updateEvent.event"))
    }
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;
