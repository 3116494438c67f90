//! # People Client
//!
//! Wraps a [`ServiceClient`] and exposes requests against the `People` set.

use async_trait::async_trait;
use odata_recipe::framework::{EntitySetClient, FrameworkError, ServiceClient, ServiceResponse};
use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::model::NAMESPACE;

#[derive(Debug, Error)]
pub enum PeopleError {
    #[error("Service unavailable: {0}")]
    Service(String),

    #[error("Request rejected with status {status}: {body}")]
    Rejected { status: u16, body: JsonValue },
}

/// Client for the `People` set.
#[derive(Clone)]
pub struct PeopleClient {
    inner: ServiceClient,
}

impl PeopleClient {
    pub fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl EntitySetClient for PeopleClient {
    type Error = PeopleError;

    fn inner(&self) -> &ServiceClient {
        &self.inner
    }

    fn set_name(&self) -> &str {
        "People"
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        PeopleError::Service(e.to_string())
    }
}

impl PeopleClient {
    /// Creates a person and returns the new entity's URI.
    #[instrument(skip(self, body))]
    pub async fn create_person(&self, body: JsonValue) -> Result<String, PeopleError> {
        debug!(?body, "create_person called");
        let response = self.inner.post("People", body).await.map_err(Self::map_error)?;
        let response = accepted(response)?;
        Ok(response.location().unwrap_or_default().to_string())
    }

    /// Invokes an action bound to `People(key)`, optionally through a type cast.
    #[instrument(skip(self, parameters))]
    pub async fn invoke(
        &self,
        key: i32,
        cast: Option<&str>,
        action: &str,
        parameters: JsonValue,
    ) -> Result<ServiceResponse, PeopleError> {
        debug!("Sending request");
        let mut uri = format!("People({key})");
        if let Some(cast) = cast {
            uri.push_str(&format!("/{NAMESPACE}.{cast}"));
        }
        uri.push_str(&format!("/{NAMESPACE}.{action}"));
        let response = self.inner.post(uri, parameters).await.map_err(Self::map_error)?;
        accepted(response)
    }
}

fn accepted(response: ServiceResponse) -> Result<ServiceResponse, PeopleError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(PeopleError::Rejected {
            status: response.status,
            body: response.json(),
        })
    }
}
