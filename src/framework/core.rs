//! # Core Resource Framework
//!
//! This module defines the generic building blocks for talking to a REST collection.
//!
//! ## Key Types
//!
//! - [`ApiEntity`]: The trait that all resource types must implement.
//! - [`HttpTransport`]: The request-issuing capability the clients are built on.
//! - [`ResourceClient`]: The generic typed client for one collection path.
//! - [`MessageSink`]: The fire-and-forget log collaborator.
//! - [`FrameworkError`]: Request failures (transport, status, decode, backend closed).

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

// =============================================================================
// 1. THE ABSTRACTION (Entity trait and collaborator interfaces)
// =============================================================================

/// Trait that any resource type must implement to be addressed through a [`ResourceClient`].
///
/// # Architecture Note
/// By defining a contract (`ApiEntity`) that every resource record satisfies, the
/// URL building, serialization and decoding logic is written *once* in
/// [`ResourceClient`] and reused for every collection.
///
/// The associated types keep payloads honest: a `Hero` collection takes a
/// `HeroCreate` body on create, and the compiler rejects anything else.
pub trait ApiEntity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The identifying key appended to the collection path (e.g. `api/heroes/11`).
    type Id: Eq + Hash + Ord + Clone + Send + Sync + Display + Debug + FromStr + 'static;

    /// The body sent when creating a new instance. The server assigns the id.
    type CreateParams: Serialize + DeserializeOwned + Send + Sync + Debug;

    /// The identifying key of this record.
    fn id(&self) -> Self::Id;

    /// Build the full record from a server-assigned id and a create payload.
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Self;

    /// Whether this record matches a `?field=term` query.
    ///
    /// Used by backends that answer search requests themselves.
    fn matches_query(&self, field: &str, term: &str) -> bool;
}

/// The log collaborator: receives human-readable progress and failure messages.
pub trait MessageSink: Send + Sync {
    fn add_message(&self, message: &str);
}

// =============================================================================
// 2. REQUESTS & ERRORS
// =============================================================================

/// Errors that can occur while issuing a request.
///
/// Callers of the domain services never see these; they are rendered into
/// the message log by the fallback policy.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum FrameworkError {
    #[error("Http failure: {0}")]
    Transport(String),
    #[error("Http failure response: {status} {message}")]
    Status { status: u16, message: String },
    #[error("Invalid response payload: {0}")]
    Decode(String),
    #[error("Backend closed")]
    BackendClosed,
    #[error("Backend dropped response channel")]
    BackendDropped,
}

impl FrameworkError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        FrameworkError::Status {
            status,
            message: message.into(),
        }
    }
}

/// HTTP verbs used by the resource clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        };
        f.write_str(verb)
    }
}

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// Per-request options. Only headers are supported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    /// Options carrying `Content-Type: application/json`, used for every write.
    pub fn json() -> Self {
        Self::default().with_header(CONTENT_TYPE, APPLICATION_JSON)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A fully described request, relative to the transport's base.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Value>,
    pub options: RequestOptions,
}

/// The request-issuing capability.
///
/// Implementors only provide [`send`](HttpTransport::send); the verb helpers are
/// provided methods so every transport (reqwest, in-memory, mock) sees the same
/// request shape.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue one request and resolve with the decoded JSON body (`Null` when empty).
    async fn send(&self, request: HttpRequest) -> Result<Value, FrameworkError>;

    async fn get(&self, url: &str) -> Result<Value, FrameworkError> {
        self.send(HttpRequest {
            method: HttpMethod::Get,
            url: url.to_string(),
            body: None,
            options: RequestOptions::default(),
        })
        .await
    }

    async fn post(&self, url: &str, body: Value, options: &RequestOptions) -> Result<Value, FrameworkError> {
        self.send(HttpRequest {
            method: HttpMethod::Post,
            url: url.to_string(),
            body: Some(body),
            options: options.clone(),
        })
        .await
    }

    async fn put(&self, url: &str, body: Value, options: &RequestOptions) -> Result<Value, FrameworkError> {
        self.send(HttpRequest {
            method: HttpMethod::Put,
            url: url.to_string(),
            body: Some(body),
            options: options.clone(),
        })
        .await
    }

    async fn delete(&self, url: &str, options: &RequestOptions) -> Result<Value, FrameworkError> {
        self.send(HttpRequest {
            method: HttpMethod::Delete,
            url: url.to_string(),
            body: None,
            options: options.clone(),
        })
        .await
    }
}

// =============================================================================
// 3. THE GENERIC CLIENT
// =============================================================================

/// A type-safe client for one REST collection.
///
/// Holds nothing but the collection path and a shared handle to the transport,
/// so cloning is cheap and every call is independent.
#[derive(Clone)]
pub struct ResourceClient<T: ApiEntity> {
    transport: Arc<dyn HttpTransport>,
    collection_path: String,
    _entity: std::marker::PhantomData<fn() -> T>,
}

impl<T: ApiEntity> ResourceClient<T> {
    pub fn new(transport: Arc<dyn HttpTransport>, collection_path: impl Into<String>) -> Self {
        Self {
            transport,
            collection_path: collection_path.into(),
            _entity: std::marker::PhantomData,
        }
    }

    pub fn collection_path(&self) -> &str {
        &self.collection_path
    }

    /// `{collection}/{id}`
    pub fn item_url(&self, id: &T::Id) -> String {
        format!("{}/{}", self.collection_path, id)
    }

    /// `{collection}/?{field}={term}`. The term is interpolated as given.
    pub fn search_url(&self, field: &str, term: &str) -> String {
        format!("{}/?{}={}", self.collection_path, field, term)
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        let body = self.transport.get(&self.collection_path).await?;
        decode(body)
    }

    pub async fn get(&self, id: T::Id) -> Result<T, FrameworkError> {
        let body = self.transport.get(&self.item_url(&id)).await?;
        decode(body)
    }

    /// PUT the whole record to the collection path. Resolves with the raw acknowledgement.
    pub async fn update(&self, item: &T) -> Result<Value, FrameworkError> {
        debug!(?item, "Update");
        self.transport
            .put(&self.collection_path, encode(item)?, &RequestOptions::json())
            .await
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T, FrameworkError> {
        debug!(?params, "Create");
        let body = self
            .transport
            .post(&self.collection_path, encode(&params)?, &RequestOptions::json())
            .await?;
        decode(body)
    }

    pub async fn delete(&self, id: T::Id) -> Result<Value, FrameworkError> {
        self.transport
            .delete(&self.item_url(&id), &RequestOptions::json())
            .await
    }

    pub async fn search(&self, field: &str, term: &str) -> Result<Vec<T>, FrameworkError> {
        let body = self.transport.get(&self.search_url(field, term)).await?;
        decode(body)
    }
}

fn encode<S: Serialize>(value: &S) -> Result<Value, FrameworkError> {
    serde_json::to_value(value).map_err(|e| FrameworkError::Decode(e.to_string()))
}

fn decode<D: DeserializeOwned>(body: Value) -> Result<D, FrameworkError> {
    serde_json::from_value(body).map_err(|e| FrameworkError::Decode(e.to_string()))
}

// =============================================================================
// 4. EXAMPLE USAGE (Test)
// =============================================================================
