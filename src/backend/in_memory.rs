//! # In-Memory Web API
//!
//! A REST backend that lives in a Tokio task instead of on a server, so the
//! services can be exercised end to end without a network.
//!
//! [`InMemoryApi`] is the "server" half: it owns the store and the receiving end
//! of a channel. [`InMemoryTransport`] is the "client" half and implements
//! [`HttpTransport`], so a service cannot tell it apart from a real HTTP client.
//!
//! ## Routes
//!
//! | Request | Response |
//! |---|---|
//! | `GET {collection}` | every item, ordered by id |
//! | `GET {collection}/{id}` | the item, or `404` |
//! | `GET {collection}/?field=term` | items whose `field` contains `term` |
//! | `POST {collection}` | the created item, with a generated id, or `507` when ids are exhausted |
//! | `PUT {collection}` | `null`; the item is replaced (or inserted) |
//! | `DELETE {collection}/{id}` | `null`, whether or not the item existed |

use crate::framework::{ApiEntity, FrameworkError, HttpMethod, HttpRequest, HttpTransport};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Type alias for the one-shot response channel used by the backend.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Message sent to the backend task: one request and where to answer it.
#[derive(Debug)]
pub struct ApiRequest {
    pub request: HttpRequest,
    pub respond_to: Response<Value>,
}

/// Where a request URL points inside the collection.
#[derive(Debug, PartialEq)]
enum Route<Id> {
    Collection,
    Item(Id),
    Query(Vec<(String, String)>),
}

// =============================================================================
// 1. THE BACKEND TASK
// =============================================================================

/// An in-memory REST collection.
///
/// **Concurrency Model**:
/// The task processes requests *sequentially*, so the store needs no lock.
pub struct InMemoryApi<T: ApiEntity> {
    receiver: mpsc::Receiver<ApiRequest>,
    collection_path: String,
    store: BTreeMap<T::Id, T>,
    next_id_fn: Box<dyn Fn(Option<&T::Id>) -> Option<T::Id> + Send + Sync>,
}

impl<T: ApiEntity> InMemoryApi<T> {
    /// Creates the backend and the transport that talks to it.
    ///
    /// `next_id_fn` receives the highest id currently stored and returns the id
    /// for the next created item, or `None` when no id is left.
    pub fn new(
        buffer_size: usize,
        collection_path: impl Into<String>,
        next_id_fn: impl Fn(Option<&T::Id>) -> Option<T::Id> + Send + Sync + 'static,
    ) -> (Self, InMemoryTransport) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let api = Self {
            receiver,
            collection_path: collection_path.into(),
            store: BTreeMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        (api, InMemoryTransport::new(sender))
    }

    /// Pre-populates the store. Later items replace earlier ones with the same id.
    pub fn with_seed(mut self, items: impl IntoIterator<Item = T>) -> Self {
        self.store
            .extend(items.into_iter().map(|item| (item.id(), item)));
        self
    }

    /// Runs the request loop until every transport has been dropped.
    pub async fn run(mut self) {
        let entity_type = entity_type::<T>();
        info!(entity_type, size = self.store.len(), "Backend started");

        while let Some(ApiRequest { request, respond_to }) = self.receiver.recv().await {
            debug!(entity_type, method = %request.method, url = %request.url, "Request");
            let result = self.handle(request);
            if let Err(e) = &result {
                warn!(entity_type, error = %e, "Request rejected");
            }
            let _ = respond_to.send(result);
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    fn handle(&mut self, request: HttpRequest) -> Result<Value, FrameworkError> {
        let entity_type = entity_type::<T>();
        let route = self.route(&request.url)?;

        match (request.method, route) {
            (HttpMethod::Get, Route::Collection) => to_json(&self.store.values().collect::<Vec<_>>()),
            (HttpMethod::Get, Route::Query(pairs)) => {
                let matches: Vec<&T> = self
                    .store
                    .values()
                    .filter(|item| {
                        pairs
                            .iter()
                            .all(|(field, term)| item.matches_query(field, term))
                    })
                    .collect();
                debug!(entity_type, found = matches.len(), "Search");
                to_json(&matches)
            }
            (HttpMethod::Get, Route::Item(id)) => match self.store.get(&id) {
                Some(item) => to_json(item),
                None => Err(not_found::<T>(&id)),
            },
            (HttpMethod::Post, Route::Collection) => {
                let params: T::CreateParams = from_body(request.body)?;
                let id = (self.next_id_fn)(self.store.keys().next_back()).ok_or_else(|| {
                    FrameworkError::status(507, format!("No {} id left to assign", entity_type))
                })?;
                let item = T::from_create_params(id.clone(), params);
                let body = to_json(&item)?;
                self.store.insert(id.clone(), item);
                info!(entity_type, %id, size = self.store.len(), "Created");
                Ok(body)
            }
            (HttpMethod::Put, Route::Collection) => {
                let item: T = from_body(request.body)?;
                let id = item.id();
                let replaced = self.store.insert(id.clone(), item).is_some();
                info!(entity_type, %id, replaced, "Updated");
                Ok(Value::Null)
            }
            (HttpMethod::Delete, Route::Item(id)) => {
                let removed = self.store.remove(&id).is_some();
                info!(entity_type, %id, removed, size = self.store.len(), "Deleted");
                Ok(Value::Null)
            }
            (method, _) => Err(FrameworkError::status(
                405,
                format!("{} not allowed on {}", method, request.url),
            )),
        }
    }

    fn route(&self, url: &str) -> Result<Route<T::Id>, FrameworkError> {
        let collection_missing = || {
            FrameworkError::status(404, format!("Collection '{}' not found", url))
        };
        let rest = url
            .trim_start_matches('/')
            .strip_prefix(self.collection_path.as_str())
            .ok_or_else(collection_missing)?;

        if rest.is_empty() || rest == "/" {
            return Ok(Route::Collection);
        }
        if let Some(query) = rest.strip_prefix("/?").or_else(|| rest.strip_prefix('?')) {
            return Ok(Route::Query(parse_query(query)));
        }
        match rest.strip_prefix('/') {
            Some(segment) if !segment.contains('/') => segment
                .parse::<T::Id>()
                .map(Route::Item)
                .map_err(|_| {
                    FrameworkError::status(
                        404,
                        format!("{} with id={} not found", entity_type::<T>(), segment),
                    )
                }),
            _ => Err(collection_missing()),
        }
    }
}

fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((field, term)) => (field.to_string(), term.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}

// Extract just the type name (e.g., "Hero" instead of "hero_service::model::hero::Hero")
fn entity_type<T>() -> &'static str {
    std::any::type_name::<T>()
        .split("::")
        .last()
        .unwrap_or("Unknown")
}

fn not_found<T: ApiEntity>(id: &T::Id) -> FrameworkError {
    FrameworkError::status(404, format!("{} with id={} not found", entity_type::<T>(), id))
}

fn to_json<S: serde::Serialize + ?Sized>(value: &S) -> Result<Value, FrameworkError> {
    serde_json::to_value(value).map_err(|e| FrameworkError::Decode(e.to_string()))
}

fn from_body<D: serde::de::DeserializeOwned>(body: Option<Value>) -> Result<D, FrameworkError> {
    let body = body.ok_or_else(|| FrameworkError::status(400, "Missing request body"))?;
    serde_json::from_value(body).map_err(|e| FrameworkError::status(400, e.to_string()))
}

// =============================================================================
// 2. THE TRANSPORT
// =============================================================================

/// [`HttpTransport`] that forwards every request to an [`InMemoryApi`] task.
#[derive(Clone)]
pub struct InMemoryTransport {
    sender: mpsc::Sender<ApiRequest>,
}

impl InMemoryTransport {
    pub fn new(sender: mpsc::Sender<ApiRequest>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl HttpTransport for InMemoryTransport {
    async fn send(&self, request: HttpRequest) -> Result<Value, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ApiRequest { request, respond_to })
            .await
            .map_err(|_| FrameworkError::BackendClosed)?;
        response.await.map_err(|_| FrameworkError::BackendDropped)?
    }
}
