//! # Hero Service
//!
//! Provides a high-level API for the `api/heroes` collection.
//! It wraps a `ResourceClient<Hero>` and never returns an error: failures are
//! written to the message log and replaced with a fallback value.
use crate::framework::{ErrorReporter, HttpTransport, MessageSink, ResourceClient};
use crate::model::{Hero, HeroCreate, HeroRef};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument, Span};

/// Default collection path for heroes.
pub const HEROES_URL: &str = "api/heroes";

/// Client for the hero collection.
///
/// | Operation | Fallback |
/// |---|---|
/// | [`get_heroes`](Self::get_heroes), [`search_heroes`](Self::search_heroes) | empty `Vec` |
/// | [`get_hero`](Self::get_hero), [`update_hero`](Self::update_hero), [`add_hero`](Self::add_hero), [`delete_hero`](Self::delete_hero) | `None` |
#[derive(Clone)]
pub struct HeroService {
    inner: ResourceClient<Hero>,
    reporter: ErrorReporter,
}

impl HeroService {
    pub fn new(transport: Arc<dyn HttpTransport>, messages: Arc<dyn MessageSink>) -> Self {
        Self::with_collection_path(transport, messages, HEROES_URL)
    }

    pub fn with_collection_path(
        transport: Arc<dyn HttpTransport>,
        messages: Arc<dyn MessageSink>,
        collection_path: impl Into<String>,
    ) -> Self {
        Self {
            inner: ResourceClient::new(transport, collection_path),
            reporter: ErrorReporter::new(messages, "HeroService"),
        }
    }

    pub fn collection_path(&self) -> &str {
        self.inner.collection_path()
    }

    /// GET the whole collection.
    #[instrument(skip(self))]
    pub async fn get_heroes(&self) -> Vec<Hero> {
        self.reporter.log("fetch heroes");
        self.inner
            .list()
            .await
            .inspect(|_| self.reporter.log("fetched heroes"))
            .unwrap_or_else(self.reporter.handle_error("get_heroes", Vec::new()))
    }

    /// GET one hero by id. `None` when the request fails (including 404).
    #[instrument(skip(self))]
    pub async fn get_hero(&self, id: u64) -> Option<Hero> {
        self.reporter.log(format_args!("fetch hero id = {}", id));
        self.inner
            .get(id)
            .await
            .inspect(|_| self.reporter.log(format_args!("fetched hero id={}", id)))
            .map(Some)
            .unwrap_or_else(
                self.reporter
                    .handle_error(&format!("get_hero id={}", id), None),
            )
    }

    /// PUT the hero to the collection path. Resolves with the server's acknowledgement.
    #[instrument(skip(self, hero), fields(id = hero.id))]
    pub async fn update_hero(&self, hero: &Hero) -> Option<Value> {
        debug!(?hero, "update_hero called");
        self.inner
            .update(hero)
            .await
            .inspect(|_| self.reporter.log(format_args!("updated hero id={}", hero.id)))
            .map(Some)
            .unwrap_or_else(self.reporter.handle_error("update_hero", None))
    }

    /// POST a new hero. Resolves with the stored hero, carrying its server-assigned id.
    #[instrument(skip(self))]
    pub async fn add_hero(&self, hero: HeroCreate) -> Option<Hero> {
        self.inner
            .create(hero)
            .await
            .inspect(|created| {
                self.reporter
                    .log(format_args!("added hero w/ id={}", created.id))
            })
            .map(Some)
            .unwrap_or_else(self.reporter.handle_error("add_hero", None))
    }

    /// DELETE a hero, given either the record or its id.
    #[instrument(skip(self, hero), fields(id))]
    pub async fn delete_hero(&self, hero: impl Into<HeroRef>) -> Option<Value> {
        let id = hero.into().id();
        Span::current().record("id", id);
        self.inner
            .delete(id)
            .await
            .inspect(|_| self.reporter.log(format_args!("deleted hero id={}", id)))
            .map(Some)
            .unwrap_or_else(self.reporter.handle_error("delete_hero", None))
    }

    /// GET heroes whose name contains `term`.
    ///
    /// A blank term resolves to an empty list without issuing a request.
    #[instrument(skip(self))]
    pub async fn search_heroes(&self, term: &str) -> Vec<Hero> {
        if term.trim().is_empty() {
            return Vec::new();
        }
        self.inner
            .search("name", term)
            .await
            .inspect(|_| {
                self.reporter
                    .log(format_args!("found heroes matching \"{}\"", term))
            })
            .unwrap_or_else(self.reporter.handle_error("search_heroes", Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockTransport;
    use crate::framework::{FrameworkError, HttpMethod};
    use crate::messages::MessageService;
    use serde_json::json;

    fn service(mock: &MockTransport) -> (HeroService, MessageService) {
        let messages = MessageService::new();
        let service = HeroService::new(mock.transport(), Arc::new(messages.clone()));
        (service, messages)
    }

    #[tokio::test]
    async fn test_get_heroes_logs_before_and_after() {
        let mock = MockTransport::new();
        mock.expect_get("api/heroes")
            .return_ok(json!([{"id": 11, "name": "Mr. Nice"}]));
        let (service, messages) = service(&mock);

        let heroes = service.get_heroes().await;

        assert_eq!(heroes, vec![Hero::new(11, "Mr. Nice")]);
        assert_eq!(
            messages.messages(),
            vec!["HeroService: fetch heroes", "HeroService: fetched heroes"]
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_get_hero_failure_resolves_to_none() {
        let mock = MockTransport::new();
        mock.expect_get("api/heroes/7")
            .return_err(FrameworkError::status(404, "Not Found"));
        let (service, messages) = service(&mock);

        assert_eq!(service.get_hero(7).await, None);
        assert_eq!(
            messages.messages(),
            vec![
                "HeroService: fetch hero id = 7",
                "HeroService: get_hero id=7 failed: Http failure response: 404 Not Found",
            ]
        );
    }

    #[tokio::test]
    async fn test_custom_collection_path() {
        let mock = MockTransport::new();
        mock.expect_delete("v2/heroes/4").return_ok(Value::Null);
        let messages = MessageService::new();
        let service =
            HeroService::with_collection_path(mock.transport(), Arc::new(messages), "v2/heroes");

        assert_eq!(service.delete_hero(4u64).await, Some(Value::Null));
        assert_eq!(mock.requests()[0].method, HttpMethod::Delete);
    }
}
