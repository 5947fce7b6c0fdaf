use hero_service::clients::HeroService;
use hero_service::framework::mock::MockTransport;
use hero_service::framework::{FrameworkError, HttpMethod, APPLICATION_JSON};
use hero_service::messages::MessageService;
use hero_service::model::{Hero, HeroCreate, HeroRef};
use serde_json::{json, Value};
use std::sync::Arc;

/// Service wired to a mock transport and a fresh message log.
fn setup() -> (HeroService, MockTransport, MessageService) {
    let mock = MockTransport::new();
    let messages = MessageService::new();
    let service = HeroService::new(mock.transport(), Arc::new(messages.clone()));
    (service, mock, messages)
}

fn offline() -> FrameworkError {
    FrameworkError::Transport("connection refused".to_string())
}

#[tokio::test]
async fn test_get_heroes_returns_collection() {
    let (service, mock, _) = setup();
    mock.expect_get("api/heroes").return_ok(json!([
        {"id": 11, "name": "Mr. Nice"},
        {"id": 12, "name": "Narco"}
    ]));

    let heroes = service.get_heroes().await;

    assert_eq!(heroes, vec![Hero::new(11, "Mr. Nice"), Hero::new(12, "Narco")]);
    mock.verify();
}

#[tokio::test]
async fn test_get_heroes_failure_resolves_to_empty() {
    let (service, mock, messages) = setup();
    mock.expect_get("api/heroes").return_err(offline());

    let heroes = service.get_heroes().await;

    assert!(heroes.is_empty());
    assert_eq!(
        messages.messages().last().map(String::as_str),
        Some("HeroService: get_heroes failed: Http failure: connection refused")
    );
}

#[tokio::test]
async fn test_search_blank_term_issues_no_request() {
    let (service, mock, messages) = setup();

    assert!(service.search_heroes("").await.is_empty());
    assert!(service.search_heroes("   ").await.is_empty());

    assert!(mock.requests().is_empty());
    assert!(messages.is_empty());
}

#[tokio::test]
async fn test_search_issues_one_get_with_query() {
    let (service, mock, messages) = setup();
    mock.expect_get("api/heroes/?name=abc")
        .return_ok(json!([{"id": 30, "name": "Abcdef"}]));

    let found = service.search_heroes("abc").await;

    assert_eq!(found, vec![Hero::new(30, "Abcdef")]);
    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(requests[0].url, "api/heroes/?name=abc");
    assert_eq!(
        messages.messages(),
        vec!["HeroService: found heroes matching \"abc\""]
    );
}

#[tokio::test]
async fn test_search_failure_resolves_to_empty() {
    let (service, mock, messages) = setup();
    mock.expect_get("api/heroes/?name=ma").return_err(offline());

    assert!(service.search_heroes("ma").await.is_empty());
    assert_eq!(
        messages.messages(),
        vec!["HeroService: search_heroes failed: Http failure: connection refused"]
    );
}

#[tokio::test]
async fn test_delete_by_id_and_by_hero_hit_same_url() {
    let (service, mock, messages) = setup();
    mock.expect_delete("api/heroes/5").return_ok(Value::Null);
    mock.expect_delete("api/heroes/5").return_ok(Value::Null);

    assert_eq!(service.delete_hero(5u64).await, Some(Value::Null));
    assert_eq!(
        service.delete_hero(Hero::new(5, "X")).await,
        Some(Value::Null)
    );

    let requests = mock.requests();
    assert!(requests
        .iter()
        .all(|r| r.method == HttpMethod::Delete && r.url == "api/heroes/5"));
    assert_eq!(
        requests[0].options.header("Content-Type"),
        Some(APPLICATION_JSON)
    );
    assert_eq!(
        messages.messages(),
        vec![
            "HeroService: deleted hero id=5",
            "HeroService: deleted hero id=5"
        ]
    );
    mock.verify();
}

#[tokio::test]
async fn test_delete_failure_resolves_to_none() {
    let (service, mock, messages) = setup();
    mock.expect_delete("api/heroes/8")
        .return_err(FrameworkError::status(500, "Internal Server Error"));

    assert_eq!(service.delete_hero(HeroRef::Id(8)).await, None);
    assert_eq!(
        messages.messages(),
        vec!["HeroService: delete_hero failed: Http failure response: 500 Internal Server Error"]
    );
}

#[tokio::test]
async fn test_update_puts_hero_with_json_header() {
    let (service, mock, messages) = setup();
    mock.expect_put("api/heroes").return_ok(Value::Null);
    let hero = Hero::new(12, "Narco II");

    let ack = service.update_hero(&hero).await;

    assert_eq!(ack, Some(Value::Null));
    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Put);
    assert_eq!(requests[0].url, "api/heroes");
    assert_eq!(requests[0].body, Some(json!({"id": 12, "name": "Narco II"})));
    assert_eq!(
        requests[0].options.header("Content-Type"),
        Some(APPLICATION_JSON)
    );
    assert_eq!(messages.messages(), vec!["HeroService: updated hero id=12"]);
}

#[tokio::test]
async fn test_update_failure_resolves_to_none() {
    let (service, mock, messages) = setup();
    mock.expect_put("api/heroes").return_err(offline());

    assert_eq!(service.update_hero(&Hero::new(12, "Narco")).await, None);
    assert_eq!(
        messages.messages(),
        vec!["HeroService: update_hero failed: Http failure: connection refused"]
    );
}

#[tokio::test]
async fn test_add_posts_and_returns_created_hero() {
    let (service, mock, messages) = setup();
    mock.expect_post("api/heroes")
        .return_ok(json!({"id": 21, "name": "Nova"}));

    let created = service.add_hero(HeroCreate::new("Nova")).await;

    assert_eq!(created, Some(Hero::new(21, "Nova")));
    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert_eq!(requests[0].url, "api/heroes");
    assert_eq!(requests[0].body, Some(json!({"name": "Nova"})));
    assert_eq!(
        requests[0].options.header("Content-Type"),
        Some(APPLICATION_JSON)
    );
    assert_eq!(messages.messages(), vec!["HeroService: added hero w/ id=21"]);
}

#[tokio::test]
async fn test_add_failure_resolves_to_none() {
    let (service, mock, messages) = setup();
    mock.expect_post("api/heroes").return_err(offline());

    assert_eq!(service.add_hero(HeroCreate::new("Nova")).await, None);
    assert_eq!(
        messages.messages(),
        vec!["HeroService: add_hero failed: Http failure: connection refused"]
    );
}

#[tokio::test]
async fn test_get_hero_success_and_failure() {
    let (service, mock, messages) = setup();
    mock.expect_get("api/heroes/7")
        .return_ok(json!({"id": 7, "name": "Seven"}));
    mock.expect_get("api/heroes/7").return_err(offline());

    assert_eq!(service.get_hero(7).await, Some(Hero::new(7, "Seven")));
    assert_eq!(service.get_hero(7).await, None);

    assert_eq!(
        messages.messages(),
        vec![
            "HeroService: fetch hero id = 7",
            "HeroService: fetched hero id=7",
            "HeroService: fetch hero id = 7",
            "HeroService: get_hero id=7 failed: Http failure: connection refused",
        ]
    );
    mock.verify();
}

#[tokio::test]
async fn test_malformed_payload_is_handled_like_any_failure() {
    let (service, mock, messages) = setup();
    mock.expect_get("api/heroes").return_ok(json!({"heroes": []}));

    assert!(service.get_heroes().await.is_empty());
    assert!(messages
        .messages()
        .last()
        .is_some_and(|m| m.starts_with("HeroService: get_heroes failed: Invalid response payload")));
}

#[tokio::test]
async fn test_nothing_is_sent_until_awaited() {
    let (service, mock, _) = setup();
    mock.expect_get("api/heroes").return_ok(json!([]));

    let pending = service.get_heroes();
    assert!(mock.requests().is_empty());

    pending.await;
    assert_eq!(mock.requests().len(), 1);
}
