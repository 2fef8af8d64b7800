//! Wiremock integration tests for the OpenDota client.

use std::sync::Arc;
use std::time::Duration;

use courier::providers::{MatchSource, OpenDotaClient};
use courier::CourierError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn hero_stats_json() -> serde_json::Value {
    serde_json::json!([
        {
            "id": 1,
            "name": "npc_dota_hero_antimage",
            "localized_name": "Anti-Mage",
            "primary_attr": "agi",
            "attack_type": "Melee",
            "roles": ["Carry", "Escape", "Nuker"],
            "img": "/apps/dota2/images/dota_react/heroes/antimage.png?",
            "icon": "/apps/dota2/images/dota_react/heroes/icons/antimage.png?",
            "pub_pick": 1000,
            "pub_win": 480
        },
        {
            "id": 2,
            "name": "npc_dota_hero_axe",
            "localized_name": "Axe",
            "primary_attr": "str",
            "attack_type": "Melee",
            "roles": ["Initiator", "Durable", "Disabler", "Carry"],
            "img": "/apps/dota2/images/dota_react/heroes/axe.png?",
            "icon": "/apps/dota2/images/dota_react/heroes/icons/axe.png?",
            "pub_pick": 2000,
            "pub_win": 1040
        }
    ])
}

fn match_json() -> serde_json::Value {
    serde_json::json!({
        "match_id": 7891234567u64,
        "radiant_win": true,
        "duration": 2052,
        "radiant_score": 41,
        "dire_score": 22,
        "players": [{
            "personaname": "someone",
            "hero_id": 1,
            "player_slot": 0,
            "isRadiant": true,
            "kills": 12,
            "deaths": 2,
            "assists": 7,
            "item_0": 1,
            "item_1": 0
        }]
    })
}

fn client(server: &MockServer) -> OpenDotaClient {
    OpenDotaClient::with_base_url(reqwest::Client::new(), server.uri())
}

#[tokio::test]
async fn hero_stats_are_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/heroStats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hero_stats_json()))
        .expect(1)
        .mount(&server)
        .await;

    let heroes = client(&server).fetch_hero_stats().await.unwrap();
    assert_eq!(heroes.len(), 2);
    assert_eq!(heroes[1].localized_name, "Axe");
    assert_eq!(heroes[1].pub_win, 1040);
}

#[tokio::test]
async fn hero_stats_are_fetched_once_within_ttl() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/heroStats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hero_stats_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let first = client.fetch_hero_stats().await.unwrap();
    let second = client.fetch_hero_stats().await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn zero_ttl_refetches_every_time() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/heroStats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hero_stats_json()))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server).cache_ttl(Duration::ZERO);
    client.fetch_hero_stats().await.unwrap();
    client.fetch_hero_stats().await.unwrap();
}

#[tokio::test]
async fn hero_stats_server_error_is_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/heroStats"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server).fetch_hero_stats().await.unwrap_err();
    assert!(
        matches!(err, CourierError::Upstream { status: 500, .. }),
        "got {err:?}"
    );
    assert!(err.is_upstream());
}

#[tokio::test]
async fn failed_hero_stats_are_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/heroStats"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/heroStats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hero_stats_json()))
        .mount(&server)
        .await;

    let client = client(&server);
    assert!(client.fetch_hero_stats().await.is_err());
    assert_eq!(client.fetch_hero_stats().await.unwrap().len(), 2);
}

#[tokio::test]
async fn malformed_hero_stats_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/heroStats"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client(&server).fetch_hero_stats().await.unwrap_err();
    assert!(matches!(err, CourierError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn match_is_fetched_uncached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/matches/7891234567"))
        .respond_with(ResponseTemplate::new(200).set_body_json(match_json()))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server);
    let detail = client.fetch_match("7891234567").await.unwrap();
    assert_eq!(detail.match_id, 7_891_234_567);
    assert_eq!(detail.players[0].is_radiant, Some(true));
    assert_eq!(detail.players[0].item_1, Some(0));

    // Through the trait seam as well.
    let source: &dyn MatchSource = &client;
    assert_eq!(source.name(), "opendota");
    source.fetch_match("7891234567").await.unwrap();
}

#[tokio::test]
async fn match_404_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/matches/1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({"error": "Not Found"})))
        .mount(&server)
        .await;

    let err = client(&server).fetch_match("1").await.unwrap_err();
    assert!(matches!(err, CourierError::NotFound(_)), "got {err:?}");
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn match_error_body_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/matches/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"error": "Not Found"})))
        .mount(&server)
        .await;

    let err = client(&server).fetch_match("2").await.unwrap_err();
    assert!(matches!(err, CourierError::NotFound(_)), "got {err:?}");
}

#[tokio::test]
async fn match_server_error_is_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/matches/3"))
        .respond_with(ResponseTemplate::new(503).set_body_string("try later"))
        .mount(&server)
        .await;

    let err = client(&server).fetch_match("3").await.unwrap_err();
    match err {
        CourierError::Upstream { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "Service Unavailable: try later");
        }
        other => panic!("expected Upstream, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_match_id_never_reaches_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server).fetch_match("abc").await.unwrap_err();
    assert!(matches!(err, CourierError::InvalidInput(_)), "got {err:?}");
}

#[tokio::test]
async fn match_with_null_stats_is_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/matches/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "match_id": 1,
            "radiant_win": true,
            "duration": 1800,
            "players": [{"hero_id": 1, "player_slot": 0, "net_worth": null, "hero_damage": null}]
        })))
        .mount(&server)
        .await;

    let detail = client(&server).fetch_match("1").await.unwrap();
    assert_eq!(detail.players[0].net_worth, 0);
    assert_eq!(detail.players[0].hero_damage, 0);
}

#[tokio::test]
async fn mistyped_match_field_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/matches/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "match_id": 4,
            "players": [{"kills": "seven"}]
        })))
        .mount(&server)
        .await;

    let err = client(&server).fetch_match("4").await.unwrap_err();
    match err {
        CourierError::Parse(message) => {
            assert!(message.starts_with("match 4: "), "{message}");
            assert!(message.contains("invalid type"), "{message}");
        }
        other => panic!("expected Parse, got {other:?}"),
    }
}
