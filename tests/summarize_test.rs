//! Tests for the match summarizer over a mock match source.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use courier::providers::MatchSource;
use courier::{
    CourierError, ItemCatalog, MatchDetail, MatchReport, MatchSummarizer, PlayerDetail, Result,
    Side,
};

// ============================================================================
// Mock source
// ============================================================================

enum Reply {
    Match(MatchDetail),
    NotFound,
    Down,
}

struct MockSource {
    reply: Reply,
    calls: AtomicU32,
}

impl MockSource {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicU32::new(0),
        })
    }
}

#[async_trait]
impl MatchSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_match(&self, match_id: &str) -> Result<MatchDetail> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Reply::Match(detail) => Ok(detail.clone()),
            Reply::NotFound => Err(CourierError::NotFound(format!("match {match_id}"))),
            Reply::Down => Err(CourierError::Upstream {
                status: 502,
                message: "Bad Gateway".to_string(),
            }),
        }
    }
}

fn sample_match() -> MatchDetail {
    MatchDetail {
        match_id: 7_891_234_567,
        radiant_win: true,
        duration: 2581,
        radiant_score: 38,
        dire_score: 19,
        players: vec![
            PlayerDetail {
                personaname: Some("Topson".to_string()),
                hero_id: 11,
                player_slot: 0,
                kills: 14,
                deaths: 3,
                assists: 9,
                last_hits: 412,
                denies: 21,
                gold_per_min: 741,
                xp_per_min: 802,
                net_worth: 31_250,
                hero_damage: 45_120,
                tower_damage: 8_004,
                level: 27,
                item_0: Some(63),
                item_1: Some(116),
                item_2: Some(0),
                item_3: Some(35),
                item_neutral: Some(9999),
                ..Default::default()
            },
            PlayerDetail {
                personaname: None,
                hero_id: 5,
                player_slot: 132,
                ..Default::default()
            },
        ],
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn summarizes_fetched_match() {
    let source = MockSource::new(Reply::Match(sample_match()));
    let summarizer = MatchSummarizer::new(source.clone());

    let report = summarizer.summarize_match("7891234567").await.unwrap();
    let summary = report.summary().expect("summary");

    assert_eq!(summary.match_id, "7891234567");
    assert_eq!(summary.outcome, "Radiant Victory");
    assert_eq!(summary.duration, "43:01");
    assert_eq!(summary.duration_secs, 2581);
    assert_eq!((summary.radiant_score, summary.dire_score), (38, 19));

    let mid = &summary.players[0];
    assert_eq!(mid.name, "Topson");
    assert_eq!(mid.hero, "Shadow Fiend");
    assert_eq!(mid.side, Side::Radiant);
    assert_eq!(mid.kda, "14/3/9");
    assert_eq!(mid.gold_per_min, 741);
    assert_eq!(
        mid.items,
        vec!["Power Treads", "Black King Bar", "Unknown Item 35"]
    );
    assert_eq!(mid.neutral_item.as_deref(), Some("Unknown Item 9999"));

    let support = &summary.players[1];
    assert_eq!(support.name, "Anonymous");
    assert_eq!(support.hero, "Crystal Maiden");
    assert_eq!(support.side, Side::Dire);
    assert!(support.items.is_empty());
    assert_eq!(support.neutral_item, None);

    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unknown_match_becomes_error_payload() {
    let summarizer = MatchSummarizer::new(MockSource::new(Reply::NotFound));
    let report = summarizer.summarize_match("1").await.unwrap();

    assert_eq!(report, MatchReport::not_found());
    assert_eq!(report.to_tool_content(), r#"{"error":"Match not found"}"#);
}

#[tokio::test]
async fn upstream_failure_propagates() {
    let summarizer = MatchSummarizer::new(MockSource::new(Reply::Down));
    let err = summarizer.summarize_match("1").await.unwrap_err();
    assert_eq!(err.status(), Some(502));
}

#[tokio::test]
async fn custom_catalog_is_used() {
    let mut detail = sample_match();
    detail.players.truncate(1);
    let catalog = ItemCatalog::from_tables(&[(63, "power_treads")], &[("power_treads", "Treads")]);
    let summarizer =
        MatchSummarizer::with_catalog(MockSource::new(Reply::Match(detail)), catalog);

    let report = summarizer.summarize_match("7891234567").await.unwrap();
    let items = &report.summary().unwrap().players[0].items;
    assert_eq!(items, &["Treads", "Unknown Item 116", "Unknown Item 35"]);
}

#[test]
fn summary_serializes_for_the_model() {
    let summary = courier::summarize::summarize(&sample_match(), ItemCatalog::builtin());
    let json: serde_json::Value =
        serde_json::from_str(&MatchReport::Summary(summary).to_tool_content()).unwrap();

    assert_eq!(json["match_id"], "7891234567");
    assert_eq!(json["outcome"], "Radiant Victory");
    assert_eq!(json["players"][0]["hero"], "Shadow Fiend");
    assert_eq!(json["players"][1]["side"], "Dire");
}
