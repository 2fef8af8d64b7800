//! Match detail schema (OpenDota `/api/matches/{id}`) and its compact summary.

use serde::{Deserialize, Deserializer, Serialize};

/// Player slots at or above this value belong to Dire.
const DIRE_SLOT_OFFSET: u8 = 128;

/// The subset of an OpenDota match payload courier reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchDetail {
    pub match_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub radiant_win: bool,
    /// Match length in seconds.
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub radiant_score: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dire_score: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub players: Vec<PlayerDetail>,
}

/// One of the ten players in a [`MatchDetail`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerDetail {
    #[serde(default)]
    pub personaname: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hero_id: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub player_slot: u8,
    #[serde(default, rename = "isRadiant")]
    pub is_radiant: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kills: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deaths: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assists: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_hits: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub denies: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gold_per_min: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub xp_per_min: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub net_worth: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hero_damage: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tower_damage: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub level: u32,
    #[serde(default)]
    pub item_0: Option<u32>,
    #[serde(default)]
    pub item_1: Option<u32>,
    #[serde(default)]
    pub item_2: Option<u32>,
    #[serde(default)]
    pub item_3: Option<u32>,
    #[serde(default)]
    pub item_4: Option<u32>,
    #[serde(default)]
    pub item_5: Option<u32>,
    #[serde(default)]
    pub item_neutral: Option<u32>,
}

impl PlayerDetail {
    pub fn side(&self) -> Side {
        match self.is_radiant {
            Some(true) => Side::Radiant,
            Some(false) => Side::Dire,
            None if self.player_slot < DIRE_SLOT_OFFSET => Side::Radiant,
            None => Side::Dire,
        }
    }

    /// The six inventory slots in order.
    pub fn item_slots(&self) -> [Option<u32>; 6] {
        [
            self.item_0,
            self.item_1,
            self.item_2,
            self.item_3,
            self.item_4,
            self.item_5,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Radiant,
    Dire,
}

/// Compact match view fed back to the model as a tool result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    /// Kept as a string so large ids survive any JSON consumer.
    pub match_id: String,
    pub outcome: String,
    pub duration_secs: u64,
    /// `mm:ss`
    pub duration: String,
    pub radiant_score: u32,
    pub dire_score: u32,
    pub players: Vec<PlayerSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub name: String,
    pub hero: String,
    pub side: Side,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    /// `kills/deaths/assists`
    pub kda: String,
    pub last_hits: u32,
    pub denies: u32,
    pub gold_per_min: u32,
    pub xp_per_min: u32,
    pub net_worth: u64,
    pub hero_damage: u64,
    pub tower_damage: u64,
    pub level: u32,
    pub items: Vec<String>,
    pub neutral_item: Option<String>,
}

/// Result of summarizing a match: either the summary or an error payload.
///
/// Serializes untagged, so the not-found case renders as
/// `{"error":"Match not found"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MatchReport {
    Summary(MatchSummary),
    Error { error: String },
}

impl MatchReport {
    pub fn not_found() -> Self {
        MatchReport::Error {
            error: "Match not found".to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        MatchReport::Error {
            error: message.into(),
        }
    }

    pub fn summary(&self) -> Option<&MatchSummary> {
        match self {
            MatchReport::Summary(s) => Some(s),
            MatchReport::Error { .. } => None,
        }
    }

    /// Compact JSON, as placed in a tool-result turn.
    pub fn to_tool_content(&self) -> String {
        // Plain structs and strings: serialization cannot fail.
        serde_json::to_string(self).unwrap_or_else(|e| {
            serde_json::json!({ "error": e.to_string() }).to_string()
        })
    }
}

/// Upstream sends `null` for stats it did not record; read those as zero.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Format seconds as `mm:ss` (minutes may exceed 59).
pub fn format_duration(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_from_slot() {
        let radiant = PlayerDetail {
            player_slot: 4,
            ..Default::default()
        };
        let dire = PlayerDetail {
            player_slot: 130,
            ..Default::default()
        };
        assert_eq!(radiant.side(), Side::Radiant);
        assert_eq!(dire.side(), Side::Dire);
    }

    #[test]
    fn explicit_flag_wins_over_slot() {
        let player = PlayerDetail {
            player_slot: 0,
            is_radiant: Some(false),
            ..Default::default()
        };
        assert_eq!(player.side(), Side::Dire);
    }

    #[test]
    fn not_found_renders_error_payload() {
        assert_eq!(
            MatchReport::not_found().to_tool_content(),
            r#"{"error":"Match not found"}"#
        );
    }

    #[test]
    fn null_stats_read_as_zero() {
        let detail: MatchDetail = serde_json::from_str(
            r#"{"match_id": 1, "radiant_win": null, "duration": 1500, "dire_score": null,
                "players": [{"hero_id": 1, "player_slot": 0, "net_worth": null,
                             "kills": 7, "tower_damage": null, "item_0": null}]}"#,
        )
        .unwrap();
        assert!(!detail.radiant_win);
        assert_eq!(detail.dire_score, 0);
        let player = &detail.players[0];
        assert_eq!(player.net_worth, 0);
        assert_eq!(player.tower_damage, 0);
        assert_eq!(player.kills, 7);
        assert_eq!(player.item_0, None);
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(2052), "34:12");
        assert_eq!(format_duration(3725), "62:05");
    }
}
