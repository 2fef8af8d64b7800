//! Hero statistics: the upstream record and the views derived from it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CourierError;

/// CDN host that hero `img`/`icon` paths are relative to.
pub const HERO_CDN_BASE: &str = "https://cdn.dota2.com";

/// Hero role as tagged by OpenDota.
///
/// [`HeroRole::ALL`] fixes the order used wherever every role is listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeroRole {
    Carry,
    Support,
    Nuker,
    Disabler,
    Initiator,
    Durable,
    Escape,
    Pusher,
}

impl HeroRole {
    pub const ALL: [HeroRole; 8] = [
        HeroRole::Carry,
        HeroRole::Support,
        HeroRole::Nuker,
        HeroRole::Disabler,
        HeroRole::Initiator,
        HeroRole::Durable,
        HeroRole::Escape,
        HeroRole::Pusher,
    ];

    /// Upstream spelling of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeroRole::Carry => "Carry",
            HeroRole::Support => "Support",
            HeroRole::Nuker => "Nuker",
            HeroRole::Disabler => "Disabler",
            HeroRole::Initiator => "Initiator",
            HeroRole::Durable => "Durable",
            HeroRole::Escape => "Escape",
            HeroRole::Pusher => "Pusher",
        }
    }
}

impl fmt::Display for HeroRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeroRole {
    type Err = CourierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        HeroRole::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CourierError::InvalidInput(format!("unknown role: {wanted}")))
    }
}

/// One entry of OpenDota's `/api/heroStats`.
///
/// Only the fields courier reads are declared; numeric fields missing from
/// the payload default to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroStat {
    pub id: u32,
    /// Internal name, e.g. `npc_dota_hero_antimage`.
    #[serde(default)]
    pub name: String,
    pub localized_name: String,
    #[serde(default)]
    pub primary_attr: String,
    #[serde(default)]
    pub attack_type: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub img: String,
    #[serde(default)]
    pub icon: String,

    #[serde(default)]
    pub base_str: f64,
    #[serde(default)]
    pub base_agi: f64,
    #[serde(default)]
    pub base_int: f64,
    #[serde(default)]
    pub str_gain: f64,
    #[serde(default)]
    pub agi_gain: f64,
    #[serde(default)]
    pub int_gain: f64,

    #[serde(default)]
    pub base_health: f64,
    #[serde(default)]
    pub base_mana: f64,
    #[serde(default)]
    pub base_armor: f64,
    #[serde(default)]
    pub base_attack_min: f64,
    #[serde(default)]
    pub base_attack_max: f64,
    #[serde(default)]
    pub attack_range: f64,
    #[serde(default)]
    pub move_speed: f64,

    /// Public-match picks across all brackets.
    #[serde(default)]
    pub pub_pick: u64,
    /// Public-match wins across all brackets.
    #[serde(default)]
    pub pub_win: u64,
}

impl HeroStat {
    /// Public win rate in percent; zero when the hero was never picked.
    ///
    /// Not clamped: inconsistent upstream counters can exceed 100.
    pub fn win_rate(&self) -> f64 {
        if self.pub_pick == 0 {
            return 0.0;
        }
        self.pub_win as f64 / self.pub_pick as f64 * 100.0
    }

    pub fn has_role(&self, role: HeroRole) -> bool {
        self.roles.iter().any(|r| r == role.as_str())
    }

    pub fn img_url(&self) -> String {
        format!("{HERO_CDN_BASE}{}", self.img)
    }

    pub fn icon_url(&self) -> String {
        format!("{HERO_CDN_BASE}{}", self.icon)
    }
}

/// Human-readable label for a primary attribute code.
///
/// Unknown codes pass through verbatim.
pub fn attribute_label(code: &str) -> &str {
    match code {
        "str" => "Strength",
        "agi" => "Agility",
        "int" => "Intelligence",
        "all" => "Universal",
        other => other,
    }
}

/// A hero ranked within a role, computed per query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedHero {
    pub id: u32,
    pub name: String,
    pub win_rate: f64,
    pub picks: u64,
    pub img_url: String,
    pub icon_url: String,
    pub primary_attr: String,
}

impl From<&HeroStat> for RankedHero {
    fn from(hero: &HeroStat) -> Self {
        Self {
            id: hero.id,
            name: hero.localized_name.clone(),
            win_rate: hero.win_rate(),
            picks: hero.pub_pick,
            img_url: hero.img_url(),
            icon_url: hero.icon_url(),
            primary_attr: hero.primary_attr.clone(),
        }
    }
}

/// Everything a hero card shows: the ranked view plus base and combat stats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroDetail {
    pub id: u32,
    pub name: String,
    pub win_rate: f64,
    pub picks: u64,
    pub img_url: String,
    pub icon_url: String,
    pub primary_attr: String,
    pub primary_attr_label: String,
    pub attack_type: String,
    pub roles: Vec<String>,
    pub base_str: f64,
    pub base_agi: f64,
    pub base_int: f64,
    pub str_gain: f64,
    pub agi_gain: f64,
    pub int_gain: f64,
    pub base_health: f64,
    pub base_mana: f64,
    pub base_armor: f64,
    pub base_attack_min: f64,
    pub base_attack_max: f64,
    pub attack_range: f64,
    pub move_speed: f64,
}

impl From<&HeroStat> for HeroDetail {
    fn from(hero: &HeroStat) -> Self {
        Self {
            id: hero.id,
            name: hero.localized_name.clone(),
            win_rate: hero.win_rate(),
            picks: hero.pub_pick,
            img_url: hero.img_url(),
            icon_url: hero.icon_url(),
            primary_attr: hero.primary_attr.clone(),
            primary_attr_label: attribute_label(&hero.primary_attr).to_string(),
            attack_type: hero.attack_type.clone(),
            roles: hero.roles.clone(),
            base_str: hero.base_str,
            base_agi: hero.base_agi,
            base_int: hero.base_int,
            str_gain: hero.str_gain,
            agi_gain: hero.agi_gain,
            int_gain: hero.int_gain,
            base_health: hero.base_health,
            base_mana: hero.base_mana,
            base_armor: hero.base_armor,
            base_attack_min: hero.base_attack_min,
            base_attack_max: hero.base_attack_max,
            attack_range: hero.attack_range,
            move_speed: hero.move_speed,
        }
    }
}
