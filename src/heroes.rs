//! Hero ranking and lookup.
//!
//! Pure functions over an already-fetched hero stats list. The facade
//! fetches (through the cache) and hands the slice in, so every function
//! here is synchronous and deterministic.

use crate::types::{HeroDetail, HeroRole, HeroStat, RankedHero};

/// Heroes tagged with `role`, best public win rate first, at most `count`.
///
/// Ties keep the upstream order (stable sort). `count` is not capped here.
pub fn top_heroes_by_role(heroes: &[HeroStat], role: HeroRole, count: usize) -> Vec<RankedHero> {
    let mut ranked: Vec<RankedHero> = heroes
        .iter()
        .filter(|hero| hero.has_role(role))
        .map(RankedHero::from)
        .collect();
    ranked.sort_by(|a, b| b.win_rate.total_cmp(&a.win_rate));
    ranked.truncate(count);
    ranked
}

/// [`top_heroes_by_role`] for every role, in [`HeroRole::ALL`] order.
pub fn all_roles_top(heroes: &[HeroStat], count: usize) -> Vec<(HeroRole, Vec<RankedHero>)> {
    HeroRole::ALL
        .into_iter()
        .map(|role| (role, top_heroes_by_role(heroes, role, count)))
        .collect()
}

/// Find a hero by display name, ignoring case.
///
/// An exact match wins; otherwise the first hero (in upstream order) whose
/// name contains the query. Blank queries match nothing.
pub fn lookup_hero(heroes: &[HeroStat], query: &str) -> Option<HeroDetail> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }

    heroes
        .iter()
        .find(|hero| hero.localized_name.to_lowercase() == query)
        .or_else(|| {
            heroes
                .iter()
                .find(|hero| hero.localized_name.to_lowercase().contains(&query))
        })
        .map(HeroDetail::from)
}
