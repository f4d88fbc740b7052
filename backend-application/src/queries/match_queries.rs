use tracing::{error, warn};

use crate::AppState;
use backend_domain::services::aggregation;
use backend_domain::{CombatMatch, HeroDamage, HeroItem, HeroKills, HeroSpells, MatchId};
use crate::AppError;

async fn find_match(state: &AppState, match_id: MatchId) -> Result<CombatMatch, AppError> {
    state.metrics.record_query();
    match state.match_repo.find_by_id(match_id).await {
        Ok(Some(combat_match)) => Ok(combat_match),
        Ok(None) => {
            warn!(match_id = %match_id, "match not found");
            Err(AppError::MatchNotFound(match_id))
        }
        Err(err) => {
            error!(match_id = %match_id, "failed to load match: {:?}", err);
            Err(AppError::Internal(err))
        }
    }
}

fn no_result(match_id: MatchId, hero: &str, report: &str) -> AppError {
    warn!(match_id = %match_id, hero, report, "no result for hero");
    AppError::NoResult {
        hero: hero.to_string(),
    }
}

/// Kill counts for every hero that killed at least once. An empty list is a
/// valid answer.
pub async fn list_hero_kills(state: &AppState, match_id: MatchId) -> Result<Vec<HeroKills>, AppError> {
    let combat_match = find_match(state, match_id).await?;
    Ok(aggregation::kills_by_hero(combat_match.events())
        .into_iter()
        .map(|(hero, kills)| HeroKills { hero, kills })
        .collect())
}

pub async fn list_hero_items(
    state: &AppState,
    match_id: MatchId,
    hero: &str,
) -> Result<Vec<HeroItem>, AppError> {
    let combat_match = find_match(state, match_id).await?;
    let items = aggregation::items_by_hero(combat_match.events(), hero);
    if items.is_empty() {
        return Err(no_result(match_id, hero, "items"));
    }
    Ok(items)
}

pub async fn list_hero_spells(
    state: &AppState,
    match_id: MatchId,
    hero: &str,
) -> Result<Vec<HeroSpells>, AppError> {
    let combat_match = find_match(state, match_id).await?;
    let spells = aggregation::spells_by_hero(combat_match.events(), hero);
    if spells.is_empty() {
        return Err(no_result(match_id, hero, "spells"));
    }
    Ok(spells
        .into_iter()
        .map(|(spell, casts)| HeroSpells { spell, casts })
        .collect())
}

pub async fn list_hero_damage(
    state: &AppState,
    match_id: MatchId,
    hero: &str,
) -> Result<Vec<HeroDamage>, AppError> {
    let combat_match = find_match(state, match_id).await?;
    let damage = aggregation::damage_by_hero(combat_match.events(), hero);
    if damage.is_empty() {
        return Err(no_result(match_id, hero, "damage"));
    }
    Ok(damage.into_iter().map(HeroDamage::from).collect())
}
