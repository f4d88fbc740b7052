use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;

use backend_application::queries::match_queries;
use backend_application::AppState;
use backend_domain::{HeroDamage, HeroItem, HeroKills, HeroSpells, MatchId};

use crate::error::HttpError;
use crate::middleware::authorize;

fn parse_match_id(raw: &str) -> Result<MatchId, HttpError> {
    raw.trim()
        .parse::<u64>()
        .map(MatchId)
        .map_err(|_| HttpError::BadRequest(format!("invalid match id '{}'", raw)))
}

pub async fn get_hero_kills(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(match_id): Path<String>,
) -> Result<Json<Vec<HeroKills>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let match_id = parse_match_id(&match_id)?;
    let kills = match_queries::list_hero_kills(&state, match_id).await?;
    Ok(Json(kills))
}

pub async fn get_hero_items(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((match_id, hero_name)): Path<(String, String)>,
) -> Result<Json<Vec<HeroItem>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let match_id = parse_match_id(&match_id)?;
    let items = match_queries::list_hero_items(&state, match_id, &hero_name).await?;
    Ok(Json(items))
}

pub async fn get_hero_spells(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((match_id, hero_name)): Path<(String, String)>,
) -> Result<Json<Vec<HeroSpells>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let match_id = parse_match_id(&match_id)?;
    let spells = match_queries::list_hero_spells(&state, match_id, &hero_name).await?;
    Ok(Json(spells))
}

pub async fn get_hero_damage(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((match_id, hero_name)): Path<(String, String)>,
) -> Result<Json<Vec<HeroDamage>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let match_id = parse_match_id(&match_id)?;
    let damage = match_queries::list_hero_damage(&state, match_id, &hero_name).await?;
    Ok(Json(damage))
}
