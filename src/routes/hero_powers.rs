//! Hero-power link routes

use axum::{extract::State, Json};

use crate::db::Database;
use crate::error::{ServerError, ServerResult};
use crate::models::{CreateHeroPowerRequest, HeroPowerDetail, Strength};

/// POST /hero_powers - Link a hero to a power
///
/// Checks run in order: all three fields present, strength in the allowed
/// set, then both referenced rows exist. A constraint violation on the
/// insert itself still comes back as a 400, not a server fault.
pub async fn create_hero_power(
    State(db): State<Database>,
    Json(req): Json<CreateHeroPowerRequest>,
) -> ServerResult<Json<HeroPowerDetail>> {
    let (strength_raw, power_id, hero_id) =
        req.fields().ok_or(ServerError::MissingFields)?;

    let strength: Strength = strength_raw.parse().map_err(|_| ServerError::Validation)?;

    let hero = db.get_hero(hero_id)?;
    let power = db.get_power(power_id)?;
    let (hero, power) = match (hero, power) {
        (Some(hero), Some(power)) => (hero, power),
        _ => return Err(ServerError::LinkTargetNotFound),
    };

    let id = db.create_hero_power(hero_id, power_id, strength)?;

    Ok(Json(HeroPowerDetail {
        id,
        hero_id,
        power_id,
        strength,
        hero,
        power,
    }))
}
