//! Power routes - listing, detail, and description updates

use axum::{
    extract::{Path, State},
    Json,
};

use crate::db::Database;
use crate::error::{ServerError, ServerResult};
use crate::models::{Power, UpdatePowerRequest, MIN_DESCRIPTION_LEN};

/// GET /powers - List all powers
pub async fn list_powers(State(db): State<Database>) -> ServerResult<Json<Vec<Power>>> {
    let powers = db.list_powers()?;
    Ok(Json(powers))
}

/// GET /powers/:id - Get a single power
pub async fn get_power(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> ServerResult<Json<Power>> {
    let power = db.get_power(id)?.ok_or(ServerError::PowerNotFound)?;
    Ok(Json(power))
}

/// PATCH /powers/:id - Update a power's description
///
/// Checks run in order: the power must exist, the body must carry a
/// description, and the description must be at least 20 characters.
pub async fn update_power(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(req): Json<UpdatePowerRequest>,
) -> ServerResult<Json<Power>> {
    if db.get_power(id)?.is_none() {
        return Err(ServerError::PowerNotFound);
    }

    let description = req.description.ok_or(ServerError::DescriptionRequired)?;
    if description.chars().count() < MIN_DESCRIPTION_LEN {
        return Err(ServerError::Validation);
    }

    let power = db.update_power_description(id, &description)?;
    Ok(Json(power))
}
