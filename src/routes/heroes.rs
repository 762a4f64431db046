//! Hero routes - read-only listing and detail

use axum::{
    extract::{Path, State},
    Json,
};

use crate::db::Database;
use crate::error::{ServerError, ServerResult};
use crate::models::{Hero, HeroDetail};

/// GET /heroes - List all heroes
pub async fn list_heroes(State(db): State<Database>) -> ServerResult<Json<Vec<Hero>>> {
    let heroes = db.list_heroes()?;
    Ok(Json(heroes))
}

/// GET /heroes/:id - Get a hero with its power links
pub async fn get_hero(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> ServerResult<Json<HeroDetail>> {
    let hero = db.get_hero_detail(id)?.ok_or(ServerError::HeroNotFound)?;
    Ok(Json(hero))
}
