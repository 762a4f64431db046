//! Route handlers for the herodex API
//!
//! Organized by resource type:
//! - heroes: read-only hero listing and detail
//! - powers: power listing, detail, and description updates
//! - hero_powers: hero-power link creation
//! - health: health check endpoint

pub mod health;
pub mod hero_powers;
pub mod heroes;
pub mod powers;

pub use health::*;
pub use hero_powers::*;
pub use heroes::*;
pub use powers::*;

use axum::response::Html;

/// GET / - Landing page
pub async fn index() -> Html<&'static str> {
    Html("<h1>Herodex API</h1>")
}
