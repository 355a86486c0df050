use std::sync::Arc;

use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn get_recipe(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    Json(dto::RecipeResponse {
        enabled: services.recipes.is_some(),
        recipe: services.recipes.as_ref().and_then(|board| board.current()),
    })
    .into_response()
}

/// Ask for a new recipe from the names currently in the inventory.
pub async fn refresh_recipe(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    let Some(board) = services.recipes.clone() else {
        return errors::json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "recipes_disabled",
            "recipe suggestions are not configured",
        );
    };

    match board.refresh(services.view.snapshot().names()).await {
        Ok(recipe) => Json(dto::RecipeResponse { enabled: true, recipe }).into_response(),
        Err(e) => errors::suggestion_error_to_response(e),
    }
}
